//! # Cached Repository
//!
//! Decorator that forwards each order id to the backing store at most once.
//!
//! ## Save Sequence
//! ```text
//! save(order, total)
//!      │
//!      ▼
//! acquire WRITE lock ─────────────────────────────────────┐
//!      │                                                   │
//!      ├── id in set? ──yes──► Ok(()) (no forward)         │ held for
//!      │                                                   │ the whole
//!      ▼ no                                                │ sequence
//! backing.save(order, total) ──Err──► Err (id NOT marked)  │
//!      │ Ok                                                │
//!      ▼                                                   │
//! insert id into set ─► Ok(())                             │
//!      ────────────────────────────────────────────────────┘
//! ```
//!
//! Holding the write lock across the backing call serializes all saves on
//! one instance, including saves of different ids. `exists` only consults
//! the set, so ids persisted by another process are reported as absent.

use std::collections::HashSet;

use async_trait::async_trait;
use orderflow_core::{Money, Order};
use tokio::sync::RwLock;
use tracing::{debug, warn};

use super::OrderRepository;
use crate::error::RepositoryResult;

pub struct CachedOrderRepository<R> {
    backing: R,
    seen: RwLock<HashSet<String>>,
}

impl<R: OrderRepository> CachedOrderRepository<R> {
    pub fn new(backing: R) -> Self {
        CachedOrderRepository {
            backing,
            seen: RwLock::new(HashSet::new()),
        }
    }

    /// Starts with ids that are already known to be persisted.
    pub fn with_known_ids<I, S>(backing: R, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        CachedOrderRepository {
            backing,
            seen: RwLock::new(ids.into_iter().map(Into::into).collect()),
        }
    }

    /// Number of ids marked as persisted.
    pub async fn cached_count(&self) -> usize {
        self.seen.read().await.len()
    }

    pub fn backing(&self) -> &R {
        &self.backing
    }
}

#[async_trait]
impl<R: OrderRepository> OrderRepository for CachedOrderRepository<R> {
    async fn save(&self, order: &Order, total: Money) -> RepositoryResult<()> {
        let mut seen = self.seen.write().await;

        if seen.contains(&order.id) {
            warn!(order_id = %order.id, "Order already persisted, skipping save");
            return Ok(());
        }

        self.backing.save(order, total).await?;
        seen.insert(order.id.clone());
        debug!(order_id = %order.id, "Order persisted and cached");

        Ok(())
    }

    async fn exists(&self, order_id: &str) -> bool {
        self.seen.read().await.contains(order_id)
    }
}

impl<R> std::fmt::Debug for CachedOrderRepository<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CachedOrderRepository").finish_non_exhaustive()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RepositoryError;
    use orderflow_core::{Address, Item, OrderKind};
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
    use std::sync::Arc;
    use std::time::Duration;

    /// Backing store that counts writes and can be told to fail.
    #[derive(Default)]
    struct CountingRepository {
        saves: AtomicUsize,
        fail: AtomicBool,
        delay_ms: u64,
    }

    #[async_trait]
    impl OrderRepository for CountingRepository {
        async fn save(&self, order: &Order, _total: Money) -> RepositoryResult<()> {
            if self.delay_ms > 0 {
                tokio::time::sleep(Duration::from_millis(self.delay_ms)).await;
            }
            if self.fail.load(Ordering::SeqCst) {
                return Err(RepositoryError::write_failed(&order.id, "disk full"));
            }
            self.saves.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }

        async fn exists(&self, _order_id: &str) -> bool {
            true
        }
    }

    fn order(id: &str) -> Order {
        Order::new(id, OrderKind::Standard, "a@b.com", Address::in_city("Lima"))
            .with_item(Item::new("1", "Lamp", Money::from_cents(2500)))
    }

    #[tokio::test]
    async fn test_second_save_is_not_forwarded() {
        let repo = CachedOrderRepository::new(CountingRepository::default());
        let order = order("ORD-1");

        repo.save(&order, Money::from_cents(3000)).await.unwrap();
        repo.save(&order, Money::from_cents(3000)).await.unwrap();

        assert_eq!(repo.backing().saves.load(Ordering::SeqCst), 1);
        assert_eq!(repo.cached_count().await, 1);
    }

    #[tokio::test]
    async fn test_distinct_ids_each_forwarded() {
        let repo = CachedOrderRepository::new(CountingRepository::default());
        repo.save(&order("A"), Money::zero()).await.unwrap();
        repo.save(&order("B"), Money::zero()).await.unwrap();
        assert_eq!(repo.backing().saves.load(Ordering::SeqCst), 2);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_saves_write_once() {
        let repo = Arc::new(CachedOrderRepository::new(CountingRepository {
            delay_ms: 5,
            ..Default::default()
        }));

        let handles: Vec<_> = (0..50)
            .map(|_| {
                let repo = Arc::clone(&repo);
                tokio::spawn(async move { repo.save(&order("ORD-RACE"), Money::from_cents(100)).await })
            })
            .collect();

        for handle in handles {
            handle.await.unwrap().unwrap();
        }

        assert_eq!(repo.backing().saves.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_failed_save_is_not_cached() {
        let repo = CachedOrderRepository::new(CountingRepository::default());
        let order = order("ORD-F");

        repo.backing().fail.store(true, Ordering::SeqCst);
        let err = repo.save(&order, Money::zero()).await.unwrap_err();
        assert_eq!(err, RepositoryError::write_failed("ORD-F", "disk full"));
        assert!(!repo.exists("ORD-F").await);

        repo.backing().fail.store(false, Ordering::SeqCst);
        repo.save(&order, Money::zero()).await.unwrap();
        assert_eq!(repo.backing().saves.load(Ordering::SeqCst), 1);
        assert!(repo.exists("ORD-F").await);
    }

    #[tokio::test]
    async fn test_exists_only_consults_cache() {
        // The backing store claims to know every id.
        let repo = CachedOrderRepository::new(CountingRepository::default());
        assert!(!repo.exists("ORD-ELSEWHERE").await);
    }

    #[tokio::test]
    async fn test_known_ids_are_skipped() {
        let repo = CachedOrderRepository::with_known_ids(CountingRepository::default(), ["ORD-OLD"]);
        assert!(repo.exists("ORD-OLD").await);

        repo.save(&order("ORD-OLD"), Money::zero()).await.unwrap();
        assert_eq!(repo.backing().saves.load(Ordering::SeqCst), 0);
    }
}
