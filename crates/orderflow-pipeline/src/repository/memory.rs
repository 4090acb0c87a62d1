//! In-memory backing store.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use orderflow_core::{Money, Order, OrderKind};
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use tracing::debug;
use uuid::Uuid;

use super::OrderRepository;
use crate::error::RepositoryResult;

/// One persisted record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredOrder {
    /// Identifier of this write, distinct for repeated saves of one order.
    pub record_id: Uuid,
    pub order_id: String,
    pub kind: OrderKind,
    pub total: Money,
    pub stored_at: DateTime<Utc>,
}

/// Append-only store that keeps every write in insertion order.
///
/// It does not deduplicate: wrap it in a `CachedOrderRepository` for
/// at-most-once writes.
#[derive(Debug, Default)]
pub struct InMemoryOrderRepository {
    records: RwLock<Vec<StoredOrder>>,
}

impl InMemoryOrderRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of every write so far.
    pub async fn records(&self) -> Vec<StoredOrder> {
        self.records.read().await.clone()
    }

    /// Number of writes recorded for `order_id`.
    pub async fn count_for(&self, order_id: &str) -> usize {
        self.records
            .read()
            .await
            .iter()
            .filter(|r| r.order_id == order_id)
            .count()
    }

    /// Total number of writes.
    pub async fn record_count(&self) -> usize {
        self.records.read().await.len()
    }
}

#[async_trait]
impl OrderRepository for InMemoryOrderRepository {
    async fn save(&self, order: &Order, total: Money) -> RepositoryResult<()> {
        let record = StoredOrder {
            record_id: Uuid::new_v4(),
            order_id: order.id.clone(),
            kind: order.kind.clone(),
            total,
            stored_at: Utc::now(),
        };

        debug!(order_id = %order.id, record_id = %record.record_id, total = %total, "Order stored");
        self.records.write().await.push(record);
        Ok(())
    }

    async fn exists(&self, order_id: &str) -> bool {
        self.records
            .read()
            .await
            .iter()
            .any(|r| r.order_id == order_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use orderflow_core::Address;

    #[tokio::test]
    async fn test_records_every_write() {
        let repo = InMemoryOrderRepository::new();
        let order = Order::new("ORD-1", OrderKind::Budget, "a@b.com", Address::in_city("Rome"));

        repo.save(&order, Money::from_cents(500)).await.unwrap();
        repo.save(&order, Money::from_cents(500)).await.unwrap();

        assert_eq!(repo.record_count().await, 2);
        assert_eq!(repo.count_for("ORD-1").await, 2);
        assert!(repo.exists("ORD-1").await);
        assert!(!repo.exists("ORD-2").await);

        let records = repo.records().await;
        assert_eq!(records[0].kind, OrderKind::Budget);
        assert_eq!(records[0].total.cents(), 500);
        assert_ne!(records[0].record_id, records[1].record_id);
    }
}
