//! # Repository Module
//!
//! Persistence seam of the pipeline.
//!
//! ## Repository Layering
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Repository Layering                                │
//! │                                                                         │
//! │  OrderProcessor                                                         │
//! │       │ save(order, total)                                              │
//! │       ▼                                                                 │
//! │  ┌──────────────────────────────┐                                      │
//! │  │  CachedOrderRepository       │  write lock: check → forward → mark  │
//! │  │  (at most one write per id)  │  read lock:  exists                  │
//! │  └──────────────┬───────────────┘                                      │
//! │                 │ first save of an id only                              │
//! │                 ▼                                                       │
//! │  ┌──────────────────────────────┐                                      │
//! │  │  Backing OrderRepository     │  InMemoryOrderRepository, or any     │
//! │  │                              │  caller-supplied store               │
//! │  └──────────────────────────────┘                                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

mod cached;
mod memory;

pub use cached::CachedOrderRepository;
pub use memory::{InMemoryOrderRepository, StoredOrder};

use std::sync::Arc;

use async_trait::async_trait;
use orderflow_core::{Money, Order};

use crate::error::RepositoryResult;

/// Contract for the persistence stage.
#[async_trait]
pub trait OrderRepository: Send + Sync {
    /// Persists a priced order.
    async fn save(&self, order: &Order, total: Money) -> RepositoryResult<()>;

    /// Reports whether an order id is known to this repository.
    async fn exists(&self, order_id: &str) -> bool;
}

#[async_trait]
impl<R: OrderRepository + ?Sized> OrderRepository for Arc<R> {
    async fn save(&self, order: &Order, total: Money) -> RepositoryResult<()> {
        (**self).save(order, total).await
    }

    async fn exists(&self, order_id: &str) -> bool {
        (**self).exists(order_id).await
    }
}
