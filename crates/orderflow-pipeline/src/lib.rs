//! # orderflow-pipeline: Order Processing Pipeline
//!
//! Takes a fully formed order through validation, pricing, persistence and
//! notification, wrapping any failure with the stage it came from.
//!
//! ## Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       OrderProcessor                                    │
//! │                                                                         │
//! │   ┌──────────────┐  ┌──────────────┐  ┌──────────────┐  ┌───────────┐ │
//! │   │ OrderValidator│  │PriceCalculator│ │OrderRepository│ │Notification│ │
//! │   │ (core)       │  │ (core)       │  │              │  │ Service    │ │
//! │   └──────────────┘  └──────────────┘  └──────┬───────┘  └─────┬─────┘ │
//! │                                              │                │       │
//! │                                   CachedOrderRepository   Composite   │
//! │                                              │            fan-out     │
//! │                                      backing store       ┌──┼──┐      │
//! │                                                          ▼  ▼  ▼      │
//! │                                                       Notifier × N    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use orderflow_core::{Address, Item, Money, Order, OrderKind};
//! use orderflow_pipeline::{
//!     InMemoryOrderRepository, OrderProcessor, PipelineConfig, TracingNotifier,
//! };
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! orderflow_pipeline::logging::init_tracing();
//!
//! let processor = OrderProcessor::builder(PipelineConfig::load_or_default(None))
//!     .with_repository(Arc::new(InMemoryOrderRepository::new()))
//!     .with_channel(Arc::new(TracingNotifier::new("email")))
//!     .with_channel(Arc::new(TracingNotifier::new("telegram")))
//!     .with_channel(Arc::new(TracingNotifier::new("log")))
//!     .build()?;
//!
//! let order = Order::new("ORD-001", OrderKind::Premium, "john@example.com", Address::in_city("New York"))
//!     .with_item(Item::new("1", "Laptop", Money::from_major_minor(1500, 0)))
//!     .with_card("Gold");
//!
//! let processed = processor.process(&order).await?;
//! assert_eq!(processed.summary.total.to_string(), "$1377.00");
//! # Ok(())
//! # }
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod config;
pub mod error;
pub mod logging;
pub mod notification;
pub mod processor;
pub mod repository;

// =============================================================================
// Re-exports
// =============================================================================

pub use config::{NotificationSettings, PipelineConfig};
pub use error::{
    ConfigError, ConfigResult, NotificationError, NotificationResult, ProcessError,
    ProcessResult, RepositoryError, RepositoryResult, Stage,
};
pub use notification::{
    compose_messages, ChannelOutcome, CompositeNotificationService, DeliveryReport,
    DeliveryStatus, NotificationService, Notifier, OutboundMessage, RecordingNotifier,
    SentMessage, TracingNotifier,
};
pub use processor::{OrderProcessor, OrderProcessorBuilder, ProcessedOrder};
pub use repository::{CachedOrderRepository, InMemoryOrderRepository, OrderRepository, StoredOrder};
