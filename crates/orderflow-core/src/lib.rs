//! # orderflow-core: Pure Business Logic for Orderflow
//!
//! This crate decides what an order costs and whether it may be processed
//! at all. It contains no I/O: persistence and notification live in
//! `orderflow-pipeline`.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Orderflow Architecture                           │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                orderflow-pipeline (OrderProcessor)              │   │
//! │  │   validate ──► calculate ──► persist ──► notify                 │   │
//! │  └──────┬──────────────┬───────────────────────────────────────────┘   │
//! │         │              │                                                │
//! │  ┌──────▼──────────────▼───────────────────────────────────────────┐   │
//! │  │               ★ orderflow-core (THIS CRATE) ★                    │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │   money   │  │  pricing  │  │ validation│  │   │
//! │  │   │   Order   │  │   Money   │  │ Strategies│  │   rules   │  │   │
//! │  │   │   Item    │  │  Modifier │  │ Calculator│  │   checks  │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Order, Item, Address, DiscountCard, OrderSummary)
//! - [`money`] - Integer money and basis-point modifiers
//! - [`error`] - Validation and pricing errors
//! - [`validation`] - The order validator
//! - [`pricing`] - Order-kind and discount-card strategies
//! - [`calculator`] - The strategy-driven price calculator
//!
//! ## Example Usage
//!
//! ```rust
//! use orderflow_core::calculator::{PriceCalculator, SmartPriceCalculator};
//! use orderflow_core::{Address, Item, Money, Order, OrderKind};
//!
//! let order = Order::new("ORD-001", OrderKind::Premium, "john@example.com", Address::in_city("New York"))
//!     .with_item(Item::new("1", "Laptop", Money::from_major_minor(1500, 0)))
//!     .with_card("Gold");
//!
//! let total = SmartPriceCalculator::new().calculate(&order).unwrap();
//! assert_eq!(total.to_string(), "$1377.00");
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod calculator;
pub mod error;
pub mod money;
pub mod pricing;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use calculator::{PriceCalculator, SmartPriceCalculator};
pub use error::{CoreError, CoreResult, PricingError, PricingResult, ValidationError, ValidationResult};
pub use money::{Modifier, Money};
pub use types::*;
pub use validation::{BasicOrderValidator, OrderValidator, ValidationRules};

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Maximum items allowed in a Budget order unless configured otherwise.
pub const DEFAULT_BUDGET_ITEM_LIMIT: usize = 3;

/// Destination city that International orders are never shipped to.
pub const UNSHIPPABLE_CITY: &str = "Nowhere";
