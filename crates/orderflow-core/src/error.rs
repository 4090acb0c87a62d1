//! # Error Types
//!
//! Domain-specific error types for orderflow-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  orderflow-core errors (this file)                                     │
//! │  ├── ValidationError  - Order rejected before pricing                  │
//! │  ├── PricingError     - Order or card tag has no registered strategy   │
//! │  └── CoreError        - Umbrella over both                             │
//! │                                                                         │
//! │  orderflow-pipeline errors (separate crate)                            │
//! │  ├── RepositoryError  - Backing store failures (passed through)        │
//! │  ├── NotificationError- Per-channel failures (logged, not escalated)   │
//! │  └── ProcessError     - Stage-tagged wrapper returned by the processor │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

// =============================================================================
// Validation Error
// =============================================================================

/// Reasons an order is rejected by validation.
///
/// Variants are listed in the order the validator checks them; the first
/// failing check wins.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("order must have at least one item")]
    EmptyOrder,

    #[error("destination city is required")]
    MissingDestination,

    #[error("customer contact is required")]
    MissingContact,

    #[error("budget orders cannot have more than {max} items (got {count})")]
    BudgetItemLimitExceeded { count: usize, max: usize },

    #[error("cannot ship internationally to {city}")]
    UnshippableDestination { city: String },
}

// =============================================================================
// Pricing Error
// =============================================================================

/// The order could not be priced.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PricingError {
    #[error("unknown order type: {0}")]
    UnknownOrderKind(String),

    #[error("unknown discount card type: {0}")]
    UnknownDiscountCardKind(String),

    /// A subtotal or modified amount does not fit in i64 cents.
    #[error("order amount exceeds the representable range")]
    AmountOverflow,
}

// =============================================================================
// Core Error
// =============================================================================

/// Any failure raised by the pure core.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("Pricing error: {0}")]
    Pricing(#[from] PricingError),
}

// =============================================================================
// Result Type Aliases
// =============================================================================

pub type ValidationResult<T> = Result<T, ValidationError>;

pub type PricingResult<T> = Result<T, PricingError>;

pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
