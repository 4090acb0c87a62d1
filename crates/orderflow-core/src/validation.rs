//! # Validation Module
//!
//! Rejects malformed orders before any pricing or side effect happens.
//!
//! ## Check Order
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  validate(order)                                                        │
//! │       │                                                                 │
//! │       ├── items empty?                     → EmptyOrder                 │
//! │       ├── destination.city empty?          → MissingDestination         │
//! │       ├── contact empty?                   → MissingContact             │
//! │       ├── Budget && items > limit?         → BudgetItemLimitExceeded    │
//! │       ├── International && city==sentinel? → UnshippableDestination     │
//! │       │                                                                 │
//! │       └── OK → pricing                                                  │
//! │                                                                         │
//! │  First failure wins. Prices and cards are NOT checked here; unknown     │
//! │  tags are the calculator's job.                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use orderflow_core::validation::{BasicOrderValidator, OrderValidator};
//! use orderflow_core::{Address, Item, Money, Order, ValidationError};
//!
//! let validator = BasicOrderValidator::new();
//! let order = Order::new("ORD-1", "Standard", "a@b.com", Address::in_city("Oslo"));
//! assert_eq!(validator.validate(&order), Err(ValidationError::EmptyOrder));
//!
//! let order = order.with_item(Item::new("1", "Mouse", Money::from_cents(5000)));
//! assert!(validator.validate(&order).is_ok());
//! ```

use serde::{Deserialize, Serialize};

use crate::error::{ValidationError, ValidationResult};
use crate::types::{Order, OrderKind};
use crate::{DEFAULT_BUDGET_ITEM_LIMIT, UNSHIPPABLE_CITY};

// =============================================================================
// Validation Rules
// =============================================================================

/// Tunable limits used by [`BasicOrderValidator`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationRules {
    /// Maximum number of items in a Budget order.
    #[serde(default = "default_budget_item_limit")]
    pub budget_item_limit: usize,

    /// City that International orders cannot ship to.
    #[serde(default = "default_unshippable_city")]
    pub unshippable_city: String,
}

fn default_budget_item_limit() -> usize {
    DEFAULT_BUDGET_ITEM_LIMIT
}

fn default_unshippable_city() -> String {
    UNSHIPPABLE_CITY.to_string()
}

impl Default for ValidationRules {
    fn default() -> Self {
        ValidationRules {
            budget_item_limit: default_budget_item_limit(),
            unshippable_city: default_unshippable_city(),
        }
    }
}

// =============================================================================
// Validator
// =============================================================================

/// Contract for the validation stage.
pub trait OrderValidator: Send + Sync {
    fn validate(&self, order: &Order) -> ValidationResult<()>;
}

/// Shallow structural and business-rule validation.
#[derive(Debug, Clone, Default)]
pub struct BasicOrderValidator {
    rules: ValidationRules,
}

impl BasicOrderValidator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_rules(rules: ValidationRules) -> Self {
        BasicOrderValidator { rules }
    }

    pub fn rules(&self) -> &ValidationRules {
        &self.rules
    }
}

impl OrderValidator for BasicOrderValidator {
    fn validate(&self, order: &Order) -> ValidationResult<()> {
        if order.items.is_empty() {
            return Err(ValidationError::EmptyOrder);
        }

        if order.destination.city.is_empty() {
            return Err(ValidationError::MissingDestination);
        }

        // The contact doubles as the confirmation recipient.
        if order.contact.is_empty() {
            return Err(ValidationError::MissingContact);
        }

        if order.kind == OrderKind::Budget && order.item_count() > self.rules.budget_item_limit {
            return Err(ValidationError::BudgetItemLimitExceeded {
                count: order.item_count(),
                max: self.rules.budget_item_limit,
            });
        }

        if order.kind == OrderKind::International
            && order.destination.city == self.rules.unshippable_city
        {
            return Err(ValidationError::UnshippableDestination {
                city: order.destination.city.clone(),
            });
        }

        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
