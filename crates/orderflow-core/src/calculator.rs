//! # Price Calculator
//!
//! Turns an order into its final total.
//!
//! ## Algorithm
//! ```text
//! subtotal = Σ item.unit_price ──overflow──► AmountOverflow
//!      │
//!      ▼
//! card present? ──yes──► discount registry[card tag] ──missing──► UnknownDiscountCardKind
//!      │ no                         │
//!      ▼                            ▼
//!   NoCard                apply_discount(subtotal)
//!      │                            │
//!      └──────────────┬─────────────┘
//!                     ▼
//!       order registry[order tag] ──missing──► UnknownOrderKind
//!                     │
//!                     ▼
//!        total = apply_modifiers(discounted)
//! ```
//!
//! Every rounded step is checked; a result outside i64 cents fails with
//! `AmountOverflow` instead of wrapping.
//!
//! The discount is always applied BEFORE the order-kind modifier. Reversing
//! the steps changes the rounding and therefore the result.

use std::sync::Arc;

use tracing::debug;

use crate::error::{PricingError, PricingResult};
use crate::money::Money;
use crate::pricing::{
    BudgetPricing, DiscountStrategy, GoldCard, InternationalPricing, NewbieCard, NoCard,
    OrderKindStrategy, PremiumPricing, SilverCard, StandardPricing, StrategyRegistry,
};
use crate::types::Order;

/// Contract for the pricing stage.
pub trait PriceCalculator: Send + Sync {
    fn calculate(&self, order: &Order) -> PricingResult<Money>;
}

/// Strategy-driven calculator with runtime-extensible registries.
#[derive(Debug)]
pub struct SmartPriceCalculator {
    order_strategies: StrategyRegistry<dyn OrderKindStrategy>,
    discount_strategies: StrategyRegistry<dyn DiscountStrategy>,
}

impl SmartPriceCalculator {
    /// Creates a calculator with the built-in order kinds and cards.
    pub fn new() -> Self {
        let calculator = Self::empty();

        calculator.register_order_strategy("Standard", Arc::new(StandardPricing));
        calculator.register_order_strategy("Premium", Arc::new(PremiumPricing));
        calculator.register_order_strategy("Budget", Arc::new(BudgetPricing));
        calculator.register_order_strategy("International", Arc::new(InternationalPricing));

        calculator.register_discount_strategy("Gold", Arc::new(GoldCard));
        calculator.register_discount_strategy("Silver", Arc::new(SilverCard));
        calculator.register_discount_strategy("Newbie", Arc::new(NewbieCard));

        calculator
    }

    /// Creates a calculator with nothing registered.
    pub fn empty() -> Self {
        SmartPriceCalculator {
            order_strategies: StrategyRegistry::new(),
            discount_strategies: StrategyRegistry::new(),
        }
    }

    /// Adds or replaces the strategy for an order kind tag.
    pub fn register_order_strategy(
        &self,
        tag: impl Into<String>,
        strategy: Arc<dyn OrderKindStrategy>,
    ) {
        let tag = tag.into();
        debug!(tag = %tag, "Registering order strategy");
        self.order_strategies.register(tag, strategy);
    }

    /// Adds or replaces the strategy for a discount card tag.
    pub fn register_discount_strategy(
        &self,
        tag: impl Into<String>,
        strategy: Arc<dyn DiscountStrategy>,
    ) {
        let tag = tag.into();
        debug!(tag = %tag, "Registering discount strategy");
        self.discount_strategies.register(tag, strategy);
    }

    pub fn order_kinds(&self) -> Vec<String> {
        self.order_strategies.tags()
    }

    pub fn card_kinds(&self) -> Vec<String> {
        self.discount_strategies.tags()
    }
}

impl Default for SmartPriceCalculator {
    fn default() -> Self {
        Self::new()
    }
}

impl PriceCalculator for SmartPriceCalculator {
    fn calculate(&self, order: &Order) -> PricingResult<Money> {
        let mut subtotal = order.subtotal().ok_or(PricingError::AmountOverflow)?;

        match &order.discount_card {
            Some(card) => {
                let tag = card.kind.tag();
                let strategy = self
                    .discount_strategies
                    .get(tag)
                    .ok_or_else(|| PricingError::UnknownDiscountCardKind(tag.to_string()))?;
                subtotal = strategy.apply_discount(subtotal)?;
                debug!(order_id = %order.id, card = %tag, subtotal = %subtotal, "Applied card discount");
            }
            None => subtotal = NoCard.apply_discount(subtotal)?,
        }

        let tag = order.kind.tag();
        let strategy = self
            .order_strategies
            .get(tag)
            .ok_or_else(|| PricingError::UnknownOrderKind(tag.to_string()))?;

        strategy.apply_modifiers(subtotal)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
