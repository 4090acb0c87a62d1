//! # Pricing Strategies
//!
//! Two independent strategy families turn a subtotal into a modified subtotal:
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  DiscountStrategy (by card tag)     OrderKindStrategy (by order tag)    │
//! │  ───────────────────────────────    ─────────────────────────────────   │
//! │  Gold    ×0.85                      Standard       ×1.20                │
//! │  Silver  ×0.90                      Premium        ×0.90 then ×1.20     │
//! │  Newbie  ×1.00                      Budget         ×1.00                │
//! │  NoCard  ×1.00 (no card on order)   International  ×1.50                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Both families live in a [`StrategyRegistry`] keyed by tag, so new order
//! kinds or cards can be registered at runtime without touching the
//! existing variants.

use dashmap::DashMap;
use std::sync::Arc;

use crate::error::{PricingError, PricingResult};
use crate::money::{Modifier, Money};

// =============================================================================
// Strategy Traits
// =============================================================================

/// Applies the surcharge/tax rule of one order kind.
pub trait OrderKindStrategy: Send + Sync {
    fn apply_modifiers(&self, subtotal: Money) -> PricingResult<Money>;
}

/// Applies the pre-tax reduction of one discount card.
pub trait DiscountStrategy: Send + Sync {
    fn apply_discount(&self, subtotal: Money) -> PricingResult<Money>;
}

/// One rounded modifier step; overflow becomes `AmountOverflow`.
pub fn scale(amount: Money, modifier: Modifier) -> PricingResult<Money> {
    amount
        .checked_apply(modifier)
        .ok_or(PricingError::AmountOverflow)
}

const TAX: Modifier = Modifier::from_bps(12_000);
const PREMIUM_DISCOUNT: Modifier = Modifier::from_bps(9_000);
const INTERNATIONAL_SURCHARGE: Modifier = Modifier::from_bps(15_000);
const GOLD_DISCOUNT: Modifier = Modifier::from_bps(8_500);
const SILVER_DISCOUNT: Modifier = Modifier::from_bps(9_000);

// =============================================================================
// Order Kind Strategies
// =============================================================================

/// +20% tax.
#[derive(Debug, Clone, Copy, Default)]
pub struct StandardPricing;

impl OrderKindStrategy for StandardPricing {
    fn apply_modifiers(&self, subtotal: Money) -> PricingResult<Money> {
        scale(subtotal, TAX)
    }
}

/// 10% discount first, then +20% tax (net ×1.08, rounded per step).
#[derive(Debug, Clone, Copy, Default)]
pub struct PremiumPricing;

impl OrderKindStrategy for PremiumPricing {
    fn apply_modifiers(&self, subtotal: Money) -> PricingResult<Money> {
        scale(scale(subtotal, PREMIUM_DISCOUNT)?, TAX)
    }
}

/// Tax free.
#[derive(Debug, Clone, Copy, Default)]
pub struct BudgetPricing;

impl OrderKindStrategy for BudgetPricing {
    fn apply_modifiers(&self, subtotal: Money) -> PricingResult<Money> {
        Ok(subtotal)
    }
}

/// +50% for international shipping and customs.
#[derive(Debug, Clone, Copy, Default)]
pub struct InternationalPricing;

impl OrderKindStrategy for InternationalPricing {
    fn apply_modifiers(&self, subtotal: Money) -> PricingResult<Money> {
        scale(subtotal, INTERNATIONAL_SURCHARGE)
    }
}

// =============================================================================
// Discount Card Strategies
// =============================================================================

/// 15% off.
#[derive(Debug, Clone, Copy, Default)]
pub struct GoldCard;

impl DiscountStrategy for GoldCard {
    fn apply_discount(&self, subtotal: Money) -> PricingResult<Money> {
        scale(subtotal, GOLD_DISCOUNT)
    }
}

/// 10% off.
#[derive(Debug, Clone, Copy, Default)]
pub struct SilverCard;

impl DiscountStrategy for SilverCard {
    fn apply_discount(&self, subtotal: Money) -> PricingResult<Money> {
        scale(subtotal, SILVER_DISCOUNT)
    }
}

/// Entry-level card, no reduction.
#[derive(Debug, Clone, Copy, Default)]
pub struct NewbieCard;

impl DiscountStrategy for NewbieCard {
    fn apply_discount(&self, subtotal: Money) -> PricingResult<Money> {
        Ok(subtotal)
    }
}

/// Used when the order carries no card at all. Not registered under a tag.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoCard;

impl DiscountStrategy for NoCard {
    fn apply_discount(&self, subtotal: Money) -> PricingResult<Money> {
        Ok(subtotal)
    }
}

// =============================================================================
// Fixed Rate
// =============================================================================

/// A single-modifier strategy usable in either family.
///
/// Lets callers register a new tag without writing a type:
/// ```rust
/// use std::sync::Arc;
/// use orderflow_core::money::Modifier;
/// use orderflow_core::pricing::FixedRate;
/// use orderflow_core::calculator::SmartPriceCalculator;
///
/// let calculator = SmartPriceCalculator::new();
/// calculator.register_order_strategy("Express", Arc::new(FixedRate::new(Modifier::from_bps(13_000))));
/// calculator.register_discount_strategy("Platinum", Arc::new(FixedRate::new(Modifier::from_bps(8_000))));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedRate {
    modifier: Modifier,
}

impl FixedRate {
    pub const fn new(modifier: Modifier) -> Self {
        FixedRate { modifier }
    }

    pub fn modifier(&self) -> Modifier {
        self.modifier
    }
}

impl OrderKindStrategy for FixedRate {
    fn apply_modifiers(&self, subtotal: Money) -> PricingResult<Money> {
        scale(subtotal, self.modifier)
    }
}

impl DiscountStrategy for FixedRate {
    fn apply_discount(&self, subtotal: Money) -> PricingResult<Money> {
        scale(subtotal, self.modifier)
    }
}

// =============================================================================
// Strategy Registry
// =============================================================================

/// Tag → strategy map that accepts registrations through a shared reference.
pub struct StrategyRegistry<S: ?Sized> {
    entries: DashMap<String, Arc<S>>,
}

impl<S: ?Sized + Send + Sync> StrategyRegistry<S> {
    pub fn new() -> Self {
        StrategyRegistry {
            entries: DashMap::new(),
        }
    }

    /// Registers `strategy` under `tag`, returning the strategy it replaced.
    pub fn register(&self, tag: impl Into<String>, strategy: Arc<S>) -> Option<Arc<S>> {
        self.entries.insert(tag.into(), strategy)
    }

    /// Looks up a strategy. The returned `Arc` outlives the map guard.
    pub fn get(&self, tag: &str) -> Option<Arc<S>> {
        self.entries.get(tag).map(|entry| Arc::clone(entry.value()))
    }

    pub fn contains(&self, tag: &str) -> bool {
        self.entries.contains_key(tag)
    }

    /// Registered tags, sorted.
    pub fn tags(&self) -> Vec<String> {
        let mut tags: Vec<String> = self.entries.iter().map(|e| e.key().clone()).collect();
        tags.sort();
        tags
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<S: ?Sized + Send + Sync> Default for StrategyRegistry<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: ?Sized> std::fmt::Debug for StrategyRegistry<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut tags: Vec<String> = self.entries.iter().map(|e| e.key().clone()).collect();
        tags.sort();
        f.debug_struct("StrategyRegistry").field("tags", &tags).finish()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    const HUNDRED: Money = Money::from_cents(10_000);

    #[test]
    fn test_order_kind_modifiers() {
        assert_eq!(StandardPricing.apply_modifiers(HUNDRED).unwrap().cents(), 12_000);
        assert_eq!(PremiumPricing.apply_modifiers(HUNDRED).unwrap().cents(), 10_800);
        assert_eq!(BudgetPricing.apply_modifiers(HUNDRED).unwrap().cents(), 10_000);
        assert_eq!(InternationalPricing.apply_modifiers(HUNDRED).unwrap().cents(), 15_000);
    }

    #[test]
    fn test_premium_rounds_after_each_step() {
        // 15 × 0.9 = 13.5 → 14, 14 × 1.2 = 16.8 → 17
        // (a single ×1.08 would give 16.2 → 16)
        assert_eq!(PremiumPricing.apply_modifiers(Money::from_cents(15)).unwrap().cents(), 17);
    }

    #[test]
    fn test_discount_modifiers() {
        assert_eq!(GoldCard.apply_discount(HUNDRED).unwrap().cents(), 8_500);
        assert_eq!(SilverCard.apply_discount(HUNDRED).unwrap().cents(), 9_000);
        assert_eq!(NewbieCard.apply_discount(HUNDRED).unwrap().cents(), 10_000);
        assert_eq!(NoCard.apply_discount(HUNDRED).unwrap().cents(), 10_000);
    }

    #[test]
    fn test_registry_register_and_replace() {
        let registry: StrategyRegistry<dyn OrderKindStrategy> = StrategyRegistry::new();
        assert!(registry.is_empty());

        assert!(registry
            .register("Standard", Arc::new(StandardPricing))
            .is_none());
        let replaced = registry.register("Standard", Arc::new(BudgetPricing));
        assert!(replaced.is_some());
        assert_eq!(registry.len(), 1);

        let strategy = registry.get("Standard").unwrap();
        assert_eq!(strategy.apply_modifiers(HUNDRED), Ok(HUNDRED));
        assert!(registry.get("standard").is_none());
    }

    #[test]
    fn test_registry_tags_sorted() {
        let registry: StrategyRegistry<dyn DiscountStrategy> = StrategyRegistry::new();
        registry.register("Silver", Arc::new(SilverCard));
        registry.register("Gold", Arc::new(GoldCard));
        assert_eq!(registry.tags(), vec!["Gold".to_string(), "Silver".to_string()]);
        assert!(registry.contains("Gold"));
    }

    #[test]
    fn test_fixed_rate_in_both_families() {
        let rate = FixedRate::new(Modifier::from_bps(13_000));
        assert_eq!(OrderKindStrategy::apply_modifiers(&rate, HUNDRED).unwrap().cents(), 13_000);
        assert_eq!(DiscountStrategy::apply_discount(&rate, HUNDRED).unwrap().cents(), 13_000);
    }

    #[test]
    fn test_surcharge_overflow_is_an_error() {
        let big = Money::from_cents(i64::MAX / 4 * 3);
        assert_eq!(
            InternationalPricing.apply_modifiers(big),
            Err(PricingError::AmountOverflow)
        );
        assert_eq!(
            StandardPricing.apply_modifiers(Money::from_cents(i64::MAX)),
            Err(PricingError::AmountOverflow)
        );
        // Reductions and the tax-free kind always fit.
        assert!(GoldCard.apply_discount(big).is_ok());
        assert_eq!(BudgetPricing.apply_modifiers(big), Ok(big));
    }
}
