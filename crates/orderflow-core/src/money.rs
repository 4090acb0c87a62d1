//! # Money Module
//!
//! Provides the `Money` type for order amounts and the `Modifier` type for
//! the multiplicative pricing rules applied to them.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  1500.00 × 0.85 × 0.9 × 1.2 in f64 = 1376.9999999999998                 │
//! │                                                                         │
//! │  OUR SOLUTION: Integer Cents + Basis-Point Modifiers                    │
//! │    150000 × 8500 / 10000  = 127500                                      │
//! │    127500 × 9000 / 10000  = 114750                                      │
//! │    114750 × 12000 / 10000 = 137700  → $1377.00 exactly                  │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use orderflow_core::money::{Modifier, Money};
//!
//! let subtotal = Money::from_major_minor(1500, 0);
//! let discounted = subtotal.checked_apply(Modifier::from_bps(8500)); // Gold card
//! assert_eq!(discounted, Some(Money::from_cents(127_500)));
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value in the smallest currency unit (cents).
///
/// ## Where Money Flows
/// ```text
/// Item.unit_price ──► subtotal ──► discount ──► order-kind modifier ──► total
///                                                                        │
///                           OrderSummary.total ◄─────────────────────────┘
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from cents.
    ///
    /// ## Example
    /// ```rust
    /// use orderflow_core::money::Money;
    ///
    /// let price = Money::from_cents(5000); // $50.00
    /// assert_eq!(price.cents(), 5000);
    /// ```
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Creates a Money value from whole dollars and cents.
    ///
    /// ## Example
    /// ```rust
    /// use orderflow_core::money::Money;
    ///
    /// assert_eq!(Money::from_major_minor(1500, 0).cents(), 150_000);
    /// assert_eq!(Money::from_major_minor(8, 99).cents(), 899);
    /// ```
    #[inline]
    pub const fn from_major_minor(major: i64, minor: i64) -> Self {
        if major < 0 {
            Money(major * 100 - minor)
        } else {
            Money(major * 100 + minor)
        }
    }

    /// Returns the value in cents.
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Returns the whole-dollar portion.
    #[inline]
    pub const fn dollars(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the cents portion (always 0-99).
    #[inline]
    pub const fn cents_part(&self) -> i64 {
        (self.0 % 100).abs()
    }

    /// Returns zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Adds two amounts, returning `None` on overflow.
    ///
    /// ## Example
    /// ```rust
    /// use orderflow_core::money::Money;
    ///
    /// let total = Money::from_cents(1000).checked_add(Money::from_cents(250));
    /// assert_eq!(total, Some(Money::from_cents(1250)));
    /// assert_eq!(Money::from_cents(i64::MAX).checked_add(Money::from_cents(1)), None);
    /// ```
    #[inline]
    pub const fn checked_add(self, other: Money) -> Option<Money> {
        match self.0.checked_add(other.0) {
            Some(cents) => Some(Money(cents)),
            None => None,
        }
    }

    /// Multiplies this amount by a modifier, rounding to the nearest cent.
    ///
    /// Halves round away from zero: `(cents × bps ± 5000) / 10000`.
    /// Intermediate math runs in i128; `None` if the result does not fit
    /// back into i64 cents.
    ///
    /// ## Example
    /// ```rust
    /// use orderflow_core::money::{Modifier, Money};
    ///
    /// let subtotal = Money::from_cents(1000);                     // $10.00
    /// let taxed = subtotal.checked_apply(Modifier::from_bps(12000)); // ×1.20
    /// assert_eq!(taxed, Some(Money::from_cents(1200)));
    ///
    /// // $0.05 × 0.90 = $0.045 → $0.05
    /// let tiny = Money::from_cents(5).checked_apply(Modifier::from_bps(9000));
    /// assert_eq!(tiny, Some(Money::from_cents(5)));
    /// ```
    pub fn checked_apply(&self, modifier: Modifier) -> Option<Money> {
        let scaled = self.0 as i128 * modifier.bps() as i128;
        let half = if scaled < 0 { -5000 } else { 5000 };
        i64::try_from((scaled + half) / 10_000).ok().map(Money)
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(f, "{}${}.{:02}", sign, self.dollars().abs(), self.cents_part())
    }
}

impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

// =============================================================================
// Modifier
// =============================================================================

/// A multiplicative price modifier in basis points of the original amount.
///
/// ## Reading Basis Points
/// ```text
/// 10000 bps = ×1.00 (identity)
/// 12000 bps = ×1.20 (+20% tax)
///  8500 bps = ×0.85 (15% off)
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Modifier(u32);

impl Modifier {
    /// The identity modifier (×1.00).
    pub const IDENTITY: Modifier = Modifier(10_000);

    #[inline]
    pub const fn from_bps(bps: u32) -> Self {
        Modifier(bps)
    }

    #[inline]
    pub const fn bps(&self) -> u32 {
        self.0
    }
}

impl Default for Modifier {
    fn default() -> Self {
        Modifier::IDENTITY
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
