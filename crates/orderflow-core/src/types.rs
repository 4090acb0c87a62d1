//! # Domain Types
//!
//! Core domain types used throughout Orderflow.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │     Order       │   │      Item       │   │    Address      │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id (external)  │──►│  id             │   │  city           │       │
//! │  │  items          │   │  name           │   │  street         │       │
//! │  │  kind           │   │  unit_price     │   │  postal_code    │       │
//! │  │  contact        │   └─────────────────┘   └─────────────────┘       │
//! │  │  destination    │                                                    │
//! │  │  discount_card  │   ┌─────────────────┐   ┌─────────────────┐       │
//! │  └─────────────────┘   │   OrderKind     │   │    CardKind     │       │
//! │                        │  Standard       │   │  Gold           │       │
//! │  ┌─────────────────┐   │  Premium        │   │  Silver         │       │
//! │  │  OrderSummary   │   │  Budget         │   │  Newbie         │       │
//! │  │  (derived)      │   │  International  │   │  Custom(tag)    │       │
//! │  └─────────────────┘   │  Custom(tag)    │   └─────────────────┘       │
//! │                        └─────────────────┘                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Tags
//! `OrderKind` and `CardKind` are keyed by their string tag in the pricing
//! registries. Unknown tags parse into `Custom` so a caller can register a
//! strategy for them later; the calculator rejects tags nobody registered.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::money::Money;

// =============================================================================
// Order Kind
// =============================================================================

/// The order type tag selecting which surcharge/tax modifier applies.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum OrderKind {
    /// +20% tax.
    Standard,
    /// 10% discount, then +20% tax.
    Premium,
    /// No tax. Limited item count.
    Budget,
    /// +50% shipping and customs.
    International,
    /// A kind registered at runtime.
    Custom(String),
}

impl OrderKind {
    /// Returns the registry tag for this kind.
    pub fn tag(&self) -> &str {
        match self {
            OrderKind::Standard => "Standard",
            OrderKind::Premium => "Premium",
            OrderKind::Budget => "Budget",
            OrderKind::International => "International",
            OrderKind::Custom(tag) => tag,
        }
    }
}

impl fmt::Display for OrderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl From<&str> for OrderKind {
    fn from(tag: &str) -> Self {
        match tag {
            "Standard" => OrderKind::Standard,
            "Premium" => OrderKind::Premium,
            "Budget" => OrderKind::Budget,
            "International" => OrderKind::International,
            other => OrderKind::Custom(other.to_string()),
        }
    }
}

impl From<String> for OrderKind {
    fn from(tag: String) -> Self {
        OrderKind::from(tag.as_str())
    }
}

impl From<OrderKind> for String {
    fn from(kind: OrderKind) -> Self {
        kind.tag().to_string()
    }
}

impl FromStr for OrderKind {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(OrderKind::from(s))
    }
}

// =============================================================================
// Discount Card
// =============================================================================

/// The discount card tag selecting a pre-tax reduction.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum CardKind {
    /// 15% off.
    Gold,
    /// 10% off.
    Silver,
    /// No reduction (entry-level card).
    Newbie,
    /// A card registered at runtime.
    Custom(String),
}

impl CardKind {
    /// Returns the registry tag for this card.
    pub fn tag(&self) -> &str {
        match self {
            CardKind::Gold => "Gold",
            CardKind::Silver => "Silver",
            CardKind::Newbie => "Newbie",
            CardKind::Custom(tag) => tag,
        }
    }
}

impl fmt::Display for CardKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl From<&str> for CardKind {
    fn from(tag: &str) -> Self {
        match tag {
            "Gold" => CardKind::Gold,
            "Silver" => CardKind::Silver,
            "Newbie" => CardKind::Newbie,
            other => CardKind::Custom(other.to_string()),
        }
    }
}

impl From<String> for CardKind {
    fn from(tag: String) -> Self {
        CardKind::from(tag.as_str())
    }
}

impl From<CardKind> for String {
    fn from(kind: CardKind) -> Self {
        kind.tag().to_string()
    }
}

impl FromStr for CardKind {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(CardKind::from(s))
    }
}

/// A customer's discount card. Absence on an order means "no card".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiscountCard {
    pub kind: CardKind,
}

impl DiscountCard {
    pub fn new(kind: impl Into<CardKind>) -> Self {
        DiscountCard { kind: kind.into() }
    }
}

// =============================================================================
// Item & Address
// =============================================================================

/// A line item in an order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub id: String,
    pub name: String,
    /// Unit price in cents. Expected non-negative.
    pub unit_price: Money,
}

impl Item {
    pub fn new(id: impl Into<String>, name: impl Into<String>, unit_price: Money) -> Self {
        Item {
            id: id.into(),
            name: name.into(),
            unit_price,
        }
    }
}

/// Destination address. Only `city` is checked by validation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Address {
    pub city: String,
    pub street: String,
    pub postal_code: String,
}

impl Address {
    pub fn new(
        city: impl Into<String>,
        street: impl Into<String>,
        postal_code: impl Into<String>,
    ) -> Self {
        Address {
            city: city.into(),
            street: street.into(),
            postal_code: postal_code.into(),
        }
    }

    /// An address where only the city is known.
    pub fn in_city(city: impl Into<String>) -> Self {
        Address {
            city: city.into(),
            ..Default::default()
        }
    }
}

// =============================================================================
// Order
// =============================================================================

/// A customer order.
///
/// Built fully formed by the caller and never mutated by the pipeline.
/// `id` is the sole key of the repository's at-most-once guarantee.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    pub id: String,
    pub items: Vec<Item>,
    pub kind: OrderKind,
    /// Customer contact (e-mail address), used as a notification recipient.
    pub contact: String,
    pub destination: Address,
    pub discount_card: Option<DiscountCard>,
}

impl Order {
    /// Creates an order with no items and no discount card.
    pub fn new(
        id: impl Into<String>,
        kind: impl Into<OrderKind>,
        contact: impl Into<String>,
        destination: Address,
    ) -> Self {
        Order {
            id: id.into(),
            items: Vec::new(),
            kind: kind.into(),
            contact: contact.into(),
            destination,
            discount_card: None,
        }
    }

    pub fn with_item(mut self, item: Item) -> Self {
        self.items.push(item);
        self
    }

    pub fn with_items(mut self, items: impl IntoIterator<Item = Item>) -> Self {
        self.items.extend(items);
        self
    }

    pub fn with_card(mut self, kind: impl Into<CardKind>) -> Self {
        self.discount_card = Some(DiscountCard::new(kind));
        self
    }

    /// Sum of all item prices, before any modifier. `None` on overflow.
    pub fn subtotal(&self) -> Option<Money> {
        self.items
            .iter()
            .try_fold(Money::zero(), |acc, item| acc.checked_add(item.unit_price))
    }

    #[inline]
    pub fn item_count(&self) -> usize {
        self.items.len()
    }
}

// =============================================================================
// Order Summary
// =============================================================================

/// Result of pricing an order, handed to the notification stage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderSummary {
    pub order_id: String,
    pub total: Money,
    pub processed_at: DateTime<Utc>,
}

impl OrderSummary {
    pub fn new(order_id: impl Into<String>, total: Money) -> Self {
        OrderSummary {
            order_id: order_id.into(),
            total,
            processed_at: Utc::now(),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
