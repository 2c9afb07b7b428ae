//! # Domain Types
//!
//! Core domain types used throughout Tillpoint.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Product      │   │      Stock      │   │      Sale       │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id (UUID)      │1:1│  product_id     │   │  id (UUID)      │       │
//! │  │  sku (business) │◄──│  quantity (×100)│   │  receipt_number │       │
//! │  │  name           │   │  updated_at     │   │  totals (cents) │       │
//! │  │  price_cents    │   └─────────────────┘   └────────┬────────┘       │
//! │  └─────────────────┘                                  │ 1:N            │
//! │                                                       ▼                │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │   Attendant     │   │ PaymentMethod   │   │    SaleItem     │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  username       │   │  Cash           │   │  product_id     │       │
//! │  │  display_name?  │   │  Card           │   │  quantity (×100)│       │
//! │  └─────────────────┘   │  Transfer       │   │  totals (cents) │       │
//! │                        └─────────────────┘   └─────────────────┘       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Dual-Key Identity Pattern
//! Every entity has:
//! - `id`: UUID v4 - immutable, used for database relations
//! - Business ID where applicable: (sku, receipt_number, username)

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::money::{Money, Quantity};

// =============================================================================
// Payment Method
// =============================================================================

/// How a sale was paid. Closed enumeration; requests are matched
/// case-insensitively against the canonical lowercase spellings.
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "lowercase"))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentMethod {
    /// Physical cash payment.
    Cash,
    /// Card payment on an external terminal.
    Card,
    /// Bank transfer / mobile money.
    Transfer,
}

impl PaymentMethod {
    /// Parses a payment method tag, case-insensitively.
    ///
    /// ## Example
    /// ```rust
    /// use tillpoint_core::types::PaymentMethod;
    ///
    /// assert_eq!(PaymentMethod::from_tag("cash"), Some(PaymentMethod::Cash));
    /// assert_eq!(PaymentMethod::from_tag("CARD"), Some(PaymentMethod::Card));
    /// assert_eq!(PaymentMethod::from_tag("barter"), None);
    /// ```
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag.to_ascii_lowercase().as_str() {
            "cash" => Some(PaymentMethod::Cash),
            "card" => Some(PaymentMethod::Card),
            "transfer" => Some(PaymentMethod::Transfer),
            _ => None,
        }
    }

    /// Canonical spelling, as stored and rendered.
    pub const fn as_str(&self) -> &'static str {
        match self {
            PaymentMethod::Cash => "cash",
            PaymentMethod::Card => "card",
            PaymentMethod::Transfer => "transfer",
        }
    }
}

// =============================================================================
// Product
// =============================================================================

/// A product available for sale. Created by catalog management,
/// referenced immutably by sales.
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    /// Unique identifier (UUID v4).
    pub id: String,

    /// Display name shown on receipts and listings.
    pub name: String,

    /// Stock Keeping Unit - business identifier. Unique when non-empty;
    /// the empty string means "no SKU".
    pub sku: String,

    /// Catalog unit price in cents.
    pub price_cents: i64,

    /// Unit cost in cents (for margin reporting outside this core).
    pub cost_cents: i64,

    /// When the product was created.
    pub created_at: DateTime<Utc>,

    /// When the product was last updated.
    pub updated_at: DateTime<Utc>,
}

impl Product {
    /// Returns the catalog price as a Money type.
    #[inline]
    pub fn price(&self) -> Money {
        Money::from_cents(self.price_cents)
    }
}

// =============================================================================
// Stock
// =============================================================================

/// Stock on hand for one product (1:1).
///
/// Quantity is stored in hundredths of a unit to support fractional sales
/// (weighed goods). Invariant: never negative at any committed state; the
/// transaction coordinator is the sole mutator on the sale path.
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Stock {
    pub product_id: String,
    pub quantity_hundredths: i64,
    pub updated_at: DateTime<Utc>,
}

impl Stock {
    /// Returns the quantity on hand as a Quantity.
    #[inline]
    pub fn quantity(&self) -> Quantity {
        Quantity::from_hundredths(self.quantity_hundredths)
    }
}

// =============================================================================
// Sale
// =============================================================================

/// A committed sale transaction. Created exactly once, atomically with its
/// items; never updated or deleted.
///
/// Invariants: `total = subtotal - discount`, `discount <= subtotal`,
/// `subtotal = Σ item.line_total` - all in exact integer cents.
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Sale {
    pub id: String,
    /// Human-facing receipt label, unique across all sales.
    pub receipt_number: String,
    /// The user who recorded the sale. No referential constraint: the sale
    /// outlives its attendant's user record.
    pub attendant_id: String,
    pub payment_method: PaymentMethod,
    pub subtotal_cents: i64,
    pub discount_cents: i64,
    pub total_cents: i64,
    pub created_at: DateTime<Utc>,
}

impl Sale {
    #[inline]
    pub fn subtotal(&self) -> Money {
        Money::from_cents(self.subtotal_cents)
    }

    #[inline]
    pub fn discount(&self) -> Money {
        Money::from_cents(self.discount_cents)
    }

    #[inline]
    pub fn total(&self) -> Money {
        Money::from_cents(self.total_cents)
    }
}

// =============================================================================
// Sale Item
// =============================================================================

/// A line item in a sale. Belongs to exactly one sale (cascade lifecycle);
/// immutable after creation.
///
/// Invariant: `line_total = round(unit_price × quantity)` under minor-unit
/// rounding.
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SaleItem {
    pub id: String,
    pub sale_id: String,
    /// Historical product reference; the product row may be deleted later.
    pub product_id: String,
    pub quantity_hundredths: i64,
    /// Unit price actually charged (override or catalog) in cents.
    pub unit_price_cents: i64,
    pub line_total_cents: i64,
    pub created_at: DateTime<Utc>,
}

impl SaleItem {
    /// Returns the unit price actually charged.
    #[inline]
    pub fn unit_price(&self) -> Money {
        Money::from_cents(self.unit_price_cents)
    }

    /// Returns the line total.
    #[inline]
    pub fn line_total(&self) -> Money {
        Money::from_cents(self.line_total_cents)
    }

    /// Returns the quantity sold.
    #[inline]
    pub fn quantity(&self) -> Quantity {
        Quantity::from_hundredths(self.quantity_hundredths)
    }
}

// =============================================================================
// Attendant
// =============================================================================

/// A user who records sales. Rendered on receipts through the
/// display-name → username → "Walk-in customer" fallback chain.
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Attendant {
    pub id: String,
    pub username: String,
    pub display_name: Option<String>,
    pub created_at: DateTime<Utc>,
}

// =============================================================================
// Unit Tests
// =============================================================================
