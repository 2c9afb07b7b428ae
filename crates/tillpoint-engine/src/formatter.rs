//! # Sale Formatter
//!
//! Turns persisted sales into the wire shape clients render. Pure and
//! infallible: integer cents and hundredths convert back to decimals at this
//! edge and nowhere else.
//!
//! Attendant rendering walks a fallback chain: display name if the user set
//! one, else username, else "Walk-in customer" when the user record is gone.
//! Product summaries are nullable for the same reason: a sale outlives
//! catalog deletes.

use chrono::{DateTime, Utc};
use serde::Serialize;

use tillpoint_core::{Money, PaymentMethod, Quantity};
use tillpoint_db::{ListedSale, ListedSaleItem};

/// Attendant label when no user record resolves.
const WALK_IN_LABEL: &str = "Walk-in customer";

// =============================================================================
// View Types
// =============================================================================

/// A formatted sale, ready for JSON.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SaleView {
    pub id: String,
    pub receipt_number: String,
    /// Resolved attendant label (never null; see the fallback chain).
    pub attendant: String,
    pub payment_method: PaymentMethod,
    pub items: Vec<SaleItemView>,
    pub subtotal: f64,
    pub discount: f64,
    pub total: f64,
    pub created_at: DateTime<Utc>,
}

/// One formatted line item.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SaleItemView {
    pub product_id: String,
    /// Null when the product has since been deleted from the catalog.
    pub product: Option<ProductSummary>,
    pub quantity: f64,
    pub unit_price: f64,
    pub line_total: f64,
}

/// What the receipt shows about a product.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductSummary {
    pub name: String,
    pub sku: String,
}

// =============================================================================
// Formatter
// =============================================================================

/// Formats a listed sale for clients.
pub fn format_sale(listed: &ListedSale) -> SaleView {
    SaleView {
        id: listed.sale.id.clone(),
        receipt_number: listed.sale.receipt_number.clone(),
        attendant: resolve_attendant(
            listed.attendant_display_name.as_deref(),
            listed.attendant_username.as_deref(),
        ),
        payment_method: listed.sale.payment_method,
        items: listed.items.iter().map(format_item).collect(),
        subtotal: listed.sale.subtotal().to_decimal(),
        discount: listed.sale.discount().to_decimal(),
        total: listed.sale.total().to_decimal(),
        created_at: listed.sale.created_at,
    }
}

fn format_item(item: &ListedSaleItem) -> SaleItemView {
    let product = item.product_name.as_ref().map(|name| ProductSummary {
        name: name.clone(),
        sku: item.product_sku.clone().unwrap_or_default(),
    });

    SaleItemView {
        product_id: item.item.product_id.clone(),
        product,
        quantity: Quantity::from_hundredths(item.item.quantity_hundredths).to_decimal(),
        unit_price: Money::from_cents(item.item.unit_price_cents).to_decimal(),
        line_total: Money::from_cents(item.item.line_total_cents).to_decimal(),
    }
}

fn resolve_attendant(display_name: Option<&str>, username: Option<&str>) -> String {
    display_name
        .map(str::trim)
        .filter(|n| !n.is_empty())
        .or(username)
        .unwrap_or(WALK_IN_LABEL)
        .to_string()
}

// =============================================================================
// Unit Tests
// =============================================================================
