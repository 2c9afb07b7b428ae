//! # Pricing Calculator
//!
//! Derives the price to charge per line, line totals, subtotal and net total.
//!
//! ## Price Resolution
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Per-Line Price Resolution                          │
//! │                                                                         │
//! │  ValidatedItem.price_override present?                                  │
//! │       │                                                                 │
//! │       ├── Yes ──► charge the override                                  │
//! │       │                                                                 │
//! │       └── No ───► charge the catalog price                             │
//! │                                                                         │
//! │  Resolved price must be > 0, else InvalidPrice (1-indexed line)        │
//! │                                                                         │
//! │  line_total = round(price × quantity)      (minor units, half away)    │
//! │  subtotal   = Σ line_total                 (exact integer sum)         │
//! │  total      = subtotal - discount          (discount <= subtotal)      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Everything here runs on [`Money`]/[`Quantity`] integers; downstream
//! persistence stores these values as-is and never re-derives them from
//! float multiplication.

use crate::error::{PricingError, PricingResult};
use crate::money::{Money, Quantity};
use crate::validation::ValidatedItem;

// =============================================================================
// Input / Output Types
// =============================================================================

/// One validated line item paired with the catalog price fetched for its
/// product. The engine builds these after the catalog read.
#[derive(Debug, Clone)]
pub struct CatalogLine {
    pub item: ValidatedItem,
    pub catalog_price: Money,
}

/// A fully priced line item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PricedItem {
    pub product_id: String,
    pub quantity: Quantity,
    /// The price actually charged (override or catalog).
    pub unit_price: Money,
    pub line_total: Money,
}

/// A fully priced sale, ready for the transaction coordinator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PricedSale {
    pub items: Vec<PricedItem>,
    pub subtotal: Money,
    pub discount: Money,
    pub total: Money,
}

// =============================================================================
// Calculator
// =============================================================================

/// Prices a validated sale.
///
/// For each line: unit price = override if supplied, else catalog price;
/// the resolved price must be greater than zero. Line totals, the subtotal
/// and the net total are computed in exact minor units.
///
/// Fails with [`PricingError::DiscountExceedsSubtotal`] when the discount is
/// larger than the subtotal; a discount exactly equal to the subtotal is
/// valid and yields a zero total.
///
/// ## Example
/// ```rust
/// use tillpoint_core::money::{Money, Quantity};
/// use tillpoint_core::pricing::{price_sale, CatalogLine};
/// use tillpoint_core::validation::ValidatedItem;
///
/// let lines = vec![CatalogLine {
///     item: ValidatedItem {
///         product_id: "p-1".into(),
///         quantity: Quantity::from_hundredths(200),
///         price_override: None,
///     },
///     catalog_price: Money::from_cents(999),
/// }];
///
/// let priced = price_sale(&lines, Money::zero()).unwrap();
/// assert_eq!(priced.subtotal.cents(), 1998);
/// assert_eq!(priced.total.cents(), 1998);
/// ```
pub fn price_sale(lines: &[CatalogLine], discount: Money) -> PricingResult<PricedSale> {
    let mut items = Vec::with_capacity(lines.len());
    let mut subtotal = Money::zero();

    for (index, line) in lines.iter().enumerate() {
        let unit_price = line.item.price_override.unwrap_or(line.catalog_price);
        if !unit_price.is_positive() {
            return Err(PricingError::InvalidPrice { line: index + 1 });
        }

        let line_total = unit_price
            .line_total(line.item.quantity)
            .map_err(|_| PricingError::LineTotalOutOfRange { line: index + 1 })?;
        subtotal += line_total;

        items.push(PricedItem {
            product_id: line.item.product_id.clone(),
            quantity: line.item.quantity,
            unit_price,
            line_total,
        });
    }

    if discount > subtotal {
        return Err(PricingError::DiscountExceedsSubtotal { discount, subtotal });
    }

    Ok(PricedSale {
        items,
        subtotal,
        discount,
        total: subtotal - discount,
    })
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn line(product_id: &str, qty_hundredths: i64, catalog_cents: i64) -> CatalogLine {
        CatalogLine {
            item: ValidatedItem {
                product_id: product_id.to_string(),
                quantity: Quantity::from_hundredths(qty_hundredths),
                price_override: None,
            },
            catalog_price: Money::from_cents(catalog_cents),
        }
    }

    #[test]
    fn test_catalog_price_scenario() {
        // P1 at $9.99, quantity 2 → line total $19.98
        let priced = price_sale(&[line("p-1", 200, 999)], Money::zero()).unwrap();
        assert_eq!(priced.items[0].line_total.cents(), 1998);
        assert_eq!(priced.subtotal.cents(), 1998);
        assert_eq!(priced.discount.cents(), 0);
        assert_eq!(priced.total.cents(), 1998);
    }

    #[test]
    fn test_price_override_wins() {
        // Override of $5.00 beats catalog $9.99
        let mut l = line("p-1", 100, 999);
        l.item.price_override = Some(Money::from_cents(500));
        let priced = price_sale(&[l], Money::zero()).unwrap();
        assert_eq!(priced.items[0].unit_price.cents(), 500);
        assert_eq!(priced.total.cents(), 500);
    }

    #[test]
    fn test_subtotal_is_exact_sum_of_line_totals() {
        let lines = vec![line("p-1", 200, 999), line("p-2", 150, 333), line("p-3", 100, 1)];
        let priced = price_sale(&lines, Money::zero()).unwrap();
        let sum: i64 = priced.items.iter().map(|i| i.line_total.cents()).sum();
        assert_eq!(priced.subtotal.cents(), sum);
        assert_eq!(priced.total, priced.subtotal - priced.discount);
    }

    #[test]
    fn test_zero_resolved_price_rejected() {
        // Catalog price of zero with no override
        let result = price_sale(&[line("p-1", 100, 0)], Money::zero());
        assert_eq!(result, Err(PricingError::InvalidPrice { line: 1 }));

        // Override of zero over a positive catalog price
        let mut l = line("p-1", 100, 999);
        l.item.price_override = Some(Money::zero());
        let result = price_sale(&[line("p-0", 100, 500), l], Money::zero());
        assert_eq!(result, Err(PricingError::InvalidPrice { line: 2 }));
    }

    #[test]
    fn test_discount_equal_to_subtotal_is_valid() {
        let priced = price_sale(&[line("p-1", 200, 999)], Money::from_cents(1998)).unwrap();
        assert_eq!(priced.total, Money::zero());
    }

    #[test]
    fn test_discount_one_cent_over_subtotal_rejected() {
        let result = price_sale(&[line("p-1", 200, 999)], Money::from_cents(1999));
        assert_eq!(
            result,
            Err(PricingError::DiscountExceedsSubtotal {
                discount: Money::from_cents(1999),
                subtotal: Money::from_cents(1998),
            })
        );
    }

    #[test]
    fn test_oversized_line_total_rejected_with_line_number() {
        // Boundary-maximum override and quantity each validate on their own;
        // the product must fail pricing instead of wrapping into a bogus charge
        let mut l = line("p-1", 1_000_000_000_000_000, 999);
        l.item.price_override = Some(Money::from_cents(1_000_000_000_000_000));
        let result = price_sale(&[line("p-0", 100, 500), l], Money::zero());
        assert_eq!(result, Err(PricingError::LineTotalOutOfRange { line: 2 }));
    }

    #[test]
    fn test_fractional_quantity_line_total() {
        // $3.33 × 2.5 = 832.5 cents → 833 (half away from zero)
        let priced = price_sale(&[line("p-1", 250, 333)], Money::zero()).unwrap();
        assert_eq!(priced.items[0].line_total.cents(), 833);
    }
}
