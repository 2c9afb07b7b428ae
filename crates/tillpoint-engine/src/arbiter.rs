//! # Stock Arbiter
//!
//! The advisory availability check that runs before any transaction is
//! opened.
//!
//! ## Advisory, Not Authoritative
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  The arbiter answers "does this request stand a chance?" from one      │
//! │  joined catalog+stock read:                                            │
//! │                                                                         │
//! │    • unknown product ids      → ProductsNotFound (sorted, exact)       │
//! │    • requested > available    → InsufficientStock (per-product sums,   │
//! │                                 a request may list a product twice)    │
//! │                                                                         │
//! │  It runs OUTSIDE the transaction, so its answer can go stale the       │
//! │  moment it is produced. Correctness belongs to the coordinator's       │
//! │  conditional decrement; the arbiter exists to fail fast with a         │
//! │  friendly error instead of burning a write transaction.                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::collections::{HashMap, HashSet};

use tracing::debug;

use crate::error::{SaleError, SaleResult};
use tillpoint_core::{CatalogLine, Quantity, ValidatedSale};
use tillpoint_db::{ProductRepository, ProductWithStock};

/// The arbiter's verdict: every line resolved against the catalog, plus the
/// fetched products for downstream messages.
#[derive(Debug)]
pub struct ArbitratedSale {
    /// One per validated item, in request order, ready for pricing.
    pub lines: Vec<CatalogLine>,
    /// Fetched products keyed by id. The coordinator reads names from here
    /// when a claim fails mid-transaction.
    pub products: HashMap<String, ProductWithStock>,
}

/// Resolves a validated sale against the catalog and checks availability.
///
/// Quantities are summed per product before comparing, so a request listing
/// the same product on two lines is checked against its cumulative demand.
pub async fn arbitrate(
    repo: &ProductRepository,
    sale: &ValidatedSale,
) -> SaleResult<ArbitratedSale> {
    let mut ids: Vec<String> = sale.items.iter().map(|i| i.product_id.clone()).collect();
    ids.sort();
    ids.dedup();

    debug!(products = ids.len(), items = sale.items.len(), "arbitrating stock");

    let fetched = repo.fetch_with_stock(&ids).await?;
    let products: HashMap<String, ProductWithStock> =
        fetched.into_iter().map(|p| (p.id.clone(), p)).collect();

    let missing: Vec<String> = ids
        .iter()
        .filter(|id| !products.contains_key(*id))
        .cloned()
        .collect();
    if !missing.is_empty() {
        // `ids` is already sorted, so `missing` is too
        return Err(SaleError::ProductsNotFound { ids: missing });
    }

    let mut demand: HashMap<&str, i64> = HashMap::new();
    for item in &sale.items {
        *demand.entry(item.product_id.as_str()).or_insert(0) += item.quantity.hundredths();
    }

    // First offender in request order, checked once per product
    let mut checked: HashSet<&str> = HashSet::new();
    for item in &sale.items {
        let id = item.product_id.as_str();
        if !checked.insert(id) {
            continue;
        }
        let product = &products[id];
        let requested = Quantity::from_hundredths(demand[id]);
        if requested.hundredths() > product.quantity_hundredths {
            return Err(SaleError::InsufficientStock {
                product_id: product.id.clone(),
                name: product.name.clone(),
                available: product.available(),
                requested,
            });
        }
    }

    let lines = sale
        .items
        .iter()
        .map(|item| CatalogLine {
            item: item.clone(),
            catalog_price: products[item.product_id.as_str()].price(),
        })
        .collect();

    Ok(ArbitratedSale { lines, products })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tillpoint_core::{validate_sale_draft, SaleDraft, SaleDraftItem};
    use tillpoint_db::{Database, DbConfig};
    use tillpoint_db::repository::product::new_product;

    fn draft(items: Vec<(&str, f64)>) -> ValidatedSale {
        let draft = SaleDraft {
            attendant_id: Some("u-1".to_string()),
            payment_method: Some("cash".to_string()),
            items: items
                .into_iter()
                .map(|(id, qty)| SaleDraftItem {
                    product_id: Some(id.to_string()),
                    quantity: Some(qty),
                    price: None,
                })
                .collect(),
            discount: None,
            receipt_number: None,
        };
        validate_sale_draft(&draft).unwrap()
    }

    #[tokio::test]
    async fn test_missing_products_reported_sorted() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let product = new_product("Widget", "W-1", 999, 500);
        db.products()
            .insert(&product, Quantity::from_hundredths(1000))
            .await
            .unwrap();

        let sale = draft(vec![("zzz", 1.0), (product.id.as_str(), 1.0), ("aaa", 1.0)]);
        let err = arbitrate(&db.products(), &sale).await.unwrap_err();
        match err {
            SaleError::ProductsNotFound { ids } => {
                assert_eq!(ids, vec!["aaa".to_string(), "zzz".to_string()]);
            }
            other => panic!("expected ProductsNotFound, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_duplicate_lines_checked_cumulatively() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let product = new_product("Widget", "W-1", 999, 500);
        // 3.00 units on hand; two lines of 2.00 each demand 4.00
        db.products()
            .insert(&product, Quantity::from_hundredths(300))
            .await
            .unwrap();

        let sale = draft(vec![(product.id.as_str(), 2.0), (product.id.as_str(), 2.0)]);
        let err = arbitrate(&db.products(), &sale).await.unwrap_err();
        match err {
            SaleError::InsufficientStock {
                available,
                requested,
                ..
            } => {
                assert_eq!(available.hundredths(), 300);
                assert_eq!(requested.hundredths(), 400);
            }
            other => panic!("expected InsufficientStock, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_lines_carry_catalog_prices_in_request_order() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let cheap = new_product("Cheap", "C-1", 100, 50);
        let dear = new_product("Dear", "D-1", 5000, 2500);
        db.products()
            .insert(&cheap, Quantity::from_hundredths(1000))
            .await
            .unwrap();
        db.products()
            .insert(&dear, Quantity::from_hundredths(1000))
            .await
            .unwrap();

        let sale = draft(vec![(dear.id.as_str(), 1.0), (cheap.id.as_str(), 1.0)]);
        let arbitrated = arbitrate(&db.products(), &sale).await.unwrap();
        assert_eq!(arbitrated.lines.len(), 2);
        assert_eq!(arbitrated.lines[0].catalog_price.cents(), 5000);
        assert_eq!(arbitrated.lines[1].catalog_price.cents(), 100);
    }
}
