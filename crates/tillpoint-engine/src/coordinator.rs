//! # Transaction Coordinator
//!
//! The sole mutator of stock and creator of sale records.
//!
//! ## Commit Protocol
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     One Atomic Unit (30s budget)                        │
//! │                                                                         │
//! │  BEGIN                                                                  │
//! │    │                                                                    │
//! │    ▼  for every line, first thing in the transaction:                  │
//! │  UPDATE stock SET quantity = quantity - ?                              │
//! │  WHERE product_id = ? AND quantity >= ?                                │
//! │    │                                                                    │
//! │    ├── 0 rows → re-read quantity, ROLLBACK, StockChanged               │
//! │    │                                                                    │
//! │    ▼                                                                    │
//! │  INSERT sale ──── UNIQUE(receipt_number) hit → ROLLBACK,               │
//! │    │                                  DuplicateReceiptNumber           │
//! │    ▼                                                                    │
//! │  INSERT sale_items                                                     │
//! │    │                                                                    │
//! │    ▼                                                                    │
//! │  COMMIT                                                                 │
//! │                                                                         │
//! │  Decrement-first ordering takes SQLite's write lock up front, so the   │
//! │  transaction never reads a snapshot another writer can invalidate.     │
//! │  On timeout the Transaction value is dropped, which rolls back.        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! No automatic retries. A `StockChanged` loser resubmits, or doesn't.

use std::collections::HashMap;
use std::time::Duration;

use chrono::Utc;
use tokio::time::timeout;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::error::{SaleError, SaleResult};
use tillpoint_core::{PricedSale, Quantity, Sale, SaleItem, ValidatedSale};
use tillpoint_db::repository::sale::{generate_sale_id, generate_sale_item_id};
use tillpoint_db::{Database, DbError, ProductWithStock};

/// Wall-clock budget for the whole commit protocol.
pub const COMMIT_TIMEOUT: Duration = Duration::from_secs(30);

/// Commits a priced sale atomically.
///
/// `products` is the arbiter's fetch, used only for the names in
/// `StockChanged` messages. On success the committed [`Sale`] row is
/// returned; on any failure nothing was persisted.
pub async fn commit_sale(
    db: &Database,
    validated: &ValidatedSale,
    priced: &PricedSale,
    products: &HashMap<String, ProductWithStock>,
) -> SaleResult<Sale> {
    match timeout(COMMIT_TIMEOUT, commit_inner(db, validated, priced, products)).await {
        Ok(result) => result,
        Err(_) => {
            // Dropping the future dropped the transaction, which rolls back
            warn!("sale commit exceeded {}s budget", COMMIT_TIMEOUT.as_secs());
            Err(SaleError::TransactionTimeout)
        }
    }
}

async fn commit_inner(
    db: &Database,
    validated: &ValidatedSale,
    priced: &PricedSale,
    products: &HashMap<String, ProductWithStock>,
) -> SaleResult<Sale> {
    let stock = db.stock();
    let sales = db.sales();
    let now = Utc::now();

    let mut tx = db.pool().begin().await.map_err(DbError::from)?;

    for item in &priced.items {
        let claimed = stock
            .decrement_if_available(&mut *tx, item.product_id.as_str(), item.quantity, now)
            .await
            .map_err(abort)?;

        if !claimed {
            let available = stock
                .quantity_in_tx(&mut *tx, item.product_id.as_str())
                .await
                .map_err(abort)?
                .unwrap_or_else(Quantity::zero);

            let name = products
                .get(item.product_id.as_str())
                .map(|p| p.name.clone())
                .unwrap_or_else(|| item.product_id.clone());

            debug!(
                product_id = %item.product_id,
                available = %available,
                requested = %item.quantity,
                "stock claim failed, rolling back"
            );

            // Dropping tx rolls back every decrement made so far
            return Err(SaleError::StockChanged {
                product_id: item.product_id.clone(),
                name,
                available,
                requested: item.quantity,
            });
        }
    }

    let receipt_number = validated
        .receipt_number
        .clone()
        .unwrap_or_else(generate_receipt_number);

    let sale = Sale {
        id: generate_sale_id(),
        receipt_number,
        attendant_id: validated.attendant_id.clone(),
        payment_method: validated.payment_method,
        subtotal_cents: priced.subtotal.cents(),
        discount_cents: priced.discount.cents(),
        total_cents: priced.total.cents(),
        created_at: now,
    };

    if let Err(e) = sales.insert_sale(&mut *tx, &sale).await {
        if e.is_unique_violation_on("receipt_number") {
            return Err(SaleError::DuplicateReceiptNumber(sale.receipt_number));
        }
        return Err(abort(e));
    }

    for item in &priced.items {
        let row = SaleItem {
            id: generate_sale_item_id(),
            sale_id: sale.id.clone(),
            product_id: item.product_id.clone(),
            quantity_hundredths: item.quantity.hundredths(),
            unit_price_cents: item.unit_price.cents(),
            line_total_cents: item.line_total.cents(),
            created_at: now,
        };
        sales.insert_item(&mut *tx, &row).await.map_err(abort)?;
    }

    tx.commit()
        .await
        .map_err(|e| SaleError::TransactionAborted(e.to_string()))?;

    info!(
        sale_id = %sale.id,
        receipt_number = %sale.receipt_number,
        total_cents = sale.total_cents,
        items = priced.items.len(),
        "sale committed"
    );

    Ok(sale)
}

fn abort(e: DbError) -> SaleError {
    SaleError::TransactionAborted(e.to_string())
}

/// Generates a receipt number: the sale date plus a random suffix,
/// e.g. `20260824-3f9c01d2ab47`.
fn generate_receipt_number() -> String {
    let date = Utc::now().format("%Y%m%d");
    let suffix = Uuid::new_v4().simple().to_string();
    format!("{date}-{}", &suffix[..12])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_receipt_shape() {
        let receipt = generate_receipt_number();
        let (date, suffix) = receipt.split_once('-').unwrap();
        assert_eq!(date.len(), 8);
        assert!(date.chars().all(|c| c.is_ascii_digit()));
        assert_eq!(suffix.len(), 12);
        assert!(suffix.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn test_generated_receipts_distinct() {
        let a = generate_receipt_number();
        let b = generate_receipt_number();
        assert_ne!(a, b);
    }
}
