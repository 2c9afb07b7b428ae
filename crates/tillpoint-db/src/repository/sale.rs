//! # Sale Repository
//!
//! Database operations for sales and sale items.
//!
//! ## Write vs Read Side
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Sale Repository Shape                             │
//! │                                                                         │
//! │  WRITE (transaction-scoped, driven by the coordinator)                 │
//! │  ├── insert_sale(conn, sale)      one row in sales                     │
//! │  └── insert_item(conn, item)      one row per line item                │
//! │      The coordinator opens the transaction, claims stock first,        │
//! │      then inserts, then commits. Nothing here commits.                 │
//! │                                                                         │
//! │  READ (pool-based)                                                     │
//! │  ├── get_listed(id)    sale + attendant names + items + product        │
//! │  │                     summaries, ready for the formatter              │
//! │  └── list_all()        same, newest first                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::collections::HashMap;

use sqlx::{SqliteConnection, SqlitePool};
use tracing::debug;
use uuid::Uuid;

use crate::error::DbResult;
use tillpoint_core::{Sale, SaleItem};

// =============================================================================
// Read-Side Shapes
// =============================================================================

/// A sale as read for formatting: the row itself, the attendant's names
/// (absent when the user record is gone) and the items with nullable
/// product summaries.
#[derive(Debug, Clone)]
pub struct ListedSale {
    pub sale: Sale,
    pub attendant_username: Option<String>,
    pub attendant_display_name: Option<String>,
    pub items: Vec<ListedSaleItem>,
}

/// One line item with its product summary, if the product still exists.
#[derive(Debug, Clone)]
pub struct ListedSaleItem {
    pub item: SaleItem,
    pub product_name: Option<String>,
    pub product_sku: Option<String>,
}

#[derive(Debug, sqlx::FromRow)]
struct SaleWithAttendantRow {
    #[sqlx(flatten)]
    sale: Sale,
    attendant_username: Option<String>,
    attendant_display_name: Option<String>,
}

#[derive(Debug, sqlx::FromRow)]
struct ItemWithProductRow {
    #[sqlx(flatten)]
    item: SaleItem,
    product_name: Option<String>,
    product_sku: Option<String>,
}

const SALE_SELECT: &str = r#"
    SELECT s.id, s.receipt_number, s.attendant_id, s.payment_method,
           s.subtotal_cents, s.discount_cents, s.total_cents, s.created_at,
           a.username AS attendant_username,
           a.display_name AS attendant_display_name
    FROM sales s
    LEFT JOIN attendants a ON a.id = s.attendant_id
"#;

const ITEM_SELECT: &str = r#"
    SELECT i.id, i.sale_id, i.product_id, i.quantity_hundredths,
           i.unit_price_cents, i.line_total_cents, i.created_at,
           p.name AS product_name,
           p.sku AS product_sku
    FROM sale_items i
    LEFT JOIN products p ON p.id = i.product_id
"#;

// =============================================================================
// Repository
// =============================================================================

/// Repository for sale database operations.
#[derive(Debug, Clone)]
pub struct SaleRepository {
    pool: SqlitePool,
}

impl SaleRepository {
    /// Creates a new SaleRepository.
    pub fn new(pool: SqlitePool) -> Self {
        SaleRepository { pool }
    }

    // -------------------------------------------------------------------------
    // Write side (transaction-scoped)
    // -------------------------------------------------------------------------

    /// Inserts a sale row on the caller's transaction.
    ///
    /// A `UNIQUE constraint failed: sales.receipt_number` from SQLite
    /// surfaces as `DbError::UniqueViolation`; the coordinator translates
    /// that into its duplicate-receipt failure.
    pub async fn insert_sale(&self, conn: &mut SqliteConnection, sale: &Sale) -> DbResult<()> {
        debug!(id = %sale.id, receipt_number = %sale.receipt_number, "inserting sale");

        sqlx::query(
            r#"
            INSERT INTO sales (
                id, receipt_number, attendant_id, payment_method,
                subtotal_cents, discount_cents, total_cents, created_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
            "#,
        )
        .bind(&sale.id)
        .bind(&sale.receipt_number)
        .bind(&sale.attendant_id)
        .bind(sale.payment_method)
        .bind(sale.subtotal_cents)
        .bind(sale.discount_cents)
        .bind(sale.total_cents)
        .bind(sale.created_at)
        .execute(conn)
        .await?;

        Ok(())
    }

    /// Inserts one sale item on the caller's transaction.
    pub async fn insert_item(&self, conn: &mut SqliteConnection, item: &SaleItem) -> DbResult<()> {
        sqlx::query(
            r#"
            INSERT INTO sale_items (
                id, sale_id, product_id, quantity_hundredths,
                unit_price_cents, line_total_cents, created_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
            "#,
        )
        .bind(&item.id)
        .bind(&item.sale_id)
        .bind(&item.product_id)
        .bind(item.quantity_hundredths)
        .bind(item.unit_price_cents)
        .bind(item.line_total_cents)
        .bind(item.created_at)
        .execute(conn)
        .await?;

        Ok(())
    }

    // -------------------------------------------------------------------------
    // Read side
    // -------------------------------------------------------------------------

    /// Gets one sale with everything the formatter needs.
    pub async fn get_listed(&self, id: &str) -> DbResult<Option<ListedSale>> {
        let query = format!("{SALE_SELECT} WHERE s.id = ?1");
        let row = sqlx::query_as::<_, SaleWithAttendantRow>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        let Some(row) = row else {
            return Ok(None);
        };

        let items_query = format!("{ITEM_SELECT} WHERE i.sale_id = ?1 ORDER BY i.rowid");
        let items = sqlx::query_as::<_, ItemWithProductRow>(&items_query)
            .bind(id)
            .fetch_all(&self.pool)
            .await?
            .into_iter()
            .map(|r| ListedSaleItem {
                item: r.item,
                product_name: r.product_name,
                product_sku: r.product_sku,
            })
            .collect();

        Ok(Some(ListedSale {
            sale: row.sale,
            attendant_username: row.attendant_username,
            attendant_display_name: row.attendant_display_name,
            items,
        }))
    }

    /// Lists all sales, newest first, with their items.
    ///
    /// Two queries instead of one joined scan: sales, then all items grouped
    /// in memory. Items preserve insert order within a sale (rowid).
    pub async fn list_all(&self) -> DbResult<Vec<ListedSale>> {
        let query = format!("{SALE_SELECT} ORDER BY s.created_at DESC, s.id");
        let sale_rows = sqlx::query_as::<_, SaleWithAttendantRow>(&query)
            .fetch_all(&self.pool)
            .await?;

        let items_query = format!("{ITEM_SELECT} ORDER BY i.rowid");
        let item_rows = sqlx::query_as::<_, ItemWithProductRow>(&items_query)
            .fetch_all(&self.pool)
            .await?;

        let mut items_by_sale: HashMap<String, Vec<ListedSaleItem>> = HashMap::new();
        for row in item_rows {
            items_by_sale
                .entry(row.item.sale_id.clone())
                .or_default()
                .push(ListedSaleItem {
                    item: row.item,
                    product_name: row.product_name,
                    product_sku: row.product_sku,
                });
        }

        let sales = sale_rows
            .into_iter()
            .map(|row| {
                let items = items_by_sale.remove(&row.sale.id).unwrap_or_default();
                ListedSale {
                    sale: row.sale,
                    attendant_username: row.attendant_username,
                    attendant_display_name: row.attendant_display_name,
                    items,
                }
            })
            .collect();

        Ok(sales)
    }

    /// Counts committed sales (for diagnostics and tests).
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM sales")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}

/// Generates a new sale ID.
pub fn generate_sale_id() -> String {
    Uuid::new_v4().to_string()
}

/// Generates a new sale item ID.
pub fn generate_sale_item_id() -> String {
    Uuid::new_v4().to_string()
}
