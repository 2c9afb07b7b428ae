//! # Stock Repository
//!
//! Stock reads and the conditional decrement the transaction coordinator
//! commits sales with.
//!
//! ## The Conditional Decrement
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │               Why "decrement iff enough" instead of                     │
//! │                    "read, compare, write"?                              │
//! │                                                                         │
//! │  Two concurrent sales, stock = 10, both want 10:                       │
//! │                                                                         │
//! │  ❌ read-then-write:                                                    │
//! │     A reads 10 ✓        B reads 10 ✓                                   │
//! │     A writes 0          B writes 0     ← both "succeed", 10 oversold   │
//! │                                                                         │
//! │  ✅ conditional decrement (one statement):                              │
//! │     UPDATE stock SET quantity = quantity - 10                          │
//! │     WHERE product_id = ? AND quantity >= 10                            │
//! │                                                                         │
//! │     A: 1 row affected → claimed      B: 0 rows → StockChanged          │
//! │                                                                         │
//! │  SQLite serializes writers, so the two UPDATEs cannot interleave;      │
//! │  the WHERE clause makes the compare and the write one atomic step.     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{DateTime, Utc};
use sqlx::{SqliteConnection, SqlitePool};
use tracing::debug;

use crate::error::DbResult;
use tillpoint_core::{Quantity, Stock};

/// Repository for stock database operations.
///
/// Pool-based methods serve reads and restock flows. The methods taking an
/// explicit [`SqliteConnection`] run on the caller's transaction - the
/// coordinator owns the commit boundary, not this repository.
#[derive(Debug, Clone)]
pub struct StockRepository {
    pool: SqlitePool,
}

impl StockRepository {
    /// Creates a new StockRepository.
    pub fn new(pool: SqlitePool) -> Self {
        StockRepository { pool }
    }

    /// Gets the stock row for a product.
    pub async fn get(&self, product_id: &str) -> DbResult<Option<Stock>> {
        let stock = sqlx::query_as::<_, Stock>(
            r#"
            SELECT product_id, quantity_hundredths, updated_at
            FROM stock
            WHERE product_id = ?1
            "#,
        )
        .bind(product_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(stock)
    }

    /// Sets the absolute stock quantity (restock flows and tests).
    /// Not used on the sale path.
    pub async fn set_quantity(&self, product_id: &str, quantity: Quantity) -> DbResult<()> {
        debug!(product_id = %product_id, quantity = %quantity, "setting stock quantity");

        sqlx::query(
            r#"
            UPDATE stock
            SET quantity_hundredths = ?2, updated_at = ?3
            WHERE product_id = ?1
            "#,
        )
        .bind(product_id)
        .bind(quantity.hundredths())
        .bind(Utc::now())
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Atomically decrements stock iff the current quantity covers the
    /// request. Runs on the caller's transaction.
    ///
    /// Returns `true` when the decrement claimed the units, `false` when the
    /// current quantity was insufficient (zero rows matched).
    pub async fn decrement_if_available(
        &self,
        conn: &mut SqliteConnection,
        product_id: &str,
        quantity: Quantity,
        now: DateTime<Utc>,
    ) -> DbResult<bool> {
        let result = sqlx::query(
            r#"
            UPDATE stock
            SET quantity_hundredths = quantity_hundredths - ?2,
                updated_at = ?3
            WHERE product_id = ?1
              AND quantity_hundredths >= ?2
            "#,
        )
        .bind(product_id)
        .bind(quantity.hundredths())
        .bind(now)
        .execute(conn)
        .await?;

        Ok(result.rows_affected() == 1)
    }

    /// Reads the current quantity inside the caller's transaction.
    /// Used to report how much really was available after a failed claim.
    pub async fn quantity_in_tx(
        &self,
        conn: &mut SqliteConnection,
        product_id: &str,
    ) -> DbResult<Option<Quantity>> {
        let hundredths: Option<i64> =
            sqlx::query_scalar("SELECT quantity_hundredths FROM stock WHERE product_id = ?1")
                .bind(product_id)
                .fetch_optional(conn)
                .await?;

        Ok(hundredths.map(Quantity::from_hundredths))
    }
}
