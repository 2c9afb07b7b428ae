//! # Product Repository
//!
//! Catalog reads plus the single joined product+stock fetch the stock
//! arbiter runs before a sale. Catalog management itself (bulk loading,
//! editing) lives outside the engine; `insert`/`delete` exist for those
//! collaborators and for tests.

use chrono::Utc;
use sqlx::{QueryBuilder, SqlitePool};
use tracing::debug;
use uuid::Uuid;

use crate::error::DbResult;
use tillpoint_core::{Product, Quantity};

/// One product joined with its current stock quantity.
///
/// This is the arbiter's unit of work: catalog price and availability come
/// from the same read.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ProductWithStock {
    pub id: String,
    pub name: String,
    pub sku: String,
    pub price_cents: i64,
    pub cost_cents: i64,
    pub quantity_hundredths: i64,
}

impl ProductWithStock {
    /// Catalog price as Money.
    #[inline]
    pub fn price(&self) -> tillpoint_core::Money {
        tillpoint_core::Money::from_cents(self.price_cents)
    }

    /// Quantity on hand as Quantity.
    #[inline]
    pub fn available(&self) -> Quantity {
        Quantity::from_hundredths(self.quantity_hundredths)
    }
}

/// Repository for product database operations.
#[derive(Debug, Clone)]
pub struct ProductRepository {
    pool: SqlitePool,
}

impl ProductRepository {
    /// Creates a new ProductRepository.
    pub fn new(pool: SqlitePool) -> Self {
        ProductRepository { pool }
    }

    /// Inserts a product together with its stock row.
    ///
    /// Product and stock are 1:1; creating them together keeps the invariant
    /// that every product has a stock quantity (possibly zero).
    pub async fn insert(&self, product: &Product, initial_stock: Quantity) -> DbResult<()> {
        debug!(id = %product.id, name = %product.name, "inserting product");

        let mut tx = self.pool.begin().await?;

        sqlx::query(
            r#"
            INSERT INTO products (id, name, sku, price_cents, cost_cents, created_at, updated_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
            "#,
        )
        .bind(&product.id)
        .bind(&product.name)
        .bind(&product.sku)
        .bind(product.price_cents)
        .bind(product.cost_cents)
        .bind(product.created_at)
        .bind(product.updated_at)
        .execute(&mut *tx)
        .await?;

        sqlx::query(
            r#"
            INSERT INTO stock (product_id, quantity_hundredths, updated_at)
            VALUES (?1, ?2, ?3)
            "#,
        )
        .bind(&product.id)
        .bind(initial_stock.hundredths())
        .bind(product.created_at)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(())
    }

    /// Gets a product by its ID.
    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<Product>> {
        let product = sqlx::query_as::<_, Product>(
            r#"
            SELECT id, name, sku, price_cents, cost_cents, created_at, updated_at
            FROM products
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(product)
    }

    /// Fetches the given products joined with their current stock, in one
    /// read. Ids that don't exist are simply absent from the result; the
    /// arbiter diffs the sets to report them.
    pub async fn fetch_with_stock(&self, ids: &[String]) -> DbResult<Vec<ProductWithStock>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        debug!(count = ids.len(), "fetching products with stock");

        let mut builder = QueryBuilder::new(
            r#"
            SELECT p.id, p.name, p.sku, p.price_cents, p.cost_cents,
                   s.quantity_hundredths
            FROM products p
            JOIN stock s ON s.product_id = p.id
            WHERE p.id IN (
            "#,
        );
        let mut separated = builder.separated(", ");
        for id in ids {
            separated.push_bind(id);
        }
        builder.push(")");

        let products = builder
            .build_query_as::<ProductWithStock>()
            .fetch_all(&self.pool)
            .await?;

        Ok(products)
    }

    /// Deletes a product. Its stock row cascades; historical sale items keep
    /// their product_id and format with a null product summary afterwards.
    pub async fn delete(&self, id: &str) -> DbResult<()> {
        debug!(id = %id, "deleting product");

        sqlx::query("DELETE FROM products WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    /// Counts products (for diagnostics).
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM products")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}

/// Helper to generate a new product ID.
pub fn generate_product_id() -> String {
    Uuid::new_v4().to_string()
}

/// Builds a Product with freshly stamped timestamps. Convenience for
/// catalog collaborators and tests.
pub fn new_product(name: &str, sku: &str, price_cents: i64, cost_cents: i64) -> Product {
    let now = Utc::now();
    Product {
        id: generate_product_id(),
        name: name.to_string(),
        sku: sku.to_string(),
        price_cents,
        cost_cents,
        created_at: now,
        updated_at: now,
    }
}
