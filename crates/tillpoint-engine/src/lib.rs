//! # tillpoint-engine: The Sale Transaction Engine
//!
//! The sale-commit path end to end, from raw request to committed receipt.
//!
//! ## Pipeline
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Sale-Commit Pipeline                             │
//! │                                                                         │
//! │  SaleDraft (raw JSON shape)                                            │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  1. VALIDATE (tillpoint-core)      field checks, minor-unit conversion │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  2. ARBITRATE (arbiter.rs)         catalog fetch + advisory stock check│
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  3. PRICE (tillpoint-core)         overrides, line totals, discount    │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  4. COMMIT (coordinator.rs)        conditional decrements + inserts,   │
//! │       │                            one atomic transaction, 30s budget  │
//! │       ▼                                                                 │
//! │  5. FORMAT (formatter.rs)          cents → decimals, attendant chain   │
//! │                                                                         │
//! │  Steps 1-3 are fail-fast and side-effect free; only step 4 writes.    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`arbiter`] - Advisory stock availability check
//! - [`coordinator`] - The atomic commit protocol
//! - [`formatter`] - Wire-shape formatting of persisted sales
//! - [`summary`] - Aggregates for the listing endpoint
//! - [`error`] - [`SaleError`], the engine's single error surface

// =============================================================================
// Module Declarations
// =============================================================================

pub mod arbiter;
pub mod coordinator;
pub mod error;
pub mod formatter;
pub mod summary;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{SaleError, SaleResult};
pub use formatter::{format_sale, ProductSummary, SaleItemView, SaleView};
pub use summary::{summarize, DailyRevenue, SalesSummary};

use chrono::Utc;
use serde::Serialize;
use tracing::debug;

use tillpoint_core::{price_sale, validate_sale_draft, SaleDraft};
use tillpoint_db::{Database, DbError};

/// The listing endpoint's payload: every sale, formatted, plus aggregates.
#[derive(Debug, Clone, Serialize)]
pub struct SalesListing {
    pub sales: Vec<SaleView>,
    pub summary: SalesSummary,
}

/// The engine facade the HTTP layer talks to.
///
/// Cheap to clone; clones share the database pool.
#[derive(Debug, Clone)]
pub struct SaleEngine {
    db: Database,
}

impl SaleEngine {
    /// Creates an engine over an open database.
    pub fn new(db: Database) -> Self {
        SaleEngine { db }
    }

    /// Access to the underlying database (catalog seeding, tests).
    pub fn database(&self) -> &Database {
        &self.db
    }

    /// Runs the full sale-commit pipeline and returns the formatted sale.
    pub async fn create_sale(&self, draft: &SaleDraft) -> SaleResult<SaleView> {
        let validated = validate_sale_draft(draft)?;
        debug!(
            attendant_id = %validated.attendant_id,
            items = validated.items.len(),
            "sale request validated"
        );

        let arbitrated = arbiter::arbitrate(&self.db.products(), &validated).await?;
        let priced = price_sale(&arbitrated.lines, validated.discount)?;
        let sale =
            coordinator::commit_sale(&self.db, &validated, &priced, &arbitrated.products).await?;

        let listed = self
            .db
            .sales()
            .get_listed(&sale.id)
            .await?
            .ok_or_else(|| SaleError::Internal(DbError::not_found("sale", &sale.id)))?;

        Ok(formatter::format_sale(&listed))
    }

    /// Lists every recorded sale, newest first, with the sales summary.
    pub async fn list_sales(&self) -> SaleResult<SalesListing> {
        let listed = self.db.sales().list_all().await?;
        let summary = summary::summarize(&listed, Utc::now().date_naive());
        let sales = listed.iter().map(formatter::format_sale).collect();
        Ok(SalesListing { sales, summary })
    }
}
