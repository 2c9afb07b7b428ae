//! # Engine Error Types
//!
//! The single error surface of the sale-commit path. Everything a caller can
//! see from `create_sale` / `list_sales` is a [`SaleError`].
//!
//! ## Two Flavors of "Not Enough Stock"
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  InsufficientStock   advisory check failed BEFORE the transaction.     │
//! │                      Nothing was attempted; stock is untouched.        │
//! │                                                                         │
//! │  StockChanged        the conditional decrement matched zero rows       │
//! │                      INSIDE the transaction: a concurrent sale claimed │
//! │                      the units between the advisory check and the      │
//! │                      commit. The whole transaction rolled back.        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

use tillpoint_core::{PricingError, Quantity, ValidationError};
use tillpoint_db::DbError;

/// Errors of the sale transaction engine.
#[derive(Debug, Error)]
pub enum SaleError {
    /// The raw request failed validation.
    #[error("{0}")]
    Validation(#[from] ValidationError),

    /// The validated request failed pricing.
    #[error("{0}")]
    Pricing(#[from] PricingError),

    /// One or more requested products do not exist. Ids are sorted.
    #[error("products not found: {}", ids.join(", "))]
    ProductsNotFound { ids: Vec<String> },

    /// The advisory stock check found less stock than requested.
    #[error(
        "insufficient stock for '{name}': available {available}, requested {requested}"
    )]
    InsufficientStock {
        product_id: String,
        name: String,
        available: Quantity,
        requested: Quantity,
    },

    /// Stock moved between the advisory check and the commit; the
    /// transaction was rolled back.
    #[error(
        "stock changed during checkout for '{name}': available {available}, requested {requested}"
    )]
    StockChanged {
        product_id: String,
        name: String,
        available: Quantity,
        requested: Quantity,
    },

    /// The supplied receipt number is already taken.
    #[error("receipt number '{0}' already exists")]
    DuplicateReceiptNumber(String),

    /// The commit protocol exceeded its time budget; the transaction was
    /// dropped and rolled back.
    #[error("sale transaction timed out")]
    TransactionTimeout,

    /// The transaction failed and was rolled back; no partial effect remains.
    #[error("sale transaction aborted: {0}")]
    TransactionAborted(String),

    /// A storage failure outside the commit protocol.
    #[error("database error: {0}")]
    Internal(#[from] DbError),
}

/// Result alias for engine operations.
pub type SaleResult<T> = Result<T, SaleError>;
