//! # tillpoint-core: Pure Business Logic for Tillpoint
//!
//! This crate is the **heart** of the sale transaction engine. It contains all
//! business logic as pure functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Tillpoint Sale-Commit Path                         │
//! │                                                                         │
//! │  HTTP Request (POST /api/sales)                                        │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │               ★ tillpoint-core (THIS CRATE) ★                   │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │   money   │  │ validation│  │  pricing  │  │   │
//! │  │   │  Product  │  │   Money   │  │ SaleDraft │  │ PricedSale│  │   │
//! │  │   │   Sale    │  │  Quantity │  │  checks   │  │  totals   │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  tillpoint-engine (arbiter + coordinator) → tillpoint-db (SQLite)      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Product, Stock, Sale, SaleItem, Attendant)
//! - [`money`] - Money and Quantity with integer arithmetic (no floating point!)
//! - [`validation`] - Sale-creation request validation
//! - [`pricing`] - Line totals, subtotal, discount and net total
//! - [`error`] - Domain error types
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: Every function is deterministic - same input = same output
//! 2. **No I/O**: Database, network, file system access is FORBIDDEN here
//! 3. **Integer Money**: All monetary values are in cents (i64) to avoid float errors
//! 4. **Explicit Errors**: All errors are typed, never strings or panics

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod money;
pub mod pricing;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use tillpoint_core::Money` instead of
// `use tillpoint_core::money::Money`

pub use error::{MoneyError, PricingError, ValidationError};
pub use money::{Money, Quantity};
pub use pricing::{price_sale, CatalogLine, PricedItem, PricedSale};
pub use types::*;
pub use validation::{validate_sale_draft, SaleDraft, SaleDraftItem, ValidatedItem, ValidatedSale};
