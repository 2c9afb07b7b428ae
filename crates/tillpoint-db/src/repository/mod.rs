//! # Repository Module
//!
//! Database repository implementations for Tillpoint.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Repository Pattern Explained                         │
//! │                                                                         │
//! │  Engine code                                                            │
//! │       │                                                                 │
//! │       │  db.products().fetch_with_stock(&ids)                          │
//! │       ▼                                                                 │
//! │  ProductRepository                                                     │
//! │       │  SQL query                                                      │
//! │       ▼                                                                 │
//! │  SQLite Database                                                       │
//! │                                                                         │
//! │  Benefits:                                                              │
//! │  • SQL is isolated in one place                                        │
//! │  • Clean separation of concerns                                        │
//! │  • Transaction-scoped statements take an explicit connection,          │
//! │    so the coordinator controls the commit boundary                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Available Repositories
//!
//! - [`product::ProductRepository`] - Catalog reads, the arbiter's joined fetch
//! - [`stock::StockRepository`] - Stock reads and the conditional decrement
//! - [`sale::SaleRepository`] - Sale/item inserts and the listing read side
//! - [`attendant::AttendantRepository`] - Attendant records

pub mod attendant;
pub mod product;
pub mod sale;
pub mod stock;
