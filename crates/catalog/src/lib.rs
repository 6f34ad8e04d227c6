//! Product catalog for the storefront.
//!
//! This crate provides:
//! - `ProductRepository` trait for catalog reads and admin changes
//! - `InMemoryCatalog` seeded from a JSON fixture
//! - `ProductQuery` for text search, price and category filters, and sorting
//! - `InventoryStats` for the admin dashboard

pub mod error;
pub mod memory;
pub mod query;
pub mod repository;
pub mod stats;

pub use error::{CatalogError, Result};
pub use memory::InMemoryCatalog;
pub use query::{ProductQuery, SEARCH_DEFAULT_MAX_PRICE, SortBy};
pub use repository::{DEFAULT_IMAGE, NewProduct, ProductRepository, ProductUpdate};
pub use stats::{InventoryStats, LOW_STOCK_THRESHOLD};
