//! Value types shared by the storefront crates.

pub mod product;
pub mod types;

pub use product::{Product, slugify};
pub use types::{Money, ProductId};
