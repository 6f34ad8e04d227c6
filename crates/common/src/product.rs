//! Catalog product record.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{Money, ProductId};

/// A product as supplied by the catalog.
///
/// Stores keep their own copy of the record; nothing outside the catalog
/// ever mutates one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub slug: String,
    pub description: String,
    pub price: Money,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_price: Option<Money>,
    pub category: String,
    pub inventory: u32,
    pub image: String,
    pub last_updated: DateTime<Utc>,
}

impl Product {
    /// Returns true if at least one unit is available.
    pub fn in_stock(&self) -> bool {
        self.inventory > 0
    }

    /// Returns true if the product is listed below its original price.
    pub fn is_discounted(&self) -> bool {
        self.original_price.is_some_and(|original| original > self.price)
    }
}

/// Derives a URL slug from a product name.
///
/// Lower-cases the name and collapses every whitespace run into a single `-`.
pub fn slugify(name: &str) -> String {
    name.split_whitespace()
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join("-")
}
