use async_trait::async_trait;
use common::{Money, Product, ProductId};
use serde::{Deserialize, Deserializer, Serialize};

use crate::{InventoryStats, ProductQuery, Result};

/// Image used when a new product does not name one.
pub const DEFAULT_IMAGE: &str = "/images/watch1.jpg";

/// Fields supplied when creating a product.
///
/// The id, slug and timestamp are assigned by the repository.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewProduct {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub price: Money,
    #[serde(default)]
    pub original_price: Option<Money>,
    pub category: String,
    #[serde(default)]
    pub inventory: u32,
    #[serde(default)]
    pub image: Option<String>,
}

/// A partial product update. Absent fields are left unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductUpdate {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<Money>,
    /// `Some(None)` (JSON `null`) clears the compare-at price.
    #[serde(
        default,
        deserialize_with = "present",
        skip_serializing_if = "Option::is_none"
    )]
    pub original_price: Option<Option<Money>>,
    pub category: Option<String>,
    pub inventory: Option<u32>,
    pub image: Option<String>,
}

impl ProductUpdate {
    /// Returns true if the update changes nothing.
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}

/// Maps a present field to `Some`, keeping an explicit `null` apart from an
/// absent field.
fn present<'de, D, T>(deserializer: D) -> std::result::Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

/// Read and admin access to the product catalog.
///
/// Implementations must be thread-safe (Send + Sync).
#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// Returns every product, sorted by name.
    async fn list(&self) -> Result<Vec<Product>>;

    /// Looks up a product by id.
    async fn get_by_id(&self, id: &ProductId) -> Result<Product>;

    /// Looks up a product by slug.
    async fn get_by_slug(&self, slug: &str) -> Result<Product>;

    /// Returns the products matching `query`.
    async fn search(&self, query: &ProductQuery) -> Result<Vec<Product>>;

    /// Returns the distinct categories, sorted.
    async fn categories(&self) -> Result<Vec<String>>;

    /// Adds a product.
    ///
    /// Fails with `DuplicateSlug` if the derived slug is taken.
    async fn create(&self, product: NewProduct) -> Result<Product>;

    /// Applies a partial update to the product with `slug`.
    async fn update(&self, slug: &str, update: ProductUpdate) -> Result<Product>;

    /// Removes the product with `slug`.
    async fn delete(&self, slug: &str) -> Result<()>;

    /// Returns inventory statistics over the whole catalog.
    async fn stats(&self) -> Result<InventoryStats>;

    /// Returns up to `limit` other products in the same category.
    async fn related(&self, product: &Product, limit: usize) -> Result<Vec<Product>> {
        let query = ProductQuery::new().category(product.category.clone());
        let related = self
            .search(&query)
            .await?
            .into_iter()
            .filter(|candidate| candidate.id != product.id)
            .take(limit)
            .collect();
        Ok(related)
    }
}
