use std::collections::BTreeSet;
use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use common::{Money, Product, ProductId, slugify};
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::{
    CatalogError, InventoryStats, ProductQuery, Result,
    repository::{DEFAULT_IMAGE, NewProduct, ProductRepository, ProductUpdate},
};

const DEMO_FIXTURE: &str = include_str!("../data/products.json");

/// In-memory product catalog.
///
/// Seeded from a JSON fixture; admin changes live for the lifetime of the
/// process only.
#[derive(Clone, Default)]
pub struct InMemoryCatalog {
    products: Arc<RwLock<Vec<Product>>>,
}

impl InMemoryCatalog {
    /// Creates an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a catalog holding `products`.
    pub fn with_products(products: Vec<Product>) -> Self {
        Self {
            products: Arc::new(RwLock::new(products)),
        }
    }

    /// Parses a JSON array of products.
    pub fn from_json(json: &str) -> Result<Self> {
        let products: Vec<Product> = serde_json::from_str(json)?;
        Ok(Self::with_products(products))
    }

    /// Reads a JSON fixture from disk.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Returns the built-in catalog of watches.
    pub fn demo() -> Result<Self> {
        Self::from_json(DEMO_FIXTURE)
    }

    /// Returns the number of products.
    pub async fn len(&self) -> usize {
        self.products.read().await.len()
    }

    /// Returns true if the catalog has no products.
    pub async fn is_empty(&self) -> bool {
        self.products.read().await.is_empty()
    }
}

fn record(operation: &'static str) {
    metrics::counter!("catalog_requests_total", "operation" => operation).increment(1);
}

fn require(field: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(CatalogError::Invalid(format!("{field} is required")));
    }
    Ok(())
}

fn require_price(field: &str, price: Money) -> Result<()> {
    if price.cents() < 0 {
        return Err(CatalogError::Invalid(format!("{field} must not be negative")));
    }
    Ok(())
}

#[async_trait]
impl ProductRepository for InMemoryCatalog {
    async fn list(&self) -> Result<Vec<Product>> {
        record("list");
        let products = self.products.read().await;
        Ok(ProductQuery::new().apply(products.iter()))
    }

    async fn get_by_id(&self, id: &ProductId) -> Result<Product> {
        record("get");
        self.products
            .read()
            .await
            .iter()
            .find(|p| &p.id == id)
            .cloned()
            .ok_or_else(|| CatalogError::NotFound(id.to_string()))
    }

    async fn get_by_slug(&self, slug: &str) -> Result<Product> {
        record("get");
        self.products
            .read()
            .await
            .iter()
            .find(|p| p.slug == slug)
            .cloned()
            .ok_or_else(|| CatalogError::NotFound(slug.to_string()))
    }

    #[tracing::instrument(skip(self))]
    async fn search(&self, query: &ProductQuery) -> Result<Vec<Product>> {
        record("search");
        let products = self.products.read().await;
        let results = query.apply(products.iter());
        tracing::debug!(matches = results.len(), "Catalog search");
        Ok(results)
    }

    async fn categories(&self) -> Result<Vec<String>> {
        record("categories");
        let products = self.products.read().await;
        let categories: BTreeSet<&str> = products.iter().map(|p| p.category.as_str()).collect();
        Ok(categories.into_iter().map(str::to_string).collect())
    }

    async fn stats(&self) -> Result<InventoryStats> {
        record("stats");
        let products = self.products.read().await;
        Ok(InventoryStats::from_products(products.iter()))
    }

    #[tracing::instrument(skip(self, product), fields(name = %product.name))]
    async fn create(&self, product: NewProduct) -> Result<Product> {
        record("create");
        require("name", &product.name)?;
        require("category", &product.category)?;
        require_price("price", product.price)?;

        let slug = slugify(&product.name);
        let mut products = self.products.write().await;
        if products.iter().any(|p| p.slug == slug) {
            return Err(CatalogError::DuplicateSlug(slug));
        }

        let created = Product {
            id: ProductId::new(Uuid::new_v4().to_string()),
            name: product.name.trim().to_string(),
            slug,
            description: product.description,
            price: product.price,
            original_price: product.original_price,
            category: product.category,
            inventory: product.inventory,
            image: product
                .image
                .filter(|image| !image.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_IMAGE.to_string()),
            last_updated: Utc::now(),
        };
        products.push(created.clone());

        tracing::info!(id = %created.id, slug = %created.slug, "Product created");
        Ok(created)
    }

    #[tracing::instrument(skip(self, update))]
    async fn update(&self, slug: &str, update: ProductUpdate) -> Result<Product> {
        record("update");
        if let Some(name) = &update.name {
            require("name", name)?;
        }
        if let Some(category) = &update.category {
            require("category", category)?;
        }
        if let Some(price) = update.price {
            require_price("price", price)?;
        }
        if let Some(Some(original_price)) = update.original_price {
            require_price("originalPrice", original_price)?;
        }

        let mut products = self.products.write().await;
        let product = products
            .iter_mut()
            .find(|p| p.slug == slug)
            .ok_or_else(|| CatalogError::NotFound(slug.to_string()))?;

        // Slugs are stable so existing links keep resolving after a rename.
        if let Some(name) = update.name {
            product.name = name.trim().to_string();
        }
        if let Some(description) = update.description {
            product.description = description;
        }
        if let Some(price) = update.price {
            product.price = price;
        }
        if let Some(original_price) = update.original_price {
            product.original_price = original_price;
        }
        if let Some(category) = update.category {
            product.category = category;
        }
        if let Some(inventory) = update.inventory {
            product.inventory = inventory;
        }
        if let Some(image) = update.image {
            product.image = image;
        }
        product.last_updated = Utc::now();

        tracing::info!(id = %product.id, "Product updated");
        Ok(product.clone())
    }

    #[tracing::instrument(skip(self))]
    async fn delete(&self, slug: &str) -> Result<()> {
        record("delete");
        let mut products = self.products.write().await;
        let position = products
            .iter()
            .position(|p| p.slug == slug)
            .ok_or_else(|| CatalogError::NotFound(slug.to_string()))?;
        let removed = products.remove(position);

        tracing::info!(id = %removed.id, "Product deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_product(name: &str) -> NewProduct {
        NewProduct {
            name: name.to_string(),
            description: "Field watch".to_string(),
            price: Money::from_dollars(450),
            original_price: None,
            category: "Field".to_string(),
            inventory: 4,
            image: None,
        }
    }

    #[tokio::test]
    async fn demo_fixture_loads() {
        let catalog = InMemoryCatalog::demo().unwrap();
        assert_eq!(catalog.len().await, 8);

        let categories = catalog.categories().await.unwrap();
        assert_eq!(categories, vec!["Chronograph", "Diving", "Dress", "Luxury"]);
    }

    #[tokio::test]
    async fn create_assigns_id_slug_and_default_image() {
        let catalog = InMemoryCatalog::new();

        let created = catalog.create(new_product("Khaki  Field Auto")).await.unwrap();

        assert_eq!(created.slug, "khaki-field-auto");
        assert_eq!(created.image, DEFAULT_IMAGE);
        assert!(Uuid::parse_str(created.id.as_str()).is_ok());
        assert_eq!(catalog.get_by_slug("khaki-field-auto").await.unwrap(), created);
        assert_eq!(catalog.get_by_id(&created.id).await.unwrap(), created);
    }

    #[tokio::test]
    async fn create_rejects_duplicate_slug() {
        let catalog = InMemoryCatalog::new();
        catalog.create(new_product("Khaki Field")).await.unwrap();

        let result = catalog.create(new_product("khaki field")).await;
        assert!(matches!(result, Err(CatalogError::DuplicateSlug(slug)) if slug == "khaki-field"));
        assert_eq!(catalog.len().await, 1);
    }

    #[tokio::test]
    async fn create_validates_fields() {
        let catalog = InMemoryCatalog::new();

        let result = catalog.create(new_product("   ")).await;
        assert!(matches!(result, Err(CatalogError::Invalid(_))));

        let mut negative = new_product("Cheap");
        negative.price = Money::from_cents(-1);
        let result = catalog.create(negative).await;
        assert!(matches!(result, Err(CatalogError::Invalid(_))));
        assert!(catalog.is_empty().await);
    }

    #[tokio::test]
    async fn update_is_partial_and_keeps_slug() {
        let catalog = InMemoryCatalog::new();
        let created = catalog.create(new_product("Khaki Field")).await.unwrap();

        let updated = catalog
            .update(
                "khaki-field",
                ProductUpdate {
                    name: Some("Khaki Field Mechanical".to_string()),
                    inventory: Some(0),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.name, "Khaki Field Mechanical");
        assert_eq!(updated.slug, "khaki-field");
        assert_eq!(updated.inventory, 0);
        assert_eq!(updated.price, created.price);
        assert!(updated.last_updated >= created.last_updated);
    }

    #[tokio::test]
    async fn update_sets_and_clears_original_price() {
        let catalog = InMemoryCatalog::new();
        catalog.create(new_product("Khaki Field")).await.unwrap();

        let discounted = catalog
            .update(
                "khaki-field",
                ProductUpdate {
                    original_price: Some(Some(Money::from_dollars(500))),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert!(discounted.is_discounted());

        let untouched = catalog
            .update("khaki-field", ProductUpdate::default())
            .await
            .unwrap();
        assert_eq!(untouched.original_price, Some(Money::from_dollars(500)));

        let cleared = catalog
            .update(
                "khaki-field",
                ProductUpdate {
                    original_price: Some(None),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(cleared.original_price, None);
        assert!(!cleared.is_discounted());
    }

    #[tokio::test]
    async fn update_and_delete_unknown_slug_fail() {
        let catalog = InMemoryCatalog::new();

        let result = catalog.update("nope", ProductUpdate::default()).await;
        assert!(matches!(result, Err(CatalogError::NotFound(_))));

        let result = catalog.delete("nope").await;
        assert!(matches!(result, Err(CatalogError::NotFound(_))));
    }

    #[tokio::test]
    async fn delete_removes_product() {
        let catalog = InMemoryCatalog::new();
        catalog.create(new_product("Khaki Field")).await.unwrap();

        catalog.delete("khaki-field").await.unwrap();

        assert!(catalog.is_empty().await);
        assert!(matches!(
            catalog.get_by_slug("khaki-field").await,
            Err(CatalogError::NotFound(_))
        ));
    }

    #[test]
    fn malformed_fixture_is_rejected() {
        assert!(matches!(
            InMemoryCatalog::from_json("{\"not\":\"a list\"}"),
            Err(CatalogError::Deserialization(_))
        ));
    }
}
