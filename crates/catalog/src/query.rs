//! Product search, filtering and sorting.

use std::cmp::Ordering;
use std::str::FromStr;

use common::{Money, Product};
use serde::{Deserialize, Serialize};

/// Upper price bound the search page starts with ($10,000).
pub const SEARCH_DEFAULT_MAX_PRICE: Money = Money::from_cents(1_000_000);

/// Result ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SortBy {
    /// Alphabetical by name, ignoring case.
    #[default]
    Name,

    /// Cheapest first.
    PriceLow,

    /// Most expensive first.
    PriceHigh,

    /// Most recently updated first.
    Newest,
}

impl SortBy {
    /// Returns the wire name of the ordering.
    pub fn as_str(&self) -> &'static str {
        match self {
            SortBy::Name => "name",
            SortBy::PriceLow => "price-low",
            SortBy::PriceHigh => "price-high",
            SortBy::Newest => "newest",
        }
    }

    fn compare(&self, a: &Product, b: &Product) -> Ordering {
        match self {
            SortBy::Name => a
                .name
                .to_lowercase()
                .cmp(&b.name.to_lowercase())
                .then_with(|| a.name.cmp(&b.name)),
            SortBy::PriceLow => a.price.cmp(&b.price),
            SortBy::PriceHigh => b.price.cmp(&a.price),
            SortBy::Newest => b.last_updated.cmp(&a.last_updated),
        }
    }
}

impl FromStr for SortBy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "name" => Ok(SortBy::Name),
            "price-low" => Ok(SortBy::PriceLow),
            "price-high" => Ok(SortBy::PriceHigh),
            "newest" => Ok(SortBy::Newest),
            other => Err(format!("unknown sort order: {other}")),
        }
    }
}

impl std::fmt::Display for SortBy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Builder for catalog searches.
///
/// Every filter left at its default matches all products.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductQuery {
    /// Case-insensitive substring of the name or description.
    pub text: Option<String>,

    /// Minimum price (inclusive).
    pub min_price: Option<Money>,

    /// Maximum price (inclusive).
    pub max_price: Option<Money>,

    /// Accepted categories; empty accepts every category.
    pub categories: Vec<String>,

    /// Result ordering.
    pub sort: SortBy,

    /// Maximum number of products to return.
    pub limit: Option<usize>,
}

impl ProductQuery {
    /// Creates a query that matches everything, sorted by name.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a query with the search page's initial price range.
    pub fn search_defaults() -> Self {
        Self::new()
            .min_price(Money::zero())
            .max_price(SEARCH_DEFAULT_MAX_PRICE)
    }

    /// Filters by free text.
    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    /// Filters to products at or above `price`.
    pub fn min_price(mut self, price: Money) -> Self {
        self.min_price = Some(price);
        self
    }

    /// Filters to products at or below `price`.
    pub fn max_price(mut self, price: Money) -> Self {
        self.max_price = Some(price);
        self
    }

    /// Adds an accepted category.
    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.categories.push(category.into());
        self
    }

    /// Sets the ordering.
    pub fn sort(mut self, sort: SortBy) -> Self {
        self.sort = sort;
        self
    }

    /// Limits the number of results.
    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Returns true if `product` passes every filter.
    pub fn matches(&self, product: &Product) -> bool {
        let matches_text = match self.text.as_deref().map(str::trim) {
            None | Some("") => true,
            Some(text) => {
                let needle = text.to_lowercase();
                product.name.to_lowercase().contains(&needle)
                    || product.description.to_lowercase().contains(&needle)
            }
        };

        let matches_price = self.min_price.is_none_or(|min| product.price >= min)
            && self.max_price.is_none_or(|max| product.price <= max);

        let matches_category =
            self.categories.is_empty() || self.categories.contains(&product.category);

        matches_text && matches_price && matches_category
    }

    /// Filters, sorts and limits `products`.
    pub fn apply<'a>(&self, products: impl IntoIterator<Item = &'a Product>) -> Vec<Product> {
        let mut results: Vec<Product> = products
            .into_iter()
            .filter(|p| self.matches(p))
            .cloned()
            .collect();

        results.sort_by(|a, b| self.sort.compare(a, b));

        if let Some(limit) = self.limit {
            results.truncate(limit);
        }
        results
    }
}
