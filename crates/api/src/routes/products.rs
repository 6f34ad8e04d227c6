//! Product catalog endpoints.

use std::sync::Arc;

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use catalog::{
    InventoryStats, NewProduct, ProductQuery, ProductRepository, ProductUpdate, SortBy,
};
use common::{Money, Product};
use serde::Deserialize;

use crate::error::ApiError;

/// Number of related products returned when no limit is given.
const DEFAULT_RELATED_LIMIT: usize = 4;

/// Shared application state accessible from all handlers.
pub struct AppState<R: ProductRepository> {
    pub catalog: R,
}

// -- Request types --

/// Query string accepted by `GET /api/products`.
#[derive(Debug, Default, Deserialize)]
pub struct ListParams {
    pub q: Option<String>,
    /// Comma-separated category names.
    pub category: Option<String>,
    /// Cents.
    pub min_price: Option<i64>,
    /// Cents.
    pub max_price: Option<i64>,
    pub sort: Option<SortBy>,
    pub limit: Option<usize>,
}

impl ListParams {
    fn into_query(self) -> Result<ProductQuery, ApiError> {
        if let (Some(min), Some(max)) = (self.min_price, self.max_price)
            && min > max
        {
            return Err(ApiError::BadRequest(
                "min_price must not exceed max_price".to_string(),
            ));
        }

        let mut query = ProductQuery::new().sort(self.sort.unwrap_or_default());
        if let Some(text) = self.q {
            query = query.text(text);
        }
        if let Some(min) = self.min_price {
            query = query.min_price(Money::from_cents(min));
        }
        if let Some(max) = self.max_price {
            query = query.max_price(Money::from_cents(max));
        }
        for category in self.category.iter().flat_map(|c| c.split(',')) {
            let category = category.trim();
            if !category.is_empty() {
                query = query.category(category);
            }
        }
        if let Some(limit) = self.limit {
            query = query.limit(limit);
        }
        Ok(query)
    }
}

#[derive(Debug, Deserialize)]
pub struct RelatedParams {
    pub limit: Option<usize>,
}

// -- Handlers --

/// GET /api/products: search the catalog.
#[tracing::instrument(skip(state))]
pub async fn list<R: ProductRepository + 'static>(
    State(state): State<Arc<AppState<R>>>,
    Query(params): Query<ListParams>,
) -> Result<Json<Vec<Product>>, ApiError> {
    let query = params.into_query()?;
    let products = state.catalog.search(&query).await?;
    Ok(Json(products))
}

/// POST /api/products: add a product.
#[tracing::instrument(skip(state, req))]
pub async fn create<R: ProductRepository + 'static>(
    State(state): State<Arc<AppState<R>>>,
    Json(req): Json<NewProduct>,
) -> Result<(StatusCode, Json<Product>), ApiError> {
    let product = state.catalog.create(req).await?;
    Ok((StatusCode::CREATED, Json(product)))
}

/// GET /api/products/{slug}
#[tracing::instrument(skip(state))]
pub async fn get<R: ProductRepository + 'static>(
    State(state): State<Arc<AppState<R>>>,
    Path(slug): Path<String>,
) -> Result<Json<Product>, ApiError> {
    let product = state.catalog.get_by_slug(&slug).await?;
    Ok(Json(product))
}

/// PUT /api/products/{slug}: partial update.
#[tracing::instrument(skip(state, req))]
pub async fn update<R: ProductRepository + 'static>(
    State(state): State<Arc<AppState<R>>>,
    Path(slug): Path<String>,
    Json(req): Json<ProductUpdate>,
) -> Result<Json<Product>, ApiError> {
    let product = state.catalog.update(&slug, req).await?;
    Ok(Json(product))
}

/// DELETE /api/products/{slug}
#[tracing::instrument(skip(state))]
pub async fn delete<R: ProductRepository + 'static>(
    State(state): State<Arc<AppState<R>>>,
    Path(slug): Path<String>,
) -> Result<StatusCode, ApiError> {
    state.catalog.delete(&slug).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/products/{slug}/related: same-category recommendations.
#[tracing::instrument(skip(state))]
pub async fn related<R: ProductRepository + 'static>(
    State(state): State<Arc<AppState<R>>>,
    Path(slug): Path<String>,
    Query(params): Query<RelatedParams>,
) -> Result<Json<Vec<Product>>, ApiError> {
    let product = state.catalog.get_by_slug(&slug).await?;
    let limit = params.limit.unwrap_or(DEFAULT_RELATED_LIMIT);
    let related = state.catalog.related(&product, limit).await?;
    Ok(Json(related))
}

/// GET /api/categories
#[tracing::instrument(skip(state))]
pub async fn categories<R: ProductRepository + 'static>(
    State(state): State<Arc<AppState<R>>>,
) -> Result<Json<Vec<String>>, ApiError> {
    let categories = state.catalog.categories().await?;
    Ok(Json(categories))
}

/// GET /api/stats: inventory figures for the admin dashboard.
#[tracing::instrument(skip(state))]
pub async fn stats<R: ProductRepository + 'static>(
    State(state): State<Arc<AppState<R>>>,
) -> Result<Json<InventoryStats>, ApiError> {
    let stats = state.catalog.stats().await?;
    Ok(Json(stats))
}
