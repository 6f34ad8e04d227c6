//! HTTP catalog API for the watch storefront.
//!
//! Provides REST endpoints for product search and catalog administration,
//! with structured logging (tracing) and Prometheus metrics.

pub mod config;
pub mod error;
pub mod routes;

use std::sync::Arc;

use axum::Router;
use axum::routing::get;
use catalog::{InMemoryCatalog, ProductRepository};
use metrics_exporter_prometheus::PrometheusHandle;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use config::Config;
use routes::products::AppState;

/// Creates the Axum application router with all routes and shared state.
pub fn create_app<R: ProductRepository + 'static>(
    state: Arc<AppState<R>>,
    metrics_handle: PrometheusHandle,
) -> Router {
    let metrics_router = Router::new()
        .route("/metrics", get(routes::metrics::get))
        .with_state(metrics_handle);

    Router::new()
        .route("/health", get(routes::health::check))
        .route(
            "/api/products",
            get(routes::products::list::<R>).post(routes::products::create::<R>),
        )
        .route(
            "/api/products/{slug}",
            get(routes::products::get::<R>)
                .put(routes::products::update::<R>)
                .delete(routes::products::delete::<R>),
        )
        .route(
            "/api/products/{slug}/related",
            get(routes::products::related::<R>),
        )
        .route("/api/categories", get(routes::products::categories::<R>))
        .route("/api/stats", get(routes::products::stats::<R>))
        .with_state(state)
        .merge(metrics_router)
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
}

/// Loads the catalog named by `config`, or the built-in watches.
pub fn load_catalog(config: &Config) -> catalog::Result<InMemoryCatalog> {
    match &config.catalog_path {
        Some(path) => {
            tracing::info!(path = %path.display(), "loading catalog fixture");
            InMemoryCatalog::from_path(path)
        }
        None => InMemoryCatalog::demo(),
    }
}

/// Creates the application state around `catalog`.
pub fn create_state<R: ProductRepository + 'static>(catalog: R) -> Arc<AppState<R>> {
    Arc::new(AppState { catalog })
}
