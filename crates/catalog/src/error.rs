//! Catalog error types.

use thiserror::Error;

/// Errors that can occur during catalog operations.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// No product has the given slug or id.
    #[error("Product not found: {0}")]
    NotFound(String),

    /// Another product already uses the slug.
    #[error("Duplicate slug: {0}")]
    DuplicateSlug(String),

    /// A product field failed validation.
    #[error("Invalid product: {0}")]
    Invalid(String),

    /// The fixture file could not be read.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The fixture could not be parsed.
    #[error("Fixture deserialization error: {0}")]
    Deserialization(#[from] serde_json::Error),
}

/// Result type for catalog operations.
pub type Result<T> = std::result::Result<T, CatalogError>;
