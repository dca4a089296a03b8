//! Crate-level error type.

use fsblends_core::Selection;
use thiserror::Error;

use crate::catalog::CatalogError;
use crate::config::ConfigError;
use crate::storage::StorageError;

/// Errors surfaced by storefront operations.
///
/// Cart mutations themselves never fail; these cover the steps around them:
/// finding the product, resolving a selection and loading configuration or data.
#[derive(Debug, Error)]
pub enum StorefrontError {
    /// No product with this slug.
    #[error("Unknown product: {0}")]
    UnknownProduct(String),

    /// The selection does not match an in-stock variant.
    #[error("No in-stock variant of {product} for {selection:?}")]
    Unresolved {
        product: String,
        selection: Selection,
    },

    /// The product has several variants, so a quick add is not possible.
    #[error("Product {0} needs a size or color choice")]
    ChoiceRequired(String),

    /// Catalog loading failed.
    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),

    /// Configuration was invalid.
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    /// Client storage failed.
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}
