//! FS Blends storefront library.
//!
//! Catalog loading, variant resolution and the persisted cart behind the
//! storefront's product pages, quick-add buttons and cart drawer.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod catalog;
pub mod config;
pub mod error;
pub mod resolver;
pub mod state;
pub mod storage;

pub use cart::{CartLineItem, CartStore, DEFAULT_CART_KEY};
pub use catalog::{Catalog, CatalogError};
pub use config::{ConfigError, StorefrontConfig};
pub use error::StorefrontError;
pub use resolver::VariantResolver;
pub use state::AppState;
pub use storage::{ClientStorage, FileStorage, MemoryStorage, StorageError};
