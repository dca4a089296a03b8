//! Integration tests for the FS Blends storefront.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p fsblends-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `variant_resolution` - Resolver scenarios against the built-in catalog
//! - `cart_persistence` - Cart sessions over memory and file storage

use std::sync::Arc;

use fsblends_storefront::{AppState, Catalog, ClientStorage, FileStorage, StorefrontConfig};
use tempfile::TempDir;

/// The built-in catalog, shared the way sessions share it.
///
/// # Panics
///
/// Panics if the built-in catalog fails validation.
#[must_use]
#[allow(clippy::expect_used)]
pub fn builtin_catalog() -> Arc<Catalog> {
    Arc::new(Catalog::builtin().expect("built-in catalog is valid"))
}

/// A session over the built-in catalog with default configuration.
#[must_use]
pub fn session<S: ClientStorage>(storage: S) -> AppState<S> {
    AppState::new(StorefrontConfig::default(), builtin_catalog(), storage)
}

/// A data directory that lives as long as the returned guard.
pub struct DataDir {
    dir: TempDir,
}

impl DataDir {
    /// Create a fresh, empty data directory.
    ///
    /// # Panics
    ///
    /// Panics if the temporary directory cannot be created.
    #[must_use]
    #[allow(clippy::expect_used)]
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().expect("create temp dir"),
        }
    }

    /// Configuration pointing storage at this directory.
    #[must_use]
    pub fn config(&self) -> StorefrontConfig {
        StorefrontConfig {
            data_dir: self.dir.path().to_path_buf(),
            ..StorefrontConfig::default()
        }
    }

    /// File storage rooted at this directory.
    #[must_use]
    pub fn storage(&self) -> FileStorage {
        FileStorage::new(self.dir.path())
    }

    /// Start a new session backed by this directory.
    ///
    /// # Panics
    ///
    /// Panics if the built-in catalog fails validation.
    #[must_use]
    #[allow(clippy::expect_used)]
    pub fn session(&self) -> AppState<FileStorage> {
        AppState::from_config(self.config()).expect("session starts")
    }
}

impl Default for DataDir {
    fn default() -> Self {
        Self::new()
    }
}
