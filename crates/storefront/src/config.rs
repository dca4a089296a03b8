//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Optional
//! - `FSBLENDS_DATA_DIR` - Directory backing durable client storage (default: .fsblends)
//! - `FSBLENDS_CART_KEY` - Namespace key the cart is persisted under (default: fsblends:cart)
//! - `FSBLENDS_CATALOG` - Path to a YAML catalog replacing the built-in one

use std::path::PathBuf;

use thiserror::Error;

use crate::cart::DEFAULT_CART_KEY;

const DEFAULT_DATA_DIR: &str = ".fsblends";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Storefront configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorefrontConfig {
    /// Directory for file-backed client storage
    pub data_dir: PathBuf,
    /// Storage key of the persisted cart
    pub cart_key: String,
    /// YAML catalog overriding the built-in catalog
    pub catalog_path: Option<PathBuf>,
}

impl Default for StorefrontConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            cart_key: DEFAULT_CART_KEY.to_string(),
            catalog_path: None,
        }
    }
}

impl StorefrontConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set to an invalid value.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Self::from_vars(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable source.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set to an invalid value.
    pub fn from_vars(var: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let data_dir = get_non_empty(&var, "FSBLENDS_DATA_DIR")?
            .map_or_else(|| PathBuf::from(DEFAULT_DATA_DIR), PathBuf::from);
        let cart_key =
            get_non_empty(&var, "FSBLENDS_CART_KEY")?.unwrap_or_else(|| DEFAULT_CART_KEY.to_string());
        validate_cart_key(&cart_key)?;
        let catalog_path = get_non_empty(&var, "FSBLENDS_CATALOG")?.map(PathBuf::from);

        Ok(Self {
            data_dir,
            cart_key,
            catalog_path,
        })
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get an optional variable, rejecting values that are set but blank.
fn get_non_empty(
    var: &impl Fn(&str) -> Option<String>,
    key: &str,
) -> Result<Option<String>, ConfigError> {
    match var(key) {
        None => Ok(None),
        Some(value) if value.trim().is_empty() => Err(ConfigError::InvalidEnvVar(
            key.to_string(),
            "must not be blank".to_string(),
        )),
        Some(value) => Ok(Some(value)),
    }
}

/// Cart keys end up in file names, so only a conservative charset is allowed.
fn validate_cart_key(key: &str) -> Result<(), ConfigError> {
    let valid = !key.starts_with('.')
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.' | ':'));
    if valid {
        Ok(())
    } else {
        Err(ConfigError::InvalidEnvVar(
            "FSBLENDS_CART_KEY".to_string(),
            format!("unsupported characters in '{key}'"),
        ))
    }
}
