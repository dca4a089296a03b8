//! YAML catalog documents.
//!
//! The storefront ships with a built-in catalog compiled into the binary; an
//! alternative document can be loaded from disk at startup.

use std::collections::BTreeMap;
use std::path::Path;

use fsblends_core::{
    CandleCollection, CandleSize, ContainerColor, Price, Product, ProductSlug, ProductType,
    Variant, VariantId, slugify,
};
use serde::Deserialize;

use super::{Catalog, CatalogError};

/// Catalog shipped with the storefront.
pub const BUILTIN_CATALOG: &str = include_str!("../../data/catalog.yaml");

/// A catalog document as written in YAML.
#[derive(Debug, Clone, Deserialize)]
pub struct CatalogDocument {
    pub products: Vec<ProductRecord>,
    /// Variants keyed by product slug.
    #[serde(default)]
    pub variants: BTreeMap<ProductSlug, Vec<VariantRecord>>,
}

/// A product entry in a catalog document.
#[derive(Debug, Clone, Deserialize)]
pub struct ProductRecord {
    /// Internal name; should be unique so derived slugs stay unique.
    pub name: String,
    /// Label shown to shoppers. Falls back to `name`.
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub notes: String,
    #[serde(rename = "type")]
    pub product_type: ProductType,
    /// Candles only.
    #[serde(default)]
    pub collection: Option<CandleCollection>,
    #[serde(default)]
    pub image: Option<String>,
    /// Explicit slug override; derived from `name` when absent.
    #[serde(default)]
    pub slug: Option<String>,
}

/// A variant entry in a catalog document.
#[derive(Debug, Clone, Deserialize)]
pub struct VariantRecord {
    pub id: VariantId,
    pub size: CandleSize,
    /// Omitted for products without a container choice.
    #[serde(default, alias = "container")]
    pub color: Option<ContainerColor>,
    /// Price in cents.
    pub price: Price,
    #[serde(default = "default_in_stock")]
    pub in_stock: bool,
    #[serde(default)]
    pub image: Option<String>,
}

const fn default_in_stock() -> bool {
    true
}

impl ProductRecord {
    fn into_product(self) -> Product {
        let slug = self.slug.unwrap_or_else(|| slugify(&self.name));
        Product {
            slug: ProductSlug::new(slug),
            display_name: self.display_name.unwrap_or_else(|| self.name.clone()),
            name: self.name,
            notes: self.notes,
            product_type: self.product_type,
            collection: self.collection,
            image: self.image,
        }
    }
}

impl VariantRecord {
    fn into_variant(self, product: ProductSlug) -> Variant {
        Variant {
            id: self.id,
            product,
            size: self.size,
            color: self.color.into(),
            price: self.price,
            in_stock: self.in_stock,
            image: self.image,
        }
    }
}

impl CatalogDocument {
    /// Parse a YAML catalog document.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::Parse` if the YAML is malformed.
    pub fn from_yaml(yaml: &str) -> Result<Self, CatalogError> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Validate the document and build the catalog.
    ///
    /// # Errors
    ///
    /// Returns the first invariant violation found.
    pub fn into_catalog(self) -> Result<Catalog, CatalogError> {
        let products = self
            .products
            .into_iter()
            .map(ProductRecord::into_product)
            .collect();
        let variants = self
            .variants
            .into_iter()
            .flat_map(|(product, rows)| {
                rows.into_iter()
                    .map(move |row| row.into_variant(product.clone()))
            })
            .collect();
        Catalog::new(products, variants)
    }
}

impl Catalog {
    /// Parse and validate a YAML catalog.
    ///
    /// # Errors
    ///
    /// Returns an error if the YAML is malformed or violates a catalog invariant.
    pub fn from_yaml_str(yaml: &str) -> Result<Self, CatalogError> {
        CatalogDocument::from_yaml(yaml)?.into_catalog()
    }

    /// Load a YAML catalog from disk.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, or if its contents are
    /// malformed or invalid.
    pub fn from_path(path: &Path) -> Result<Self, CatalogError> {
        let yaml = std::fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let catalog = Self::from_yaml_str(&yaml)?;
        tracing::info!(path = %path.display(), products = catalog.len(), "Loaded catalog");
        Ok(catalog)
    }

    /// The catalog shipped with the storefront.
    ///
    /// # Errors
    ///
    /// Returns an error only if the built-in document is invalid, which the
    /// test suite guards against.
    pub fn builtin() -> Result<Self, CatalogError> {
        Self::from_yaml_str(BUILTIN_CATALOG)
    }
}
