//! Catalog store and variant table.
//!
//! Both tables are supplied wholesale at startup and never change afterwards.
//! Construction validates the invariants every other component relies on:
//! unique product slugs, unique variant ids, variants that reference a known
//! product, one in-stock variant per size/color pair, and a consistent color
//! dimension per product.

mod source;

pub use source::{BUILTIN_CATALOG, CatalogDocument, ProductRecord, VariantRecord};

use std::collections::{HashMap, HashSet};
use std::path::PathBuf;

use fsblends_core::{
    CandleCollection, CandleSize, Product, ProductSlug, ProductType, Variant, VariantColor,
    VariantId,
};

use crate::resolver::VariantResolver;

/// Errors that can occur while loading or validating a catalog.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("failed to read catalog {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse catalog: {0}")]
    Parse(#[from] serde_yaml::Error),
    #[error("product name {0:?} does not produce a usable slug")]
    EmptySlug(String),
    #[error("duplicate product slug: {0}")]
    DuplicateProduct(ProductSlug),
    #[error("variants listed for unknown product: {0}")]
    UnknownProduct(ProductSlug),
    #[error("duplicate variant id: {0}")]
    DuplicateVariant(VariantId),
    #[error("product {product} has more than one in-stock {size}/{color} variant")]
    DuplicateCombination {
        product: ProductSlug,
        size: CandleSize,
        color: &'static str,
    },
    #[error("product {0} mixes colored and uncolored variants")]
    MixedColorDimension(ProductSlug),
}

/// Immutable product catalog with its variant table.
#[derive(Debug, Clone)]
pub struct Catalog {
    products: Vec<Product>,
    index: HashMap<ProductSlug, usize>,
    variants: HashMap<ProductSlug, Vec<Variant>>,
}

impl Catalog {
    /// Build a catalog from its two tables.
    ///
    /// Variant order is preserved per product; it is the "catalog order" the
    /// resolver uses to break ties.
    ///
    /// # Errors
    ///
    /// Returns a `CatalogError` describing the first invariant violation found.
    pub fn new(products: Vec<Product>, variants: Vec<Variant>) -> Result<Self, CatalogError> {
        let mut index = HashMap::with_capacity(products.len());
        for (position, product) in products.iter().enumerate() {
            if product.slug.as_str().is_empty() {
                return Err(CatalogError::EmptySlug(product.name.clone()));
            }
            if index.insert(product.slug.clone(), position).is_some() {
                return Err(CatalogError::DuplicateProduct(product.slug.clone()));
            }
        }

        let mut variant_ids = HashSet::with_capacity(variants.len());
        let mut by_product: HashMap<ProductSlug, Vec<Variant>> = HashMap::new();
        for variant in variants {
            if !index.contains_key(&variant.product) {
                return Err(CatalogError::UnknownProduct(variant.product));
            }
            if !variant_ids.insert(variant.id.clone()) {
                return Err(CatalogError::DuplicateVariant(variant.id));
            }
            by_product
                .entry(variant.product.clone())
                .or_default()
                .push(variant);
        }

        for (product, rows) in &by_product {
            validate_variant_rows(product, rows)?;
        }

        tracing::debug!(
            products = products.len(),
            variants = variant_ids.len(),
            "Catalog validated"
        );

        Ok(Self {
            products,
            index,
            variants: by_product,
        })
    }

    /// All products in catalog order.
    #[must_use]
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    /// Look up a product by slug.
    #[must_use]
    pub fn product(&self, slug: &str) -> Option<&Product> {
        self.index
            .get(slug)
            .and_then(|&position| self.products.get(position))
    }

    /// Variants of a product in catalog order; empty for unknown products.
    #[must_use]
    pub fn variants(&self, slug: &str) -> &[Variant] {
        self.variants
            .get(slug)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Products of one kind, in catalog order.
    pub fn products_of_type(&self, product_type: ProductType) -> impl Iterator<Item = &Product> {
        self.products
            .iter()
            .filter(move |p| p.product_type == product_type)
    }

    /// Products tagged into a collection, in catalog order.
    pub fn products_in_collection(
        &self,
        collection: CandleCollection,
    ) -> impl Iterator<Item = &Product> {
        self.products
            .iter()
            .filter(move |p| p.collection == Some(collection))
    }

    /// Number of products.
    #[must_use]
    pub fn len(&self) -> usize {
        self.products.len()
    }

    /// Whether the catalog has no products.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// Resolver over this catalog.
    #[must_use]
    pub const fn resolver(&self) -> VariantResolver<'_> {
        VariantResolver::new(self)
    }
}

fn validate_variant_rows(product: &ProductSlug, rows: &[Variant]) -> Result<(), CatalogError> {
    let colored = rows.iter().filter(|v| v.color.is_colored()).count();
    if colored != 0 && colored != rows.len() {
        return Err(CatalogError::MixedColorDimension(product.clone()));
    }

    let mut seen: HashSet<(CandleSize, VariantColor)> = HashSet::new();
    for variant in rows.iter().filter(|v| v.in_stock) {
        if !seen.insert((variant.size, variant.color)) {
            return Err(CatalogError::DuplicateCombination {
                product: product.clone(),
                size: variant.size,
                color: variant.color.line_suffix(),
            });
        }
    }
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use fsblends_core::{ContainerColor, Price};

    use super::*;

    fn product(slug: &str) -> Product {
        Product {
            slug: ProductSlug::new(slug),
            name: slug.to_owned(),
            display_name: slug.to_owned(),
            notes: String::new(),
            product_type: ProductType::Candle,
            collection: Some(CandleCollection::Classic),
            image: None,
        }
    }

    fn variant(id: &str, product: &str, size: CandleSize, color: Option<ContainerColor>) -> Variant {
        Variant {
            id: VariantId::new(id),
            product: ProductSlug::new(product),
            size,
            color: color.into(),
            price: Price::from_minor_units(2200),
            in_stock: true,
            image: None,
        }
    }

    #[test]
    fn test_lookup_and_order() {
        let catalog = Catalog::new(
            vec![product("b"), product("a")],
            vec![
                variant("a-8", "a", CandleSize::Oz8, None),
                variant("a-6", "a", CandleSize::Oz6, None),
            ],
        )
        .unwrap();

        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.products()[0].slug.as_str(), "b");
        assert!(catalog.product("a").is_some());
        assert!(catalog.product("c").is_none());
        let ids: Vec<_> = catalog.variants("a").iter().map(|v| v.id.as_str()).collect();
        assert_eq!(ids, ["a-8", "a-6"]);
        assert!(catalog.variants("b").is_empty());
        assert!(catalog.variants("missing").is_empty());
    }

    #[test]
    fn test_rejects_duplicate_slug() {
        let result = Catalog::new(vec![product("a"), product("a")], vec![]);
        assert!(matches!(result, Err(CatalogError::DuplicateProduct(_))));
    }

    #[test]
    fn test_rejects_empty_slug() {
        let result = Catalog::new(vec![product("")], vec![]);
        assert!(matches!(result, Err(CatalogError::EmptySlug(_))));
    }

    #[test]
    fn test_rejects_orphan_variant() {
        let result = Catalog::new(
            vec![product("a")],
            vec![variant("x", "ghost", CandleSize::Oz6, None)],
        );
        assert!(matches!(result, Err(CatalogError::UnknownProduct(_))));
    }

    #[test]
    fn test_rejects_duplicate_variant_id() {
        let result = Catalog::new(
            vec![product("a"), product("b")],
            vec![
                variant("x", "a", CandleSize::Oz6, None),
                variant("x", "b", CandleSize::Oz6, None),
            ],
        );
        assert!(matches!(result, Err(CatalogError::DuplicateVariant(_))));
    }

    #[test]
    fn test_rejects_duplicate_in_stock_combination() {
        let result = Catalog::new(
            vec![product("a")],
            vec![
                variant("a1", "a", CandleSize::Oz6, Some(ContainerColor::Black)),
                variant("a2", "a", CandleSize::Oz6, Some(ContainerColor::Black)),
            ],
        );
        assert!(matches!(
            result,
            Err(CatalogError::DuplicateCombination { .. })
        ));
    }

    #[test]
    fn test_allows_duplicate_combination_when_out_of_stock() {
        let mut sold_out = variant("a2", "a", CandleSize::Oz6, Some(ContainerColor::Black));
        sold_out.in_stock = false;
        let result = Catalog::new(
            vec![product("a")],
            vec![
                variant("a1", "a", CandleSize::Oz6, Some(ContainerColor::Black)),
                sold_out,
            ],
        );
        assert!(result.is_ok());
    }

    #[test]
    fn test_rejects_mixed_color_dimension() {
        let result = Catalog::new(
            vec![product("a")],
            vec![
                variant("a1", "a", CandleSize::Oz6, Some(ContainerColor::Black)),
                variant("a2", "a", CandleSize::Oz8, None),
            ],
        );
        assert!(matches!(result, Err(CatalogError::MixedColorDimension(_))));
    }

    #[test]
    fn test_filters_by_type_and_collection() {
        let mut melt = product("melt");
        melt.product_type = ProductType::WaxMelt;
        melt.collection = None;
        let mut dessert = product("lassi");
        dessert.collection = Some(CandleCollection::Dessert);

        let catalog = Catalog::new(vec![product("fir"), melt, dessert], vec![]).unwrap();

        let melts: Vec<_> = catalog
            .products_of_type(ProductType::WaxMelt)
            .map(|p| p.slug.as_str())
            .collect();
        assert_eq!(melts, ["melt"]);
        let desserts: Vec<_> = catalog
            .products_in_collection(CandleCollection::Dessert)
            .map(|p| p.slug.as_str())
            .collect();
        assert_eq!(desserts, ["lassi"]);
    }
}
