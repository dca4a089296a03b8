//! Variant resolution.
//!
//! Every surface that lets a shopper pick a size or container color goes
//! through [`VariantResolver`], so option availability, tie-breaking and
//! repair of stale selections behave identically everywhere.
//!
//! Only in-stock variants are ever offered or resolved. Ties are broken by
//! catalog order: the first matching variant in the variant table wins.

use std::collections::BTreeSet;

use fsblends_core::{CandleSize, ContainerColor, Price, Selection, Variant, VariantColor};

use crate::catalog::Catalog;

/// Pure queries over a catalog's variant table.
#[derive(Debug, Clone, Copy)]
pub struct VariantResolver<'a> {
    catalog: &'a Catalog,
}

fn in_stock(variants: &[Variant]) -> impl Iterator<Item = &Variant> {
    variants.iter().filter(|v| v.in_stock)
}

fn has_color_dimension(variants: &[Variant]) -> bool {
    variants.iter().any(|v| v.color.is_colored())
}

impl<'a> VariantResolver<'a> {
    /// Create a resolver over `catalog`.
    #[must_use]
    pub const fn new(catalog: &'a Catalog) -> Self {
        Self { catalog }
    }

    /// Sizes offered by at least one in-stock variant.
    #[must_use]
    pub fn list_sizes(&self, product: &str) -> BTreeSet<CandleSize> {
        in_stock(self.catalog.variants(product))
            .map(|v| v.size)
            .collect()
    }

    /// Colors offered together with `size`, or with any size when `size` is unset.
    ///
    /// Empty for products without a container choice.
    #[must_use]
    pub fn list_colors(
        &self,
        product: &str,
        size: Option<CandleSize>,
    ) -> BTreeSet<ContainerColor> {
        in_stock(self.catalog.variants(product))
            .filter(|v| size.is_none_or(|size| v.size == size))
            .filter_map(|v| v.color.color())
            .collect()
    }

    /// Selection of the first in-stock variant.
    ///
    /// Empty when the product has nothing to sell.
    #[must_use]
    pub fn default_selection(&self, product: &str) -> Selection {
        in_stock(self.catalog.variants(product))
            .next()
            .map_or_else(Selection::default, Variant::selection)
    }

    /// Resolve a complete selection to its variant.
    ///
    /// A size is always required; a color is required only when the product
    /// has a color dimension. Partial selections never resolve.
    #[must_use]
    pub fn resolve(&self, product: &str, selection: &Selection) -> Option<&'a Variant> {
        let size = selection.size?;
        let variants = self.catalog.variants(product);
        let colored = has_color_dimension(variants);
        in_stock(variants).find(|v| {
            v.size == size
                && (!colored
                    || selection
                        .color
                        .is_some_and(|color| v.color == VariantColor::Colored(color)))
        })
    }

    /// Repair a selection into one that resolves.
    ///
    /// A selection that already resolves is returned unchanged. Otherwise the
    /// chosen size is kept with its first in-stock color, and when there is no
    /// usable size the default selection is used. Products without in-stock
    /// variants coerce to the empty selection.
    #[must_use]
    pub fn coerce(&self, product: &str, selection: Selection) -> Selection {
        if self.resolve(product, &selection).is_some() {
            return selection;
        }

        let same_size = selection
            .size
            .and_then(|size| in_stock(self.catalog.variants(product)).find(|v| v.size == size));

        same_size.map_or_else(|| self.default_selection(product), Variant::selection)
    }

    /// Whether the shopper has anything to choose.
    ///
    /// Products with at most one in-stock variant are added without showing
    /// size or color controls.
    #[must_use]
    pub fn needs_choice(&self, product: &str) -> bool {
        in_stock(self.catalog.variants(product)).nth(1).is_some()
    }

    /// Whether a color picker is worth showing (more than one color offered).
    #[must_use]
    pub fn shows_color_picker(&self, product: &str) -> bool {
        self.list_colors(product, None).len() > 1
    }

    /// Price to show for an in-progress selection.
    ///
    /// Exact match first, then the first variant of the chosen size, then the
    /// default variant.
    #[must_use]
    pub fn price_preview(&self, product: &str, selection: Selection) -> Option<Price> {
        let coerced = self.coerce(product, selection);
        self.resolve(product, &coerced).map(|v| v.price)
    }
}
