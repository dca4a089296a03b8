//! Catalog browsing commands.

use fsblends_core::{
    CandleCollection, CandleSize, ContainerColor, Price, Product, ProductType, Selection, Variant,
};
use fsblends_storefront::{Catalog, StorefrontError};

/// Print products, optionally filtered by type and collection.
#[allow(clippy::print_stdout)]
pub fn list(
    catalog: &Catalog,
    product_type: Option<ProductType>,
    collection: Option<CandleCollection>,
) {
    let products = catalog.products().iter().filter(|p| {
        product_type.is_none_or(|t| p.product_type == t)
            && collection.is_none_or(|c| p.collection == Some(c))
    });

    let mut count = 0usize;
    for product in products {
        count += 1;
        let from = lowest_price(catalog.variants(product.slug.as_str()))
            .map_or_else(|| "-".to_owned(), |p| format!("from {p}"));
        println!(
            "{:<32} {:<28} {:<12} {}",
            product.slug.as_str(),
            product.display_name,
            product.product_type.as_str(),
            from
        );
    }
    tracing::debug!(count, "Listed products");
}

/// Print a product's variant table and the options a shopper would see.
///
/// # Errors
///
/// Returns `UnknownProduct` if the slug is not in the catalog.
#[allow(clippy::print_stdout)]
pub fn variants(catalog: &Catalog, slug: &str) -> Result<(), StorefrontError> {
    let product = find(catalog, slug)?;
    let resolver = catalog.resolver();

    println!("{} ({})", product.display_name, product.slug);
    if !product.notes.is_empty() {
        println!("  {}", product.notes);
    }

    let rows = catalog.variants(slug);
    if rows.is_empty() {
        println!("  no variants");
        return Ok(());
    }
    for variant in rows {
        let stock = if variant.in_stock { "" } else { "  (sold out)" };
        println!(
            "  {:<16} {:<14} {:>8}{stock}",
            variant.id.as_str(),
            variant.option_label(),
            variant.price.display()
        );
    }

    if !resolver.needs_choice(slug) {
        println!("  no options to choose");
        return Ok(());
    }
    let sizes: Vec<_> = resolver.list_sizes(slug).into_iter().map(CandleSize::label).collect();
    println!("  sizes: {}", sizes.join(", "));
    if resolver.shows_color_picker(slug) {
        let colors: Vec<_> = resolver
            .list_colors(slug, None)
            .into_iter()
            .map(ContainerColor::as_str)
            .collect();
        println!("  colors: {}", colors.join(", "));
    }
    Ok(())
}

/// Resolve a selection, falling back to the repaired selection when it is
/// incomplete or not offered.
///
/// # Errors
///
/// Returns an error for an unknown product, a product with nothing in stock or
/// a failure to encode JSON output.
#[allow(clippy::print_stdout)]
pub fn resolve(
    catalog: &Catalog,
    slug: &str,
    size: Option<CandleSize>,
    color: Option<ContainerColor>,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    find(catalog, slug)?;
    let resolver = catalog.resolver();
    let selection = Selection::new(size, color);

    let coerced = resolver.coerce(slug, selection);
    let variant = resolver
        .resolve(slug, &coerced)
        .ok_or_else(|| StorefrontError::Unresolved {
            product: slug.to_owned(),
            selection,
        })?;

    if json {
        println!("{}", serde_json::to_string_pretty(variant)?);
        return Ok(());
    }

    if coerced != selection {
        println!("Selection adjusted to {}", variant.option_label());
    }
    println!("{}  {}  {}", variant.id, variant.option_label(), variant.price);
    println!("line: {}", variant.line_id());
    Ok(())
}

fn find<'a>(catalog: &'a Catalog, slug: &str) -> Result<&'a Product, StorefrontError> {
    catalog
        .product(slug)
        .ok_or_else(|| StorefrontError::UnknownProduct(slug.to_owned()))
}

fn lowest_price(variants: &[Variant]) -> Option<Price> {
    variants.iter().filter(|v| v.in_stock).map(|v| v.price).min()
}
