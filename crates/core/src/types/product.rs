//! Catalog products.

use core::fmt;

use serde::{Deserialize, Serialize};

use super::id::ProductSlug;

/// Kind of merchandise a product is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ProductType {
    Candle,
    WaxMelt,
    WaxSachet,
    WaxMelters,
    Bag,
    Clutch,
    Jewelry,
}

impl ProductType {
    /// Canonical kebab-case spelling.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Candle => "candle",
            Self::WaxMelt => "wax-melt",
            Self::WaxSachet => "wax-sachet",
            Self::WaxMelters => "wax-melters",
            Self::Bag => "bag",
            Self::Clutch => "clutch",
            Self::Jewelry => "jewelry",
        }
    }
}

impl fmt::Display for ProductType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ProductType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "candle" => Ok(Self::Candle),
            "wax-melt" => Ok(Self::WaxMelt),
            "wax-sachet" => Ok(Self::WaxSachet),
            "wax-melters" => Ok(Self::WaxMelters),
            "bag" => Ok(Self::Bag),
            "clutch" => Ok(Self::Clutch),
            "jewelry" => Ok(Self::Jewelry),
            _ => Err(format!("invalid product type: {s}")),
        }
    }
}

/// Candle collection a product is tagged into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CandleCollection {
    Classic,
    Dessert,
}

impl fmt::Display for CandleCollection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Classic => write!(f, "classic"),
            Self::Dessert => write!(f, "dessert"),
        }
    }
}

impl std::str::FromStr for CandleCollection {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "classic" => Ok(Self::Classic),
            "dessert" => Ok(Self::Dessert),
            _ => Err(format!("invalid collection: {s}")),
        }
    }
}

/// A product in the catalog.
///
/// Products are immutable once the catalog is loaded; the slug is the join
/// key to the variant table and to cart lines.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    /// URL-safe unique identifier.
    pub slug: ProductSlug,
    /// Internal name, unique across the catalog.
    pub name: String,
    /// Label shown to shoppers (wax melts reuse the candle's label).
    pub display_name: String,
    /// Scent notes.
    pub notes: String,
    /// Kind of merchandise.
    pub product_type: ProductType,
    /// Candle collection, if tagged into one.
    pub collection: Option<CandleCollection>,
    /// Card image path.
    pub image: Option<String>,
}

/// Derive a URL slug from a product name.
///
/// Lowercases the input, collapses every run of characters outside
/// `[a-z0-9]` into a single `-`, and trims leading and trailing dashes.
///
/// ```
/// use fsblends_core::slugify;
///
/// assert_eq!(slugify("First Love — Wax Melts"), "first-love-wax-melts");
/// assert_eq!(slugify("Little Mystery 1"), "little-mystery-1");
/// ```
#[must_use]
pub fn slugify(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    let mut pending_dash = false;
    for c in name.chars().flat_map(char::to_lowercase) {
        if c.is_ascii_lowercase() || c.is_ascii_digit() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.push(c);
        } else {
            pending_dash = true;
        }
    }
    slug
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_slugify_basic() {
        assert_eq!(slugify("Gourmet Treat"), "gourmet-treat");
        assert_eq!(slugify("Iced Mango Lassi"), "iced-mango-lassi");
    }

    #[test]
    fn test_slugify_collapses_and_trims() {
        assert_eq!(slugify("  Precious Memories - Wax Melts "), "precious-memories-wax-melts");
        assert_eq!(slugify("Minimal Plug-In Wax Melter"), "minimal-plug-in-wax-melter");
        assert_eq!(slugify("---"), "");
    }

    #[test]
    fn test_product_type_round_trip_str() {
        for ty in [ProductType::Candle, ProductType::WaxMelters, ProductType::Jewelry] {
            assert_eq!(ty.as_str().parse::<ProductType>().unwrap(), ty);
        }
        assert!("lamp".parse::<ProductType>().is_err());
    }

    #[test]
    fn test_product_type_serde_kebab_case() {
        let ty: ProductType = serde_yaml::from_str("wax-melt").unwrap();
        assert_eq!(ty, ProductType::WaxMelt);
    }
}
