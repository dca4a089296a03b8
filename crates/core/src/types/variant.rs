//! Purchasable product variants.

use serde::{Deserialize, Serialize};

use super::id::{LineId, ProductSlug, VariantId};
use super::options::{CandleSize, ContainerColor, VariantColor};
use super::price::Price;
use super::selection::Selection;

/// A concretely priced size/color combination of a product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "VariantRecord", into = "VariantRecord")]
pub struct Variant {
    /// Unique variant identifier (SKU).
    pub id: VariantId,
    /// Product this variant belongs to.
    pub product: ProductSlug,
    /// Candle size.
    pub size: CandleSize,
    /// Container color, or [`VariantColor::Uncolored`].
    pub color: VariantColor,
    /// Unit price.
    pub price: Price,
    /// Whether the variant can currently be bought.
    pub in_stock: bool,
    /// Variant-specific image path.
    pub image: Option<String>,
}

impl Variant {
    /// Cart line id for this variant: `{product}-{size}-{color|default}`.
    ///
    /// ```
    /// use fsblends_core::{CandleSize, ContainerColor, Price, Variant, VariantColor};
    ///
    /// let variant = Variant {
    ///     id: "gourmet-8-b".into(),
    ///     product: "gourmet-treat".into(),
    ///     size: CandleSize::Oz8,
    ///     color: VariantColor::Colored(ContainerColor::Black),
    ///     price: Price::from_minor_units(2800),
    ///     in_stock: true,
    ///     image: None,
    /// };
    /// assert_eq!(variant.line_id().as_str(), "gourmet-treat-8oz-black");
    /// ```
    #[must_use]
    pub fn line_id(&self) -> LineId {
        LineId::new(format!(
            "{}-{}-{}",
            self.product,
            self.size,
            self.color.line_suffix()
        ))
    }

    /// The selection that picks exactly this variant.
    #[must_use]
    pub const fn selection(&self) -> Selection {
        Selection::new(Some(self.size), self.color.color())
    }

    /// Short option label (e.g., "8 oz / black", or "10 oz" when uncolored).
    #[must_use]
    pub fn option_label(&self) -> String {
        match self.color {
            VariantColor::Uncolored => self.size.label().to_owned(),
            VariantColor::Colored(color) => format!("{} / {color}", self.size.label()),
        }
    }
}

/// Flat wire shape of a variant, with color as an optional field.
#[derive(Serialize, Deserialize)]
struct VariantRecord {
    id: VariantId,
    product: ProductSlug,
    size: CandleSize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    color: Option<ContainerColor>,
    price: Price,
    #[serde(default = "default_in_stock")]
    in_stock: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    image: Option<String>,
}

const fn default_in_stock() -> bool {
    true
}

impl From<VariantRecord> for Variant {
    fn from(record: VariantRecord) -> Self {
        Self {
            id: record.id,
            product: record.product,
            size: record.size,
            color: record.color.into(),
            price: record.price,
            in_stock: record.in_stock,
            image: record.image,
        }
    }
}

impl From<Variant> for VariantRecord {
    fn from(variant: Variant) -> Self {
        Self {
            id: variant.id,
            product: variant.product,
            size: variant.size,
            color: variant.color.color(),
            price: variant.price,
            in_stock: variant.in_stock,
            image: variant.image,
        }
    }
}
