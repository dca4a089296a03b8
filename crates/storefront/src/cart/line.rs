//! Cart line items and their persisted shape.

use fsblends_core::{LineId, Price};
use serde::{Deserialize, Serialize};

/// One row of the cart, unique per resolved variant.
///
/// Field names on the wire are the short names used by the persisted cart:
/// `{id, name, price, qty, image?}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLineItem {
    /// Derived from product slug, size and color.
    #[serde(rename = "id")]
    pub line_id: LineId,
    /// Product label at the time the line was added.
    #[serde(rename = "name")]
    pub display_name: String,
    /// Price of one unit, in cents.
    #[serde(rename = "price")]
    pub unit_price: Price,
    /// Number of units; never zero while the line is in a cart.
    #[serde(rename = "qty")]
    pub quantity: u32,
    /// Thumbnail image path.
    #[serde(rename = "image", default, skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<String>,
}

impl CartLineItem {
    /// Price of all units on this line.
    #[must_use]
    pub fn line_total(&self) -> Price {
        self.unit_price.times(self.quantity)
    }
}

/// Restore the cart invariants on a rehydrated list.
///
/// Zero-quantity lines are dropped and repeated ids are merged into the first
/// occurrence, keeping insertion order.
pub(super) fn normalize(items: Vec<CartLineItem>) -> Vec<CartLineItem> {
    let mut lines: Vec<CartLineItem> = Vec::with_capacity(items.len());
    for item in items.into_iter().filter(|item| item.quantity > 0) {
        match lines.iter_mut().find(|line| line.line_id == item.line_id) {
            Some(line) => line.quantity = line.quantity.saturating_add(item.quantity),
            None => lines.push(item),
        }
    }
    lines
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn line(id: &str, quantity: u32) -> CartLineItem {
        CartLineItem {
            line_id: LineId::new(id),
            display_name: "First Love".to_owned(),
            unit_price: Price::from_minor_units(2200),
            quantity,
            thumbnail: None,
        }
    }

    #[test]
    fn test_wire_format() {
        let mut item = line("first-love-6oz-black", 2);
        let json = serde_json::to_string(&item).unwrap();
        assert_eq!(
            json,
            r#"{"id":"first-love-6oz-black","name":"First Love","price":2200,"qty":2}"#
        );

        item.thumbnail = Some("/images/products/first-love-10oz.jpg".to_owned());
        let json = serde_json::to_value(&item).unwrap();
        assert_eq!(json["image"], "/images/products/first-love-10oz.jpg");
    }

    #[test]
    fn test_line_total() {
        assert_eq!(line("a", 3).line_total().minor_units(), 6600);
    }

    #[test]
    fn test_normalize_merges_and_drops() {
        let lines = normalize(vec![line("a", 1), line("b", 0), line("c", 2), line("a", 4)]);
        let summary: Vec<_> = lines
            .iter()
            .map(|l| (l.line_id.as_str(), l.quantity))
            .collect();
        assert_eq!(summary, [("a", 5), ("c", 2)]);
    }
}
