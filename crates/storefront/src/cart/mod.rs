//! Cart store.
//!
//! The cart is owned by exactly one [`CartStore`]; callers mutate it only
//! through the store's operations. Every change to the line items is written
//! straight through to [`ClientStorage`] under a single namespace key, and the
//! store rehydrates from that key when constructed.
//!
//! Persistence never fails a cart operation: unreadable data loads as an empty
//! cart and failed writes are logged.

mod line;

pub use line::CartLineItem;

use fsblends_core::{Price, Quantity, Variant};
use tracing::instrument;

use crate::storage::ClientStorage;

/// Default namespace key for the persisted cart.
pub const DEFAULT_CART_KEY: &str = "fsblends:cart";

/// Line items plus the cart drawer flag.
#[derive(Debug)]
pub struct CartStore<S> {
    storage: S,
    key: String,
    items: Vec<CartLineItem>,
    drawer_open: bool,
}

impl<S: ClientStorage> CartStore<S> {
    /// Create a store, rehydrating line items from `storage[key]`.
    ///
    /// Absent or malformed data yields an empty cart. The drawer always
    /// starts closed.
    pub fn load(storage: S, key: impl Into<String>) -> Self {
        let key = key.into();
        let items = rehydrate(&storage, &key);
        tracing::debug!(key = %key, lines = items.len(), "Cart rehydrated");
        Self {
            storage,
            key,
            items,
            drawer_open: false,
        }
    }

    /// Line items in insertion order.
    #[must_use]
    pub fn line_items(&self) -> &[CartLineItem] {
        &self.items
    }

    /// Look up a line by id.
    #[must_use]
    pub fn line(&self, line_id: &str) -> Option<&CartLineItem> {
        self.items.iter().find(|line| line.line_id.as_str() == line_id)
    }

    /// Whether the cart has no lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Total number of units across all lines.
    #[must_use]
    pub fn unit_count(&self) -> u64 {
        self.items.iter().map(|line| u64::from(line.quantity)).sum()
    }

    /// Sum of every line's total.
    #[must_use]
    pub fn subtotal(&self) -> Price {
        self.items.iter().map(CartLineItem::line_total).sum()
    }

    /// Subtotal in cents.
    #[must_use]
    pub fn subtotal_minor_units(&self) -> u64 {
        self.subtotal().minor_units()
    }

    /// Add units of a resolved variant.
    ///
    /// Merges into the existing line for the same variant, otherwise appends a
    /// new line. The variant is trusted as-is; resolve it before calling.
    #[instrument(skip(self, variant, thumbnail), fields(variant = %variant.id))]
    pub fn add_item(
        &mut self,
        variant: &Variant,
        display_name: &str,
        quantity: Quantity,
        thumbnail: Option<&str>,
    ) {
        let line_id = variant.line_id();
        match self.items.iter_mut().find(|line| line.line_id == line_id) {
            Some(line) => {
                line.quantity = line.quantity.saturating_add(quantity.get());
                tracing::debug!(line = %line_id, quantity = line.quantity, "Merged into cart line");
            }
            None => {
                tracing::debug!(line = %line_id, quantity = quantity.get(), "Added cart line");
                self.items.push(CartLineItem {
                    line_id,
                    display_name: display_name.to_owned(),
                    unit_price: variant.price,
                    quantity: quantity.get(),
                    thumbnail: thumbnail.map(str::to_owned),
                });
            }
        }
        self.persist();
    }

    /// Add one unit to a line. No-op if the line does not exist.
    #[instrument(skip(self))]
    pub fn increment_item(&mut self, line_id: &str) {
        if let Some(line) = self.line_mut(line_id) {
            line.quantity = line.quantity.saturating_add(1);
            self.persist();
        }
    }

    /// Remove one unit from a line, removing the line when it reaches zero.
    ///
    /// No-op if the line does not exist.
    #[instrument(skip(self))]
    pub fn decrement_item(&mut self, line_id: &str) {
        let Some(position) = self.position(line_id) else {
            return;
        };
        let emptied = self.items.get_mut(position).is_some_and(|line| {
            line.quantity = line.quantity.saturating_sub(1);
            line.quantity == 0
        });
        if emptied {
            self.items.remove(position);
        }
        self.persist();
    }

    /// Remove a line entirely. No-op if the line does not exist.
    #[instrument(skip(self))]
    pub fn remove_item(&mut self, line_id: &str) {
        if let Some(position) = self.position(line_id) {
            self.items.remove(position);
            self.persist();
        }
    }

    /// Remove every line.
    #[instrument(skip(self))]
    pub fn clear(&mut self) {
        self.items.clear();
        self.persist();
    }

    /// Whether the cart drawer is showing.
    #[must_use]
    pub const fn is_drawer_open(&self) -> bool {
        self.drawer_open
    }

    /// Show the cart drawer.
    pub const fn open_drawer(&mut self) {
        self.drawer_open = true;
    }

    /// Hide the cart drawer.
    pub const fn close_drawer(&mut self) {
        self.drawer_open = false;
    }

    /// Flip the cart drawer.
    pub const fn toggle_drawer(&mut self) {
        self.drawer_open = !self.drawer_open;
    }

    /// Namespace key the cart is persisted under.
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// The storage backend.
    #[must_use]
    pub const fn storage(&self) -> &S {
        &self.storage
    }

    fn position(&self, line_id: &str) -> Option<usize> {
        self.items
            .iter()
            .position(|line| line.line_id.as_str() == line_id)
    }

    fn line_mut(&mut self, line_id: &str) -> Option<&mut CartLineItem> {
        self.items
            .iter_mut()
            .find(|line| line.line_id.as_str() == line_id)
    }

    /// Write the full line list through to storage.
    fn persist(&self) {
        let json = match serde_json::to_string(&self.items) {
            Ok(json) => json,
            Err(e) => {
                tracing::error!(key = %self.key, "Failed to serialize cart: {e}");
                return;
            }
        };
        if let Err(e) = self.storage.set_item(&self.key, &json) {
            tracing::warn!(key = %self.key, "Failed to persist cart: {e}");
        }
    }
}

fn rehydrate<S: ClientStorage>(storage: &S, key: &str) -> Vec<CartLineItem> {
    let raw = match storage.get_item(key) {
        Ok(Some(raw)) => raw,
        Ok(None) => return Vec::new(),
        Err(e) => {
            tracing::warn!(key, "Failed to read persisted cart: {e}");
            return Vec::new();
        }
    };
    match serde_json::from_str::<Vec<CartLineItem>>(&raw) {
        Ok(items) => line::normalize(items),
        Err(e) => {
            tracing::warn!(key, "Discarding unreadable persisted cart: {e}");
            Vec::new()
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use fsblends_core::{CandleSize, ContainerColor, ProductSlug, VariantId};
    use proptest::prelude::*;

    use super::*;
    use crate::storage::{MemoryStorage, StorageError};

    fn variant(size: CandleSize, color: Option<ContainerColor>, price: u64) -> Variant {
        Variant {
            id: VariantId::new(format!("gourmet-{size}")),
            product: ProductSlug::new("gourmet-treat"),
            size,
            color: color.into(),
            price: Price::from_minor_units(price),
            in_stock: true,
            image: None,
        }
    }

    fn qty(units: u32) -> Quantity {
        Quantity::new(units).unwrap()
    }

    fn stored(storage: &MemoryStorage) -> serde_json::Value {
        let raw = storage.get_item(DEFAULT_CART_KEY).unwrap().unwrap();
        serde_json::from_str(&raw).unwrap()
    }

    #[test]
    fn test_starts_empty_and_closed() {
        let storage = MemoryStorage::new();
        let cart = CartStore::load(&storage, DEFAULT_CART_KEY);
        assert!(cart.is_empty());
        assert_eq!(cart.unit_count(), 0);
        assert_eq!(cart.subtotal(), Price::ZERO);
        assert!(!cart.is_drawer_open());
        assert!(storage.is_empty());
    }

    #[test]
    fn test_add_same_variant_merges() {
        let storage = MemoryStorage::new();
        let mut cart = CartStore::load(&storage, DEFAULT_CART_KEY);
        let black_8 = variant(CandleSize::Oz8, Some(ContainerColor::Black), 2800);

        cart.add_item(&black_8, "Gourmet Treat", qty(2), None);
        cart.add_item(&black_8, "Gourmet Treat", qty(3), None);

        assert_eq!(cart.line_items().len(), 1);
        let line = cart.line("gourmet-treat-8oz-black").unwrap();
        assert_eq!(line.quantity, 5);
        assert_eq!(cart.unit_count(), 5);
        assert_eq!(cart.subtotal_minor_units(), 14_000);
    }

    #[test]
    fn test_add_distinct_variants_appends_in_order() {
        let storage = MemoryStorage::new();
        let mut cart = CartStore::load(&storage, DEFAULT_CART_KEY);
        cart.add_item(
            &variant(CandleSize::Oz10, Some(ContainerColor::White), 3500),
            "Gourmet Treat",
            qty(1),
            Some("/img/10.jpg"),
        );
        cart.add_item(&variant(CandleSize::Oz6, None, 2200), "Gourmet Treat", qty(1), None);

        let ids: Vec<_> = cart.line_items().iter().map(|l| l.line_id.as_str()).collect();
        assert_eq!(ids, ["gourmet-treat-10oz-white", "gourmet-treat-6oz-default"]);
        assert_eq!(
            cart.line_items()[0].thumbnail.as_deref(),
            Some("/img/10.jpg")
        );
        assert_eq!(cart.subtotal_minor_units(), 5700);
    }

    #[test]
    fn test_increment_and_decrement() {
        let storage = MemoryStorage::new();
        let mut cart = CartStore::load(&storage, DEFAULT_CART_KEY);
        let black_6 = variant(CandleSize::Oz6, Some(ContainerColor::Black), 2200);
        cart.add_item(&black_6, "Gourmet Treat", qty(1), None);
        let id = black_6.line_id();

        cart.increment_item(id.as_str());
        assert_eq!(cart.line(id.as_str()).unwrap().quantity, 2);

        cart.decrement_item(id.as_str());
        assert_eq!(cart.line(id.as_str()).unwrap().quantity, 1);

        cart.decrement_item(id.as_str());
        assert!(cart.line(id.as_str()).is_none());
        assert!(cart.is_empty());
        assert_eq!(stored(&storage), serde_json::json!([]));
    }

    #[test]
    fn test_unknown_line_is_noop() {
        let storage = MemoryStorage::new();
        let mut cart = CartStore::load(&storage, DEFAULT_CART_KEY);
        cart.increment_item("missing");
        cart.decrement_item("missing");
        cart.remove_item("missing");
        assert!(cart.is_empty());
        assert!(storage.is_empty());
    }

    #[test]
    fn test_remove_and_clear() {
        let storage = MemoryStorage::new();
        let mut cart = CartStore::load(&storage, DEFAULT_CART_KEY);
        let a = variant(CandleSize::Oz6, Some(ContainerColor::Black), 2200);
        let b = variant(CandleSize::Oz8, Some(ContainerColor::Black), 2800);
        cart.add_item(&a, "Gourmet Treat", qty(4), None);
        cart.add_item(&b, "Gourmet Treat", qty(1), None);

        cart.remove_item(a.line_id().as_str());
        assert_eq!(cart.line_items().len(), 1);
        assert_eq!(cart.unit_count(), 1);

        cart.clear();
        assert!(cart.is_empty());
        assert_eq!(stored(&storage), serde_json::json!([]));
    }

    #[test]
    fn test_every_mutation_is_persisted() {
        let storage = MemoryStorage::new();
        let mut cart = CartStore::load(&storage, DEFAULT_CART_KEY);
        let white_10 = variant(CandleSize::Oz10, Some(ContainerColor::White), 3500);

        cart.add_item(&white_10, "Gourmet Treat", qty(2), None);
        assert_eq!(
            stored(&storage),
            serde_json::json!([
                {"id": "gourmet-treat-10oz-white", "name": "Gourmet Treat", "price": 3500, "qty": 2}
            ])
        );

        cart.increment_item(white_10.line_id().as_str());
        assert_eq!(stored(&storage)[0]["qty"], 3);
    }

    #[test]
    fn test_rehydrates_previous_session() {
        let storage = MemoryStorage::new();
        {
            let mut cart = CartStore::load(&storage, DEFAULT_CART_KEY);
            cart.add_item(
                &variant(CandleSize::Oz8, Some(ContainerColor::Black), 2800),
                "Gourmet Treat",
                qty(2),
                None,
            );
            cart.open_drawer();
        }

        let cart = CartStore::load(&storage, DEFAULT_CART_KEY);
        assert_eq!(cart.unit_count(), 2);
        assert_eq!(cart.subtotal_minor_units(), 5600);
        assert!(!cart.is_drawer_open());
    }

    #[test]
    fn test_malformed_storage_loads_empty() {
        for raw in ["{not json", "{}", "[{\"id\":\"x\"}]", "[{\"id\":\"x\",\"name\":\"n\",\"price\":-5,\"qty\":1}]"] {
            let storage = MemoryStorage::with_item(DEFAULT_CART_KEY, raw);
            let cart = CartStore::load(&storage, DEFAULT_CART_KEY);
            assert!(cart.is_empty(), "expected empty cart for {raw}");
            assert_eq!(cart.unit_count(), 0);
        }
    }

    #[test]
    fn test_rehydrate_normalizes_lines() {
        let raw = r#"[
            {"id":"a","name":"A","price":100,"qty":1},
            {"id":"b","name":"B","price":200,"qty":0},
            {"id":"a","name":"A","price":100,"qty":2}
        ]"#;
        let storage = MemoryStorage::with_item(DEFAULT_CART_KEY, raw);
        let cart = CartStore::load(&storage, DEFAULT_CART_KEY);
        assert_eq!(cart.line_items().len(), 1);
        assert_eq!(cart.unit_count(), 3);
    }

    #[test]
    fn test_drawer_flag() {
        let storage = MemoryStorage::new();
        let mut cart = CartStore::load(&storage, DEFAULT_CART_KEY);
        cart.toggle_drawer();
        assert!(cart.is_drawer_open());
        cart.toggle_drawer();
        assert!(!cart.is_drawer_open());
        cart.open_drawer();
        cart.open_drawer();
        assert!(cart.is_drawer_open());
        cart.close_drawer();
        assert!(!cart.is_drawer_open());
        // The drawer flag never reaches storage.
        assert!(storage.is_empty());
    }

    /// Storage whose reads and writes always fail.
    struct BrokenStorage;

    impl ClientStorage for BrokenStorage {
        fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
            Err(StorageError::InvalidKey(key.to_owned()))
        }

        fn set_item(&self, key: &str, _value: &str) -> Result<(), StorageError> {
            Err(StorageError::InvalidKey(key.to_owned()))
        }

        fn remove_item(&self, key: &str) -> Result<(), StorageError> {
            Err(StorageError::InvalidKey(key.to_owned()))
        }
    }

    #[test]
    fn test_storage_failures_do_not_break_cart() {
        let mut cart = CartStore::load(BrokenStorage, DEFAULT_CART_KEY);
        let black_6 = variant(CandleSize::Oz6, Some(ContainerColor::Black), 2200);
        cart.add_item(&black_6, "Gourmet Treat", qty(1), None);
        cart.increment_item(black_6.line_id().as_str());
        assert_eq!(cart.unit_count(), 2);
    }

    #[derive(Debug, Clone)]
    enum Op {
        Add(usize, u32),
        Increment(usize),
        Decrement(usize),
        Remove(usize),
    }

    fn op() -> impl Strategy<Value = Op> {
        prop_oneof![
            (0..4usize, 1..5u32).prop_map(|(v, q)| Op::Add(v, q)),
            (0..4usize).prop_map(Op::Increment),
            (0..4usize).prop_map(Op::Decrement),
            (0..4usize).prop_map(Op::Remove),
        ]
    }

    proptest! {
        #[test]
        fn aggregates_match_lines(ops in prop::collection::vec(op(), 0..40)) {
            let variants = [
                variant(CandleSize::Oz6, Some(ContainerColor::Black), 2200),
                variant(CandleSize::Oz6, Some(ContainerColor::White), 2200),
                variant(CandleSize::Oz8, Some(ContainerColor::Black), 2800),
                variant(CandleSize::Oz10, Some(ContainerColor::White), 3500),
            ];
            let storage = MemoryStorage::new();
            let mut cart = CartStore::load(&storage, DEFAULT_CART_KEY);

            for op in ops {
                match op {
                    Op::Add(v, q) => cart.add_item(&variants[v], "Gourmet Treat", qty(q), None),
                    Op::Increment(v) => cart.increment_item(variants[v].line_id().as_str()),
                    Op::Decrement(v) => cart.decrement_item(variants[v].line_id().as_str()),
                    Op::Remove(v) => cart.remove_item(variants[v].line_id().as_str()),
                }

                let lines = cart.line_items();
                prop_assert!(lines.iter().all(|l| l.quantity >= 1));
                let mut ids: Vec<_> = lines.iter().map(|l| l.line_id.clone()).collect();
                ids.sort();
                ids.dedup();
                prop_assert_eq!(ids.len(), lines.len());
                prop_assert_eq!(
                    cart.unit_count(),
                    lines.iter().map(|l| u64::from(l.quantity)).sum::<u64>()
                );
                prop_assert_eq!(
                    cart.subtotal_minor_units(),
                    lines.iter().map(|l| u64::from(l.quantity) * l.unit_price.minor_units()).sum::<u64>()
                );
            }

            let reloaded = CartStore::load(&storage, DEFAULT_CART_KEY);
            prop_assert_eq!(reloaded.line_items(), cart.line_items());
        }
    }
}
