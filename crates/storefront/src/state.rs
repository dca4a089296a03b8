//! Application state: the composition root wiring config, catalog and cart.

use std::sync::Arc;

use fsblends_core::{LineId, Quantity, Selection};
use tracing::instrument;

use crate::cart::CartStore;
use crate::catalog::Catalog;
use crate::config::StorefrontConfig;
use crate::error::StorefrontError;
use crate::resolver::VariantResolver;
use crate::storage::{ClientStorage, FileStorage};

/// One shopper session: a shared catalog plus the cart it fills.
///
/// The catalog is behind an `Arc` so sessions can share a single loaded copy.
#[derive(Debug)]
pub struct AppState<S> {
    config: StorefrontConfig,
    catalog: Arc<Catalog>,
    cart: CartStore<S>,
}

impl AppState<FileStorage> {
    /// Build state from configuration, backed by files under `data_dir`.
    ///
    /// The catalog comes from `catalog_path` when set, otherwise the built-in
    /// catalog is used.
    ///
    /// # Errors
    ///
    /// Returns an error if the catalog cannot be loaded.
    pub fn from_config(config: StorefrontConfig) -> Result<Self, StorefrontError> {
        let catalog = match &config.catalog_path {
            Some(path) => Catalog::from_path(path)?,
            None => Catalog::builtin()?,
        };
        let storage = FileStorage::new(&config.data_dir);
        Ok(Self::new(config, Arc::new(catalog), storage))
    }
}

impl<S: ClientStorage> AppState<S> {
    /// Create state over an already loaded catalog, rehydrating the cart.
    pub fn new(config: StorefrontConfig, catalog: Arc<Catalog>, storage: S) -> Self {
        let cart = CartStore::load(storage, config.cart_key.clone());
        tracing::info!(
            products = catalog.len(),
            cart_lines = cart.line_items().len(),
            "Storefront state ready"
        );
        Self {
            config,
            catalog,
            cart,
        }
    }

    /// Get a reference to the storefront configuration.
    #[must_use]
    pub const fn config(&self) -> &StorefrontConfig {
        &self.config
    }

    /// Get a reference to the catalog.
    #[must_use]
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Resolver over the catalog.
    #[must_use]
    pub fn resolver(&self) -> VariantResolver<'_> {
        self.catalog.resolver()
    }

    /// Get a reference to the cart.
    #[must_use]
    pub const fn cart(&self) -> &CartStore<S> {
        &self.cart
    }

    /// Get a mutable reference to the cart.
    pub const fn cart_mut(&mut self) -> &mut CartStore<S> {
        &mut self.cart
    }

    /// Resolve a selection and add it to the cart, then open the drawer.
    ///
    /// Returns the id of the line that received the units.
    ///
    /// # Errors
    ///
    /// Returns `UnknownProduct` if the slug is not in the catalog, or
    /// `Unresolved` if the selection matches no in-stock variant.
    #[instrument(skip(self))]
    pub fn add_selection(
        &mut self,
        product: &str,
        selection: Selection,
        quantity: Quantity,
    ) -> Result<LineId, StorefrontError> {
        let item = self
            .catalog
            .product(product)
            .ok_or_else(|| StorefrontError::UnknownProduct(product.to_string()))?;
        let variant = self
            .catalog
            .resolver()
            .resolve(product, &selection)
            .ok_or_else(|| StorefrontError::Unresolved {
                product: product.to_string(),
                selection,
            })?;
        debug_assert_eq!(variant.product.as_str(), product);

        let thumbnail = variant.image.as_deref().or(item.image.as_deref());
        self.cart
            .add_item(variant, &item.display_name, quantity, thumbnail);
        self.cart.open_drawer();
        Ok(variant.line_id())
    }

    /// Add one unit of a product that offers no choice.
    ///
    /// # Errors
    ///
    /// Returns `ChoiceRequired` if the product has several in-stock variants,
    /// `UnknownProduct` for an unknown slug and `Unresolved` when nothing is
    /// in stock.
    #[instrument(skip(self))]
    pub fn quick_add(&mut self, product: &str) -> Result<LineId, StorefrontError> {
        if self.catalog.product(product).is_none() {
            return Err(StorefrontError::UnknownProduct(product.to_string()));
        }
        let resolver = self.catalog.resolver();
        if resolver.needs_choice(product) {
            return Err(StorefrontError::ChoiceRequired(product.to_string()));
        }
        let selection = resolver.default_selection(product);
        self.add_selection(product, selection, Quantity::ONE)
    }
}
