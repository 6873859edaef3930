//! Application state shared across handlers.

use std::sync::Arc;

use crate::cart::{CartService, CartStore, PersistenceBridge};
use crate::catalog::{CatalogClient, CatalogError};
use crate::config::StorefrontConfig;

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc` and provides access to
/// shared resources like the catalog client and the cart service.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: StorefrontConfig,
    catalog: CatalogClient,
    cart: CartService,
}

impl AppState {
    /// Create a new application state.
    ///
    /// Wires the cart service to a persistence bridge over the configured
    /// store and hydrates it once from durable storage.
    ///
    /// # Errors
    ///
    /// Returns an error if the catalog HTTP client cannot be constructed.
    pub fn new(config: StorefrontConfig) -> Result<Self, CatalogError> {
        let catalog = CatalogClient::new(&config.catalog)?;

        let store = CartStore::new(config.cart_store_path.clone());
        let mut cart = CartService::new();
        cart.register(Box::new(PersistenceBridge::new(store.clone())));

        // Startup hydration: durable store -> aggregate, exactly once.
        let restored = store.load();
        if !restored.is_empty() {
            tracing::info!(items = restored.len(), "restored cart from durable storage");
        }
        cart.hydrate(restored);

        Ok(Self {
            inner: Arc::new(AppStateInner {
                config,
                catalog,
                cart,
            }),
        })
    }

    /// Get a reference to the storefront configuration.
    #[must_use]
    pub fn config(&self) -> &StorefrontConfig {
        &self.inner.config
    }

    /// Get a reference to the catalog API client.
    #[must_use]
    pub fn catalog(&self) -> &CatalogClient {
        &self.inner.catalog
    }

    /// Get a reference to the cart service.
    #[must_use]
    pub fn cart(&self) -> &CartService {
        &self.inner.cart
    }
}
