//! Application state shared across handlers.

use std::sync::Arc;

use souk_core::{StoreFactory, Stores};

use crate::config::StorefrontConfig;

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc` and holds only immutable
/// configuration plus the store factory.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: StorefrontConfig,
    stores: Arc<dyn StoreFactory>,
}

impl AppState {
    /// Create a new application state.
    #[must_use]
    pub fn new(config: StorefrontConfig, stores: Arc<dyn StoreFactory>) -> Self {
        Self {
            inner: Arc::new(AppStateInner { config, stores }),
        }
    }

    /// Get a reference to the storefront configuration.
    #[must_use]
    pub fn config(&self) -> &StorefrontConfig {
        &self.inner.config
    }

    /// Stores in the anonymous server context.
    ///
    /// The storefront has no user sessions, so every request reads as anon.
    #[must_use]
    pub fn stores(&self) -> Arc<dyn Stores> {
        self.inner.stores.bind(None)
    }
}
