//! Application state shared across handlers.

use std::sync::Arc;

use crate::config::StorefrontConfig;
use crate::shopify::StorefrontApi;

/// Application state shared across all handlers.
///
/// Cheaply cloneable via `Arc`.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: StorefrontConfig,
    storefront: Arc<dyn StorefrontApi>,
}

impl AppState {
    /// Create a new application state around a Storefront API implementation.
    #[must_use]
    pub fn new(config: StorefrontConfig, storefront: Arc<dyn StorefrontApi>) -> Self {
        Self {
            inner: Arc::new(AppStateInner { config, storefront }),
        }
    }

    /// Get a reference to the storefront configuration.
    #[must_use]
    pub fn config(&self) -> &StorefrontConfig {
        &self.inner.config
    }

    /// Shared handle to the Storefront API, for moving into spawned fetches.
    #[must_use]
    pub fn storefront(&self) -> Arc<dyn StorefrontApi> {
        Arc::clone(&self.inner.storefront)
    }
}
