//! Application state shared across handlers.
//!
//! The cart is process-wide mutable state with a single writer at a time:
//! every mutation happens under one mutex, and the persistence write happens
//! before the lock is released, so a render never observes a cart the slot
//! file does not.

use std::sync::{Arc, Mutex};

use tiendita_core::{Cart, Catalog};

use crate::config::StorefrontConfig;
use crate::error::AppError;
use crate::persist::CartFileStore;

/// Application state shared across all handlers.
///
/// Cheaply cloneable via `Arc`.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: StorefrontConfig,
    catalog: Catalog,
    catalog_notice: Option<String>,
    cart: Mutex<Cart>,
    store: CartFileStore,
}

impl AppState {
    /// Create the application state, loading any persisted cart snapshot.
    ///
    /// `catalog_notice` carries the user-visible message shown when the
    /// catalog failed to load and the grid renders empty.
    #[must_use]
    pub fn new(
        config: StorefrontConfig,
        catalog: Catalog,
        catalog_notice: Option<String>,
    ) -> Self {
        let store = CartFileStore::new(config.cart_path.clone());
        let cart = Cart::from_lines(store.load());
        if !cart.is_empty() {
            tracing::info!(lines = cart.lines().len(), "restored persisted cart");
        }

        Self {
            inner: Arc::new(AppStateInner {
                config,
                catalog,
                catalog_notice,
                cart: Mutex::new(cart),
                store,
            }),
        }
    }

    /// Get a reference to the storefront configuration.
    #[must_use]
    pub fn config(&self) -> &StorefrontConfig {
        &self.inner.config
    }

    /// Get a reference to the product catalog.
    #[must_use]
    pub fn catalog(&self) -> &Catalog {
        &self.inner.catalog
    }

    /// The notice shown when the catalog failed to load, if any.
    #[must_use]
    pub fn catalog_notice(&self) -> Option<&str> {
        self.inner.catalog_notice.as_deref()
    }

    /// Snapshot the current cart for rendering.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Internal` if the cart mutex is poisoned.
    pub fn cart(&self) -> Result<Cart, AppError> {
        Ok(self.lock_cart()?.clone())
    }

    /// Run a mutation against the cart and return its result together with a
    /// snapshot of the cart afterwards.
    ///
    /// If the mutation changed anything, the persisted slot is overwritten
    /// before the lock is released. A failed write is logged and the session
    /// continues; nothing here is fatal.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Internal` if the cart mutex is poisoned.
    pub fn update_cart<T>(
        &self,
        mutate: impl FnOnce(&mut Cart) -> T,
    ) -> Result<(T, Cart), AppError> {
        let mut cart = self.lock_cart()?;
        let before = cart.clone();
        let outcome = mutate(&mut cart);

        if *cart != before
            && let Err(e) = self.inner.store.save(cart.lines())
        {
            tracing::error!(error = %e, "failed to persist cart");
        }

        Ok((outcome, cart.clone()))
    }

    fn lock_cart(&self) -> Result<std::sync::MutexGuard<'_, Cart>, AppError> {
        self.inner
            .cart
            .lock()
            .map_err(|_| AppError::Internal("cart state poisoned".to_string()))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::catalog::{self, CatalogSource};
    use std::time::Duration;
    use tiendita_core::ProductId;

    fn test_state(dir: &tempfile::TempDir) -> AppState {
        let config = StorefrontConfig {
            host: "127.0.0.1".parse().unwrap(),
            port: 0,
            cart_path: dir.path().join("cart.json"),
            catalog: CatalogSource::Builtin,
            checkout_delay: Duration::ZERO,
        };
        AppState::new(config, catalog::builtin(), None)
    }

    #[test]
    fn test_mutation_persists_and_snapshots() {
        let dir = tempfile::tempdir().unwrap();
        let state = test_state(&dir);
        let camiseta = state.catalog().get(ProductId::new(1)).unwrap().clone();

        let (quantity, snapshot) = state.update_cart(|cart| cart.add(&camiseta)).unwrap();
        assert_eq!(quantity, 1);
        assert_eq!(snapshot.item_count(), 1);

        // A fresh state over the same slot sees the persisted line
        let reloaded = test_state(&dir);
        assert_eq!(reloaded.cart().unwrap().item_count(), 1);
    }

    #[test]
    fn test_noop_mutation_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let state = test_state(&dir);

        // Empty-cart checkout mutates nothing, so no slot file appears
        let (_, snapshot) = state.update_cart(Cart::checkout).unwrap();
        assert!(snapshot.is_empty());
        assert!(!dir.path().join("cart.json").exists());
    }

    #[test]
    fn test_clear_persists_empty_collection() {
        let dir = tempfile::tempdir().unwrap();
        let state = test_state(&dir);
        let camiseta = state.catalog().get(ProductId::new(1)).unwrap().clone();
        let pantalon = state.catalog().get(ProductId::new(2)).unwrap().clone();

        state
            .update_cart(|cart| {
                cart.add(&camiseta);
                cart.add(&pantalon);
            })
            .unwrap();
        state.update_cart(Cart::clear).unwrap();

        let reloaded = test_state(&dir);
        assert!(reloaded.cart().unwrap().is_empty());
    }
}
