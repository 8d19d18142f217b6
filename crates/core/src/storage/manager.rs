use tracing::debug;

use crate::errors::CoreError;
use crate::models::cart::Cart;

use super::backend::KeyValueStore;
use super::format::{self, CatalogDocument};

/// High-level storage operations: typed save/load of the cart and the
/// product cache against any `KeyValueStore`.
pub struct StorageManager;

impl StorageManager {
    /// Persist the entire cart under `key`. Never writes a partial cart.
    ///
    /// Flow: Cart → JSON array → store.set(key)
    pub fn save_cart(store: &dyn KeyValueStore, key: &str, cart: &Cart) -> Result<(), CoreError> {
        let json = format::encode_cart(cart)?;
        store.set(key, &json)?;
        debug!(key, lines = cart.len(), "cart persisted");
        Ok(())
    }

    /// Load the cart stored under `key`. A missing entry is an empty cart.
    pub fn load_cart(store: &dyn KeyValueStore, key: &str) -> Result<Cart, CoreError> {
        match store.get(key)? {
            Some(json) => format::decode_cart(&json),
            None => Ok(Cart::new()),
        }
    }

    /// Mirror the catalog document so pages reached by navigation can
    /// resolve products without fetching again.
    pub fn save_catalog_cache(
        store: &dyn KeyValueStore,
        key: &str,
        document: &CatalogDocument,
    ) -> Result<(), CoreError> {
        let json = format::encode_catalog(document)?;
        store.set(key, &json)?;
        debug!(key, products = document.data.len(), "catalog cache written");
        Ok(())
    }

    /// Read the mirrored catalog. `Ok(None)` if nothing was cached.
    pub fn load_catalog_cache(
        store: &dyn KeyValueStore,
        key: &str,
    ) -> Result<Option<CatalogDocument>, CoreError> {
        store
            .get(key)?
            .map(|json| format::decode_catalog(&json))
            .transpose()
    }
}
