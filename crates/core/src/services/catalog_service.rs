use rust_decimal::Decimal;
use tracing::{info, warn};

use crate::errors::CoreError;
use crate::models::catalog::Catalog;
use crate::models::product::Product;
use crate::providers::traits::CatalogSource;
use crate::storage::backend::KeyValueStore;
use crate::storage::format::CatalogDocument;
use crate::storage::manager::StorageManager;

/// Loads the catalog once per session and resolves products for the detail
/// view, either from memory or from the cross-page cache.
pub struct CatalogService {
    cache_key: String,
    default_price: Decimal,
}

impl CatalogService {
    pub fn new(cache_key: impl Into<String>, default_price: Decimal) -> Self {
        Self {
            cache_key: cache_key.into(),
            default_price,
        }
    }

    /// Fetch the catalog document, mirror it into the product cache and
    /// return the normalized catalog.
    ///
    /// Any failure to obtain the document is a `CoreError::Fetch`; the
    /// caller shows an empty catalog with an error message. A failed cache
    /// write is logged and does not fail the load.
    pub async fn load(
        &self,
        source: &dyn CatalogSource,
        store: &dyn KeyValueStore,
    ) -> Result<Catalog, CoreError> {
        let document = source.fetch().await.map_err(|e| match e {
            CoreError::Fetch(_) => e,
            other => CoreError::Fetch(other.to_string()),
        })?;

        if let Err(e) = StorageManager::save_catalog_cache(store, &self.cache_key, &document) {
            warn!(error = %e, "could not mirror catalog into the product cache");
        }

        let raw_count = document.data.len();
        let catalog = Catalog::from_raw(document.data, self.default_price);
        if catalog.len() < raw_count {
            warn!(
                dropped = raw_count - catalog.len(),
                "catalog entries without an id were skipped"
            );
        }
        info!(source = source.name(), products = catalog.len(), "catalog loaded");
        Ok(catalog)
    }

    /// Resolve a product from the in-memory catalog (in-page routing).
    pub fn resolve_loaded(&self, catalog: &Catalog, id: &str) -> Result<Product, CoreError> {
        if let Some(product) = catalog.find_by_id(id) {
            return Ok(product.clone());
        }
        legacy_index(id)
            .and_then(|idx| catalog.products().get(idx))
            .cloned()
            .ok_or_else(|| CoreError::ProductNotFound(id.to_string()))
    }

    /// Resolve a product from the cross-page cache (page navigation).
    ///
    /// Looks up by `id` first; links from older builds carried the catalog
    /// position instead, so a numeric `id` falls back to that index.
    pub fn resolve_cached(&self, store: &dyn KeyValueStore, id: &str) -> Result<Product, CoreError> {
        let document = match StorageManager::load_catalog_cache(store, &self.cache_key) {
            Ok(Some(document)) => document,
            Ok(None) => {
                return Err(CoreError::ProductNotFound(format!(
                    "{id} (no cached catalog, open the catalog first)"
                )))
            }
            Err(e) => {
                warn!(error = %e, "product cache is unreadable");
                return Err(CoreError::ProductNotFound(format!(
                    "{id} (cached catalog is unreadable)"
                )));
            }
        };
        self.resolve_in_document(document, id)
    }

    fn resolve_in_document(&self, document: CatalogDocument, id: &str) -> Result<Product, CoreError> {
        let mut data = document.data;

        if let Some(pos) = data.iter().position(|p| p.id.as_deref() == Some(id)) {
            let raw = data.swap_remove(pos);
            return Product::from_raw(raw, self.default_price)
                .ok_or_else(|| CoreError::ProductNotFound(id.to_string()));
        }

        match legacy_index(id) {
            Some(idx) if idx < data.len() => {
                warn!(index = idx, "resolving product by legacy catalog index");
                let raw = data.swap_remove(idx);
                Product::from_raw(raw, self.default_price)
                    .ok_or_else(|| CoreError::ProductNotFound(id.to_string()))
            }
            _ => Err(CoreError::ProductNotFound(id.to_string())),
        }
    }
}

fn legacy_index(id: &str) -> Option<usize> {
    id.trim().parse::<usize>().ok()
}
