use async_trait::async_trait;

use crate::errors::CoreError;
use crate::storage::format::CatalogDocument;

/// Where the static catalog document comes from.
///
/// The storefront fetches it once per session. Implementations report any
/// transport, status, or parse failure as `CoreError::Fetch`.
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
pub trait CatalogSource: Send + Sync {
    /// Human-readable name of this source (for logs/errors).
    fn name(&self) -> &str;

    /// Fetch and parse the whole catalog document.
    async fn fetch(&self) -> Result<CatalogDocument, CoreError>;
}
