use async_trait::async_trait;
use reqwest::{Client, Url};
#[cfg(not(target_arch = "wasm32"))]
use std::time::Duration;

use crate::errors::CoreError;
use crate::storage::format::CatalogDocument;
use super::traits::CatalogSource;

/// Fetches the catalog document over HTTP(S).
///
/// The URL must be absolute. A deployment that only knows the document's
/// relative path (`json/cards-pokemon-1.json`) builds the source with
/// `relative_to`, passing the page origin as the base.
pub struct HttpCatalogSource {
    client: Client,
    url: Url,
}

impl HttpCatalogSource {
    /// Source for an absolute catalog URL.
    pub fn new(url: &str) -> Result<Self, CoreError> {
        let url = Url::parse(url)
            .map_err(|e| CoreError::InvalidSettings(format!("Invalid catalog URL '{url}': {e}")))?;
        Ok(Self::from_url(url))
    }

    /// Source for `path` resolved against `base` (e.g. the page origin).
    pub fn relative_to(base: &str, path: &str) -> Result<Self, CoreError> {
        let base = Url::parse(base)
            .map_err(|e| CoreError::InvalidSettings(format!("Invalid base URL '{base}': {e}")))?;
        let url = base.join(path).map_err(|e| {
            CoreError::InvalidSettings(format!("Cannot resolve catalog path '{path}': {e}"))
        })?;
        Ok(Self::from_url(url))
    }

    fn from_url(url: Url) -> Self {
        let builder = Client::builder();
        #[cfg(not(target_arch = "wasm32"))]
        let builder = builder.timeout(Duration::from_secs(30));
        Self {
            client: builder.build().unwrap_or_else(|_| Client::new()),
            url,
        }
    }

    pub fn url(&self) -> &Url {
        &self.url
    }
}

#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
impl CatalogSource for HttpCatalogSource {
    fn name(&self) -> &str {
        "http"
    }

    async fn fetch(&self) -> Result<CatalogDocument, CoreError> {
        let response = self.client.get(self.url.clone()).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(CoreError::Fetch(format!(
                "{} answered with status {status}",
                self.url.path()
            )));
        }

        response
            .json::<CatalogDocument>()
            .await
            .map_err(|e| CoreError::Fetch(format!("Failed to parse catalog document: {e}")))
    }
}
