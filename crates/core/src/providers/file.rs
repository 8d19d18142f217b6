use async_trait::async_trait;
use std::path::PathBuf;

use crate::errors::CoreError;
use crate::storage::format::{self, CatalogDocument};
use super::traits::CatalogSource;

/// Reads the catalog document from a local file (native only). Used for
/// offline builds and fixtures.
pub struct FileCatalogSource {
    path: PathBuf,
}

impl FileCatalogSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl CatalogSource for FileCatalogSource {
    fn name(&self) -> &str {
        "file"
    }

    async fn fetch(&self) -> Result<CatalogDocument, CoreError> {
        let json = std::fs::read_to_string(&self.path).map_err(|e| {
            CoreError::Fetch(format!("Cannot read {}: {e}", self.path.display()))
        })?;
        format::decode_catalog(&json).map_err(|e| CoreError::Fetch(e.to_string()))
    }
}
