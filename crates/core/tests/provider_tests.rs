// ═══════════════════════════════════════════════════════════════════
// Provider Tests — FileCatalogSource, HttpCatalogSource construction,
// CatalogSource trait objects
// ═══════════════════════════════════════════════════════════════════

use async_trait::async_trait;
use std::io::Write;

use storefront_core::errors::CoreError;
use storefront_core::models::product::RawProduct;
use storefront_core::providers::file::FileCatalogSource;
use storefront_core::providers::http::HttpCatalogSource;
use storefront_core::providers::traits::CatalogSource;
use storefront_core::storage::format::CatalogDocument;

const FIXTURE: &str = r#"{
  "data": [
    {
      "id": "base1-4",
      "name": "Charizard",
      "images": { "small": "https://images.example/base1/4.png" },
      "hp": "120",
      "types": ["Fire"],
      "cardmarket": { "prices": { "averageSellPrice": 350.25 } }
    },
    { "id": "base1-7", "name": "Squirtle", "hp": 40 }
  ]
}"#;

fn write_fixture(contents: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file
}

// ═══════════════════════════════════════════════════════════════════
// Test Helpers — Mock Source
// ═══════════════════════════════════════════════════════════════════

struct MockSource {
    ids: Vec<&'static str>,
}

#[async_trait]
impl CatalogSource for MockSource {
    fn name(&self) -> &str {
        "mock"
    }

    async fn fetch(&self) -> Result<CatalogDocument, CoreError> {
        Ok(CatalogDocument {
            data: self
                .ids
                .iter()
                .map(|id| RawProduct {
                    id: Some((*id).to_string()),
                    ..Default::default()
                })
                .collect(),
        })
    }
}

// ═══════════════════════════════════════════════════════════════════
// FileCatalogSource
// ═══════════════════════════════════════════════════════════════════

mod file_source {
    use super::*;

    #[tokio::test]
    async fn reads_catalog_document() {
        let file = write_fixture(FIXTURE);
        let source = FileCatalogSource::new(file.path());
        let doc = source.fetch().await.unwrap();
        assert_eq!(doc.data.len(), 2);
        assert_eq!(doc.data[0].name.as_deref(), Some("Charizard"));
        assert_eq!(
            doc.data[0]
                .cardmarket
                .as_ref()
                .and_then(|m| m.prices.as_ref())
                .and_then(|p| p.average_sell_price),
            Some(350.25)
        );
        assert_eq!(source.name(), "file");
    }

    #[tokio::test]
    async fn missing_file_is_fetch_error() {
        let dir = tempfile::tempdir().unwrap();
        let source = FileCatalogSource::new(dir.path().join("cards-pokemon-1.json"));
        let err = source.fetch().await.unwrap_err();
        assert!(matches!(err, CoreError::Fetch(ref m) if m.contains("Cannot read")));
    }

    #[tokio::test]
    async fn malformed_file_is_fetch_error() {
        let file = write_fixture("<!doctype html><p>404</p>");
        let err = FileCatalogSource::new(file.path()).fetch().await.unwrap_err();
        assert!(matches!(err, CoreError::Fetch(_)));
    }

    #[tokio::test]
    async fn document_without_data_is_empty() {
        let file = write_fixture(r#"{"count": 0}"#);
        let doc = FileCatalogSource::new(file.path()).fetch().await.unwrap();
        assert!(doc.data.is_empty());
    }
}

// ═══════════════════════════════════════════════════════════════════
// HttpCatalogSource
// ═══════════════════════════════════════════════════════════════════

mod http_source {
    use super::*;

    #[test]
    fn accepts_default_catalog_url() {
        let source = HttpCatalogSource::new(storefront_core::models::settings::DEFAULT_CATALOG_URL).unwrap();
        assert_eq!(source.url().path(), "/json/cards-pokemon-1.json");
        assert_eq!(source.name(), "http");
    }

    #[test]
    fn resolves_relative_path_against_origin() {
        let source = HttpCatalogSource::relative_to("https://shop.example/cards/", "json/cards-pokemon-1.json").unwrap();
        assert_eq!(source.url().as_str(), "https://shop.example/cards/json/cards-pokemon-1.json");

        let rooted = HttpCatalogSource::relative_to("https://shop.example/cards/", "/json/cards-pokemon-1.json").unwrap();
        assert_eq!(rooted.url().path(), "/json/cards-pokemon-1.json");
    }

    #[test]
    fn relative_to_needs_absolute_base() {
        assert!(matches!(
            HttpCatalogSource::relative_to("shop.example", "json/cards-pokemon-1.json"),
            Err(CoreError::InvalidSettings(_))
        ));
    }

    #[test]
    fn rejects_unparseable_url() {
        assert!(matches!(
            HttpCatalogSource::new("json/cards-pokemon-1.json"),
            Err(CoreError::InvalidSettings(_))
        ));
        assert!(HttpCatalogSource::new("").is_err());
    }
}

// ═══════════════════════════════════════════════════════════════════
// Trait objects
// ═══════════════════════════════════════════════════════════════════

mod trait_objects {
    use super::*;

    #[tokio::test]
    async fn sources_are_interchangeable() {
        let file = write_fixture(FIXTURE);
        let sources: Vec<Box<dyn CatalogSource>> = vec![
            Box::new(FileCatalogSource::new(file.path())),
            Box::new(MockSource {
                ids: vec!["base1-4", "base1-7"],
            }),
        ];
        for source in &sources {
            let doc = source.fetch().await.unwrap();
            let ids: Vec<_> = doc.data.iter().filter_map(|p| p.id.as_deref()).collect();
            assert_eq!(ids, vec!["base1-4", "base1-7"], "source {}", source.name());
        }
    }
}
