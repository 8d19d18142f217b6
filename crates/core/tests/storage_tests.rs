// ═══════════════════════════════════════════════════════════════════
// Storage Tests — key/value backends, document format, StorageManager
// ═══════════════════════════════════════════════════════════════════

use rust_decimal::Decimal;

use storefront_core::errors::CoreError;
use storefront_core::models::cart::{Cart, CartLine};
use storefront_core::models::product::RawProduct;
use storefront_core::storage::backend::{FileStore, KeyValueStore, MemoryStore};
use storefront_core::storage::format::{self, CatalogDocument};
use storefront_core::storage::manager::StorageManager;

const CART_KEY: &str = "pokemon-tcg-cart";
const CACHE_KEY: &str = "pokemonData";

fn sample_cart() -> Cart {
    let mut cart = Cart::new();
    cart.add(CartLine::new("A", "Charizard", "a.png", Decimal::new(500, 2), 2));
    cart.add(CartLine::new("B", "Squirtle", "b.png", Decimal::new(125, 2), 1));
    cart
}

fn sample_document() -> CatalogDocument {
    CatalogDocument {
        data: vec![
            RawProduct {
                id: Some("base1-4".into()),
                name: Some("Charizard".into()),
                ..Default::default()
            },
            RawProduct {
                id: Some("base1-7".into()),
                name: Some("Squirtle".into()),
                ..Default::default()
            },
        ],
    }
}

// ═══════════════════════════════════════════════════════════════════
// MemoryStore
// ═══════════════════════════════════════════════════════════════════

mod memory_store {
    use super::*;

    #[test]
    fn get_missing_is_none() {
        let store = MemoryStore::new();
        assert_eq!(store.get("nope").unwrap(), None);
        assert!(store.is_empty());
    }

    #[test]
    fn set_then_get() {
        let store = MemoryStore::new();
        store.set("k", "v").unwrap();
        assert_eq!(store.get("k").unwrap().as_deref(), Some("v"));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn set_overwrites() {
        let store = MemoryStore::new();
        store.set("k", "one").unwrap();
        store.set("k", "two").unwrap();
        assert_eq!(store.get("k").unwrap().as_deref(), Some("two"));
    }

    #[test]
    fn remove_missing_is_ok() {
        let store = MemoryStore::new();
        store.remove("nope").unwrap();
        store.set("k", "v").unwrap();
        store.remove("k").unwrap();
        assert_eq!(store.get("k").unwrap(), None);
    }
}

// ═══════════════════════════════════════════════════════════════════
// FileStore
// ═══════════════════════════════════════════════════════════════════

mod file_store {
    use super::*;

    #[test]
    fn round_trips_through_disk() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::open(dir.path()).unwrap();
        store.set(CART_KEY, "[]").unwrap();
        assert_eq!(store.get(CART_KEY).unwrap().as_deref(), Some("[]"));
        assert!(dir.path().join("pokemon-tcg-cart.json").exists());
    }

    #[test]
    fn survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        FileStore::open(dir.path()).unwrap().set("k", "v").unwrap();
        let reopened = FileStore::open(dir.path()).unwrap();
        assert_eq!(reopened.get("k").unwrap().as_deref(), Some("v"));
    }

    #[test]
    fn missing_key_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::open(dir.path()).unwrap();
        assert_eq!(store.get("absent").unwrap(), None);
        store.remove("absent").unwrap();
    }

    #[test]
    fn creates_nested_directory() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("a").join("b");
        let store = FileStore::open(&nested).unwrap();
        store.set("k", "v").unwrap();
        assert!(nested.join("k.json").exists());
    }

    #[test]
    fn rejects_path_like_keys() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::open(dir.path()).unwrap();
        for key in ["../escape", "a/b", "", ".hidden"] {
            assert!(
                matches!(store.set(key, "v"), Err(CoreError::Persistence(_))),
                "key {key:?} should be rejected"
            );
        }
    }
}

// ═══════════════════════════════════════════════════════════════════
// Format
// ═══════════════════════════════════════════════════════════════════

mod document_format {
    use super::*;

    #[test]
    fn catalog_without_data_is_empty() {
        let doc = format::decode_catalog("{}").unwrap();
        assert!(doc.data.is_empty());
    }

    #[test]
    fn catalog_garbage_is_error() {
        assert!(matches!(
            format::decode_catalog("<html>"),
            Err(CoreError::Deserialization(_))
        ));
    }

    #[test]
    fn catalog_keeps_unknown_shape_tolerant() {
        let json = r#"{"data":[{"id":"x","name":"X","tcgplayer":{"url":"..."}}],"page":1}"#;
        let doc = format::decode_catalog(json).unwrap();
        assert_eq!(doc.data.len(), 1);
        assert_eq!(doc.data[0].id.as_deref(), Some("x"));
    }

    #[test]
    fn cart_encodes_as_array() {
        let json = format::encode_cart(&sample_cart()).unwrap();
        assert!(json.starts_with('['));
        assert_eq!(format::decode_cart(&json).unwrap(), sample_cart());
    }

    #[test]
    fn cart_decode_requires_array() {
        assert!(matches!(
            format::decode_cart(r#"{"lines":[]}"#),
            Err(CoreError::Deserialization(_))
        ));
    }

    #[test]
    fn cart_decode_drops_unreadable_lines() {
        let json = r#"[
            {"productId":"A","name":"A","imageUrl":"a.png","unitPrice":"5.00","quantity":2},
            {"productId":"B","name":"B","imageUrl":"b.png","unitPrice":"1.00","quantity":null},
            "garbage"
        ]"#;
        let cart = format::decode_cart(json).unwrap();
        assert_eq!(cart.len(), 1);
        assert_eq!(cart.get("A").unwrap().quantity, 2);
    }

    #[test]
    fn cart_decode_drops_negative_prices() {
        let json = r#"[
            {"id":"A","name":"A","image":"a.png","price":-5,"quantity":2},
            {"id":"B","name":"B","image":"b.png","price":1.5,"quantity":2}
        ]"#;
        let cart = format::decode_cart(json).unwrap();
        assert!(cart.get("A").is_none());
        assert_eq!(cart.total_price(), Decimal::new(3, 0));
    }

    #[test]
    fn cart_decode_drops_lines_whose_total_overflows() {
        let json = r#"[
            {"productId":"A","name":"A","imageUrl":"a.png","unitPrice":"40000000000000000000000000000","quantity":2},
            {"productId":"B","name":"B","imageUrl":"b.png","unitPrice":"40000000000000000000000000000","quantity":1},
            {"productId":"C","name":"C","imageUrl":"c.png","unitPrice":"40000000000000000000000000000","quantity":1},
            {"productId":"D","name":"D","imageUrl":"d.png","unitPrice":"1.00","quantity":1}
        ]"#;
        let cart = format::decode_cart(json).unwrap();
        let ids: Vec<&str> = cart.lines().iter().map(|l| l.product_id.as_str()).collect();
        assert_eq!(ids, vec!["B", "D"]);
    }

    #[test]
    fn cart_decode_accepts_legacy_lines_and_merges() {
        let json = r#"[
            {"id":"A","name":"A","image":"a.png","price":5,"quantity":1},
            {"id":"A","name":"A","image":"a.png","price":5,"quantity":2},
            {"id":"B","name":"B","image":"b.png","price":2.5,"quantity":0}
        ]"#;
        let cart = format::decode_cart(json).unwrap();
        assert_eq!(cart.len(), 1);
        assert_eq!(cart.get("A").unwrap().quantity, 3);
        assert_eq!(cart.total_price(), Decimal::new(15, 0));
    }
}

// ═══════════════════════════════════════════════════════════════════
// StorageManager
// ═══════════════════════════════════════════════════════════════════

mod manager {
    use super::*;

    #[test]
    fn missing_cart_is_empty() {
        let store = MemoryStore::new();
        assert!(StorageManager::load_cart(&store, CART_KEY).unwrap().is_empty());
    }

    #[test]
    fn cart_round_trip() {
        let store = MemoryStore::new();
        StorageManager::save_cart(&store, CART_KEY, &sample_cart()).unwrap();
        assert_eq!(StorageManager::load_cart(&store, CART_KEY).unwrap(), sample_cart());
    }

    #[test]
    fn save_replaces_whole_cart() {
        let store = MemoryStore::new();
        StorageManager::save_cart(&store, CART_KEY, &sample_cart()).unwrap();
        StorageManager::save_cart(&store, CART_KEY, &Cart::new()).unwrap();
        assert_eq!(store.get(CART_KEY).unwrap().as_deref(), Some("[]"));
    }

    #[test]
    fn corrupt_cart_is_error() {
        let store = MemoryStore::new();
        store.set(CART_KEY, "not json").unwrap();
        assert!(StorageManager::load_cart(&store, CART_KEY).is_err());
    }

    #[test]
    fn catalog_cache_round_trip() {
        let store = MemoryStore::new();
        assert_eq!(StorageManager::load_catalog_cache(&store, CACHE_KEY).unwrap(), None);
        StorageManager::save_catalog_cache(&store, CACHE_KEY, &sample_document()).unwrap();
        let cached = StorageManager::load_catalog_cache(&store, CACHE_KEY).unwrap().unwrap();
        assert_eq!(cached, sample_document());
    }

    #[test]
    fn catalog_cache_keeps_data_wrapper() {
        let store = MemoryStore::new();
        StorageManager::save_catalog_cache(&store, CACHE_KEY, &sample_document()).unwrap();
        let raw: serde_json::Value = serde_json::from_str(&store.get(CACHE_KEY).unwrap().unwrap()).unwrap();
        assert_eq!(raw["data"].as_array().unwrap().len(), 2);
        assert_eq!(raw["data"][0]["id"], "base1-4");
    }

    #[test]
    fn works_with_file_store() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::open(dir.path()).unwrap();
        StorageManager::save_cart(&store, CART_KEY, &sample_cart()).unwrap();
        let reopened = FileStore::open(dir.path()).unwrap();
        assert_eq!(StorageManager::load_cart(&reopened, CART_KEY).unwrap(), sample_cart());
    }
}
