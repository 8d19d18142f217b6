use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::errors::CoreError;

/// Default location of the static catalog document.
pub const DEFAULT_CATALOG_URL: &str = "http://localhost/json/cards-pokemon-1.json";

/// Storefront configuration. Every field has a default, so a partial JSON
/// object (or `{}`) is a valid configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorefrontSettings {
    /// Where the catalog document (`{ "data": [...] }`) is fetched from.
    pub catalog_url: String,

    /// Number of cards revealed per infinite-scroll batch.
    pub page_size: usize,

    /// Distance from the end of the rendered grid at which the proximity
    /// observer fires.
    pub proximity_threshold: u32,

    /// Durable key holding the serialized cart lines.
    pub cart_storage_key: String,

    /// Durable key holding the cross-page product cache.
    pub catalog_cache_key: String,

    /// Unit price used for products that carry no market price.
    pub default_unit_price: Decimal,

    /// Largest quantity a quantity input accepts.
    pub max_quantity: u32,

    /// Badge counts above this value are displayed as `"{cap}+"`.
    pub badge_cap: u32,

    /// Appended to every formatted price (e.g. `"15.00 €"`).
    pub currency_symbol: String,
}

impl Default for StorefrontSettings {
    fn default() -> Self {
        Self {
            catalog_url: DEFAULT_CATALOG_URL.to_string(),
            page_size: 20,
            proximity_threshold: 500,
            cart_storage_key: "pokemon-tcg-cart".to_string(),
            catalog_cache_key: "pokemonData".to_string(),
            default_unit_price: Decimal::new(500, 2),
            max_quantity: 10,
            badge_cap: 99,
            currency_symbol: "€".to_string(),
        }
    }
}

impl StorefrontSettings {
    /// Parse settings from JSON and validate them.
    pub fn from_json(json: &str) -> Result<Self, CoreError> {
        let settings: StorefrontSettings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Reject values the storefront cannot operate with.
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.page_size == 0 {
            return Err(CoreError::InvalidSettings("page_size must be at least 1".into()));
        }
        if self.max_quantity == 0 {
            return Err(CoreError::InvalidSettings("max_quantity must be at least 1".into()));
        }
        if self.badge_cap == 0 {
            return Err(CoreError::InvalidSettings("badge_cap must be at least 1".into()));
        }
        if self.default_unit_price.is_sign_negative() {
            return Err(CoreError::InvalidSettings(format!(
                "default_unit_price must not be negative (got {})",
                self.default_unit_price
            )));
        }
        if self.cart_storage_key.trim().is_empty() || self.catalog_cache_key.trim().is_empty() {
            return Err(CoreError::InvalidSettings("storage keys must not be empty".into()));
        }
        if self.cart_storage_key == self.catalog_cache_key {
            return Err(CoreError::InvalidSettings(format!(
                "cart and catalog cache share the storage key '{}'",
                self.cart_storage_key
            )));
        }
        Ok(())
    }
}
