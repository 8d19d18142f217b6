use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::errors::CoreError;
use crate::models::cart::{Cart, CartLine};
use crate::models::product::RawProduct;

/// Shape of both the static catalog document and the cross-page product
/// cache:
///
/// ```text
/// { "data": [ { "id": "...", "name": "...", ... }, ... ] }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CatalogDocument {
    #[serde(default)]
    pub data: Vec<RawProduct>,
}

/// Parse a catalog document. A document without `data` is an empty catalog.
pub fn decode_catalog(json: &str) -> Result<CatalogDocument, CoreError> {
    serde_json::from_str(json)
        .map_err(|e| CoreError::Deserialization(format!("Invalid catalog document: {e}")))
}

pub fn encode_catalog(document: &CatalogDocument) -> Result<String, CoreError> {
    serde_json::to_string(document)
        .map_err(|e| CoreError::Serialization(format!("Failed to serialize catalog: {e}")))
}

/// Serialize the whole cart as a JSON array of lines.
pub fn encode_cart(cart: &Cart) -> Result<String, CoreError> {
    serde_json::to_string(cart)
        .map_err(|e| CoreError::Serialization(format!("Failed to serialize cart: {e}")))
}

/// Parse a persisted cart.
///
/// The outer value must be a JSON array. Individual lines that do not parse
/// (e.g. a `null` quantity written by an older build) are dropped, as are
/// lines the cart refuses: negative prices, or a subtotal too large to
/// represent. Zero quantities are skipped and duplicate ids merged.
pub fn decode_cart(json: &str) -> Result<Cart, CoreError> {
    let raw: Vec<serde_json::Value> = serde_json::from_str(json)
        .map_err(|e| CoreError::Deserialization(format!("Invalid persisted cart: {e}")))?;

    let mut cart = Cart::new();
    for (idx, value) in raw.into_iter().enumerate() {
        let line = match serde_json::from_value::<CartLine>(value) {
            Ok(line) => line,
            Err(e) => {
                warn!(index = idx, error = %e, "dropping unreadable cart line");
                continue;
            }
        };
        if line.quantity == 0 {
            continue;
        }
        let product_id = line.product_id.clone();
        let unit_price = line.unit_price;
        if !cart.add(line) {
            warn!(index = idx, product_id = %product_id, unit_price = %unit_price, "dropping invalid cart line");
        }
    }
    Ok(cart)
}
