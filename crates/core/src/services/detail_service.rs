use reqwest::Url;
use rust_decimal::Decimal;
use tracing::debug;

use crate::errors::CoreError;
use crate::models::cart::CartLine;
use crate::models::command::parse_quantity;
use crate::models::product::Product;
use crate::models::settings::StorefrontSettings;
use crate::models::view::format_price;

use super::cart_store::CartStore;

/// Query parameter carrying the product id from catalog to detail page.
pub const DETAIL_QUERY_PARAM: &str = "id";

/// Link from a catalog card to the detail page of `product_id`.
pub fn detail_url(detail_page: &Url, product_id: &str) -> Url {
    let mut url = detail_page.clone();
    url.query_pairs_mut()
        .clear()
        .append_pair(DETAIL_QUERY_PARAM, product_id);
    url
}

/// Extract the product id from a detail page URL.
pub fn product_id_from_url(url: &str) -> Result<String, CoreError> {
    let parsed = Url::parse(url)
        .map_err(|e| CoreError::ProductNotFound(format!("unreadable detail URL '{url}': {e}")))?;
    parsed
        .query_pairs()
        .find(|(k, _)| k == DETAIL_QUERY_PARAM)
        .map(|(_, v)| v.into_owned())
        .filter(|v| !v.trim().is_empty())
        .ok_or_else(|| CoreError::ProductNotFound("no product id in the URL".into()))
}

/// State of the "add to cart" control on the detail page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PurchaseButton {
    Ready,
    /// Already added; further activations do nothing.
    Added,
}

/// One product's detail page: the quantity the shopper is about to buy and
/// the price for that quantity.
///
/// The displayed price follows the quantity input, not the cart. Nothing
/// here is committed until `add_to_cart`.
#[derive(Debug)]
pub struct DetailPage {
    product: Product,
    quantity: u32,
    max_quantity: u32,
    currency_symbol: String,
    button: PurchaseButton,
}

impl DetailPage {
    pub fn new(product: Product, settings: &StorefrontSettings) -> Self {
        Self {
            product,
            quantity: 1,
            max_quantity: settings.max_quantity.max(1),
            currency_symbol: settings.currency_symbol.clone(),
            button: PurchaseButton::Ready,
        }
    }

    pub fn product(&self) -> &Product {
        &self.product
    }

    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    pub fn button(&self) -> PurchaseButton {
        self.button
    }

    /// Unrounded price for the selected quantity.
    pub fn price(&self) -> Decimal {
        self.product.base_price * Decimal::from(self.quantity)
    }

    pub fn price_display(&self) -> String {
        format_price(self.price(), &self.currency_symbol)
    }

    /// Apply the raw text of the quantity input. Non-numeric or
    /// out-of-range input keeps the previous quantity; returns whether the
    /// input was accepted.
    pub fn set_quantity_input(&mut self, input: &str) -> bool {
        match parse_quantity(input) {
            Some(q) if q >= 1 && q <= i64::from(self.max_quantity) => {
                self.quantity = u32::try_from(q).unwrap_or(self.max_quantity);
                true
            }
            _ => {
                debug!(input, "ignoring quantity input");
                false
            }
        }
    }

    /// Add the selected quantity to the cart, once.
    ///
    /// A second activation returns `Ok(false)` without touching the cart. If
    /// the cart cannot be persisted the button stays ready so the shopper
    /// can retry.
    pub fn add_to_cart(&mut self, cart: &mut CartStore) -> Result<bool, CoreError> {
        if self.button == PurchaseButton::Added {
            return Ok(false);
        }
        let added = cart.add(CartLine::for_product(&self.product, self.quantity))?;
        if added {
            self.button = PurchaseButton::Added;
        }
        Ok(added)
    }
}
