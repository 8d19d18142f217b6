use rust_decimal::{Decimal, RoundingStrategy};
use serde::Serialize;

use super::cart::{Cart, CartLine};

/// Screens the storefront can switch between.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum View {
    Catalog,
    Detail { product_id: String },
}

/// Cart modal lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ModalState {
    Closed,
    Open,
    /// Showing the purchase confirmation; line items are no longer drawn.
    Confirmed,
}

/// Cart icon badge.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum BadgeState {
    Hidden,
    Visible(String),
}

impl BadgeState {
    pub fn for_count(count: u64, cap: u32) -> Self {
        match count {
            0 => BadgeState::Hidden,
            n if n > u64::from(cap) => BadgeState::Visible(format!("{cap}+")),
            n => BadgeState::Visible(n.to_string()),
        }
    }
}

/// Round to cents for display and append the currency symbol: `"15.00 €"`.
pub fn format_price(amount: Decimal, currency_symbol: &str) -> String {
    let rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    format!("{rounded:.2} {currency_symbol}")
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CartLineView {
    pub product_id: String,
    pub name: String,
    pub image_url: String,
    pub unit_price: String,
    pub quantity: u32,
}

/// Everything a cart surface needs to draw itself, computed fresh from the
/// store on every refresh.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CartView {
    pub badge: BadgeState,
    pub lines: Vec<CartLineView>,
    pub item_count: u64,
    pub total: String,
    /// False for an empty cart: the total and the checkout control are hidden.
    pub checkout_enabled: bool,
}

impl CartView {
    pub fn from_cart(cart: &Cart, badge_cap: u32, currency_symbol: &str) -> Self {
        let item_count = cart.total_item_count();
        Self {
            badge: BadgeState::for_count(item_count, badge_cap),
            lines: cart
                .lines()
                .iter()
                .map(|l: &CartLine| CartLineView {
                    product_id: l.product_id.clone(),
                    name: l.name.clone(),
                    image_url: l.image_url.clone(),
                    unit_price: format_price(l.unit_price, currency_symbol),
                    quantity: l.quantity,
                })
                .collect(),
            item_count,
            total: format_price(cart.total_price(), currency_symbol),
            checkout_enabled: !cart.is_empty(),
        }
    }
}
