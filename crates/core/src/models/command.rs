use rust_decimal::Decimal;

use super::product::Product;
use super::receipt::CheckoutReceipt;
use super::view::ModalState;

/// Every user intent the storefront reacts to. UI layers translate their
/// own events into these and hand them to `Storefront::dispatch`.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    AddToCart {
        product_id: String,
        name: String,
        image_url: String,
        unit_price: Decimal,
        quantity: u32,
    },
    /// Raw text from a cart-line quantity input. Non-numeric input is ignored.
    SetQuantity { product_id: String, input: String },
    RemoveItem { product_id: String },
    ClearCart,
    Search(String),
    /// Fired by the proximity observer.
    RevealNext,
    OpenCart,
    CloseCart,
    Checkout,
    ShowDetail { product_id: String },
    /// Raw text from the detail page's quantity input.
    SetDetailQuantity { input: String },
    /// The detail page's guarded "add to cart" control.
    AddDetailToCart,
    ShowCatalog,
}

/// What a dispatched command did.
#[derive(Debug, Clone, PartialEq)]
pub enum DispatchOutcome {
    /// The cart changed and was persisted.
    CartUpdated,
    /// Cards revealed by a scroll batch or search.
    Revealed(Vec<Product>),
    CheckedOut(CheckoutReceipt),
    Modal(ModalState),
    Navigated,
    /// The detail page accepted a new quantity; its price display changed.
    DetailUpdated,
    /// Nothing to do: malformed input, unknown line, a reveal already in
    /// flight, or a detail page that already added its product.
    Ignored,
}

/// Parse a quantity typed into a number input. Returns `None` for anything
/// that is not an integer.
pub fn parse_quantity(input: &str) -> Option<i64> {
    input.trim().parse::<i64>().ok()
}
