use rust_decimal::Decimal;
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::errors::CoreError;
use crate::models::cart::{Cart, CartLine};
use crate::models::command::parse_quantity;
use crate::models::product::Product;
use crate::models::receipt::CheckoutReceipt;
use crate::models::view::ModalState;
use crate::storage::backend::KeyValueStore;
use crate::storage::manager::StorageManager;

use super::presentation_service::{CartPresentationSync, CartSurface, SurfaceId, SurfaceKind};

/// The authoritative, persisted cart.
///
/// Every mutation is computed on a copy, the whole copy is persisted, and
/// only then does it replace the in-memory cart and refresh mounted
/// surfaces. If persisting fails the caller gets `CoreError::Persistence`
/// and nothing observable changes.
pub struct CartStore {
    store: Arc<dyn KeyValueStore>,
    key: String,
    cart: Cart,
    /// Upper bound for quantities typed into a cart-line input.
    max_quantity: u32,
    presentation: CartPresentationSync,
}

impl std::fmt::Debug for CartStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CartStore")
            .field("key", &self.key)
            .field("lines", &self.cart.len())
            .field("items", &self.cart.total_item_count())
            .field("presentation", &self.presentation)
            .finish()
    }
}

impl CartStore {
    /// Open the cart persisted under `key`.
    ///
    /// A missing entry starts an empty cart. So does an unreadable one; it is
    /// logged and replaced on the next write.
    pub fn open(
        store: Arc<dyn KeyValueStore>,
        key: impl Into<String>,
        max_quantity: u32,
        presentation: CartPresentationSync,
    ) -> Self {
        let key = key.into();
        let cart = Self::read(store.as_ref(), &key).unwrap_or_else(|e| {
            warn!(key = %key, error = %e, "discarding unreadable persisted cart");
            Cart::new()
        });
        debug!(key = %key, lines = cart.len(), "cart opened");
        Self {
            store,
            key,
            cart,
            max_quantity: max_quantity.max(1),
            presentation,
        }
    }

    // ── Reads ───────────────────────────────────────────────────────

    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    pub fn total_item_count(&self) -> u64 {
        self.cart.total_item_count()
    }

    pub fn total_price(&self) -> Decimal {
        self.cart.total_price()
    }

    pub fn modal_state(&self) -> ModalState {
        self.presentation.modal_state()
    }

    pub fn presentation(&self) -> &CartPresentationSync {
        &self.presentation
    }

    // ── Mutations ───────────────────────────────────────────────────

    /// Add units of a product. An existing line is incremented, a new one is
    /// appended. Adding zero units is ignored and returns `Ok(false)`.
    pub fn add(&mut self, line: CartLine) -> Result<bool, CoreError> {
        let product_id = line.product_id.clone();
        let quantity = line.quantity;
        let mut next = self.cart.clone();
        if !next.add(line) {
            return Ok(false);
        }
        self.commit(next)?;
        debug!(product_id = %product_id, quantity, "added to cart");
        Ok(true)
    }

    /// Add `quantity` units of a catalog product at its base price.
    pub fn add_product(&mut self, product: &Product, quantity: u32) -> Result<bool, CoreError> {
        self.add(CartLine::for_product(product, quantity))
    }

    /// Overwrite a line's quantity; zero or less removes the line. Unknown
    /// ids are ignored and return `Ok(false)`.
    pub fn set_quantity(&mut self, product_id: &str, quantity: i64) -> Result<bool, CoreError> {
        let mut next = self.cart.clone();
        if !next.set_quantity(product_id, quantity) {
            return Ok(false);
        }
        self.commit(next)?;
        debug!(product_id, quantity, "cart quantity set");
        Ok(true)
    }

    /// `set_quantity` from the raw text of a quantity input. Anything that
    /// is not an integer, or is above `max_quantity`, leaves the cart
    /// untouched and returns `Ok(false)`. Zero or less still removes the
    /// line.
    pub fn set_quantity_input(&mut self, product_id: &str, input: &str) -> Result<bool, CoreError> {
        match parse_quantity(input) {
            Some(quantity) if quantity <= i64::from(self.max_quantity) => {
                self.set_quantity(product_id, quantity)
            }
            _ => {
                debug!(product_id, input, max = self.max_quantity, "ignoring quantity input");
                Ok(false)
            }
        }
    }

    /// Returns `Ok(false)` if no line had this id.
    pub fn remove(&mut self, product_id: &str) -> Result<bool, CoreError> {
        let mut next = self.cart.clone();
        if !next.remove(product_id) {
            return Ok(false);
        }
        self.commit(next)?;
        debug!(product_id, "removed from cart");
        Ok(true)
    }

    /// Empty the cart unconditionally.
    pub fn clear(&mut self) -> Result<(), CoreError> {
        self.commit(Cart::new())?;
        debug!("cart cleared");
        Ok(())
    }

    /// Re-read the persisted cart, picking up writes made elsewhere
    /// (last write wins), and refresh surfaces.
    pub fn reload(&mut self) -> Result<(), CoreError> {
        self.cart = Self::read(self.store.as_ref(), &self.key)?;
        self.presentation.refresh(&self.cart);
        Ok(())
    }

    // ── Surfaces & modal ────────────────────────────────────────────

    /// Mount a surface; it is drawn immediately from the current cart.
    pub fn mount(&mut self, kind: SurfaceKind, surface: Box<dyn CartSurface>) -> SurfaceId {
        self.presentation.mount(kind, surface, &self.cart)
    }

    pub fn unmount(&mut self, id: SurfaceId) -> bool {
        self.presentation.unmount(id)
    }

    pub fn open_modal(&mut self) {
        self.presentation.open_modal(&self.cart);
    }

    pub fn close_modal(&mut self) {
        self.presentation.close_modal();
    }

    /// Mocked checkout: no payment is taken. Clears the cart and moves the
    /// modal to its confirmation state.
    ///
    /// Rejected with `CoreError::EmptyCart` when there is nothing to buy.
    pub fn checkout(&mut self) -> Result<CheckoutReceipt, CoreError> {
        if self.cart.is_empty() {
            return Err(CoreError::EmptyCart);
        }
        let receipt = CheckoutReceipt::for_cart(&self.cart);
        self.commit(Cart::new())?;
        self.presentation.confirm(&receipt);
        info!(
            order_id = %receipt.order_id,
            items = receipt.item_count,
            total = %receipt.total,
            "checkout completed"
        );
        Ok(receipt)
    }

    // ── Internal ────────────────────────────────────────────────────

    fn read(store: &dyn KeyValueStore, key: &str) -> Result<Cart, CoreError> {
        StorageManager::load_cart(store, key)
    }

    /// Persist `next` in full, then make it current and notify surfaces.
    fn commit(&mut self, next: Cart) -> Result<(), CoreError> {
        StorageManager::save_cart(self.store.as_ref(), &self.key, &next).map_err(|e| match e {
            CoreError::Persistence(_) => e,
            other => CoreError::Persistence(other.to_string()),
        })?;
        self.cart = next;
        self.presentation.refresh(&self.cart);
        Ok(())
    }
}
