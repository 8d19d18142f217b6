use tracing::debug;

use crate::models::cart::Cart;
use crate::models::product::Product;
use crate::models::receipt::CheckoutReceipt;
use crate::models::view::{CartView, ModalState, View};

/// A mounted UI element that displays cart-derived data.
///
/// Implemented by the rendering layer (DOM, terminal, test double). Surfaces
/// never keep the cart itself; they receive a fresh `CartView` on every
/// refresh.
pub trait CartSurface: Send {
    /// Redraw from the current cart.
    fn refresh(&mut self, view: &CartView);

    /// Switch to the post-checkout confirmation. Only called on modal
    /// surfaces.
    fn show_confirmation(&mut self, _receipt: &CheckoutReceipt) {}
}

/// The grid and navigation half of the rendering layer.
pub trait CatalogView: Send {
    /// Draw product cards, after the existing ones when `append` is set,
    /// replacing them otherwise.
    fn render_cards(&mut self, products: &[Product], append: bool);

    /// Replace the grid with a visible error message.
    fn render_catalog_error(&mut self, message: &str);

    /// Attach or detach the proximity observer on the grid sentinel. It
    /// fires `threshold` distance units before the end of the grid.
    fn set_proximity_observer(&mut self, attached: bool, threshold: u32);

    /// Switch the visible view and scroll to the top.
    fn navigate(&mut self, view: &View);
}

/// Which part of the page a surface is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SurfaceKind {
    /// Cart icon badge, present on every page.
    Badge,
    /// Cart modal: line items, total, checkout control.
    Modal,
}

/// Handle returned by `mount`, used to unmount.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SurfaceId(u64);

struct Mounted {
    id: SurfaceId,
    kind: SurfaceKind,
    surface: Box<dyn CartSurface>,
}

/// Pushes cart state into every mounted surface after each cart mutation.
///
/// Badges always refresh; modal surfaces refresh only while the modal is
/// open. Refreshing with nothing mounted does nothing.
pub struct CartPresentationSync {
    badge_cap: u32,
    currency_symbol: String,
    surfaces: Vec<Mounted>,
    next_id: u64,
    modal: ModalState,
}

impl std::fmt::Debug for CartPresentationSync {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CartPresentationSync")
            .field("surfaces", &self.surfaces.len())
            .field("modal", &self.modal)
            .finish()
    }
}

impl CartPresentationSync {
    pub fn new(badge_cap: u32, currency_symbol: impl Into<String>) -> Self {
        Self {
            badge_cap,
            currency_symbol: currency_symbol.into(),
            surfaces: Vec::new(),
            next_id: 0,
            modal: ModalState::Closed,
        }
    }

    pub fn modal_state(&self) -> ModalState {
        self.modal
    }

    pub fn mounted_count(&self) -> usize {
        self.surfaces.len()
    }

    pub fn view(&self, cart: &Cart) -> CartView {
        CartView::from_cart(cart, self.badge_cap, &self.currency_symbol)
    }

    /// Attach a surface and draw the current cart into it.
    pub fn mount(&mut self, kind: SurfaceKind, mut surface: Box<dyn CartSurface>, cart: &Cart) -> SurfaceId {
        let id = SurfaceId(self.next_id);
        self.next_id += 1;
        if self.should_refresh(kind) {
            surface.refresh(&self.view(cart));
        }
        self.surfaces.push(Mounted { id, kind, surface });
        id
    }

    /// Returns `false` if the surface was not mounted.
    pub fn unmount(&mut self, id: SurfaceId) -> bool {
        let before = self.surfaces.len();
        self.surfaces.retain(|m| m.id != id);
        self.surfaces.len() != before
    }

    /// Redraw every surface that currently shows cart data.
    pub fn refresh(&mut self, cart: &Cart) {
        if self.surfaces.is_empty() {
            return;
        }
        let view = self.view(cart);
        let modal = self.modal;
        for mounted in &mut self.surfaces {
            if mounted.kind == SurfaceKind::Badge || modal == ModalState::Open {
                mounted.surface.refresh(&view);
            }
        }
        debug!(items = view.item_count, surfaces = self.surfaces.len(), "cart surfaces refreshed");
    }

    /// Open the modal and draw the live cart. Opening an open modal is a no-op.
    pub fn open_modal(&mut self, cart: &Cart) {
        if self.modal == ModalState::Open {
            return;
        }
        self.modal = ModalState::Open;
        let view = self.view(cart);
        for mounted in self.surfaces.iter_mut().filter(|m| m.kind == SurfaceKind::Modal) {
            mounted.surface.refresh(&view);
        }
    }

    pub fn close_modal(&mut self) {
        self.modal = ModalState::Closed;
    }

    /// Move the modal into its confirmation state.
    pub fn confirm(&mut self, receipt: &CheckoutReceipt) {
        self.modal = ModalState::Confirmed;
        for mounted in self.surfaces.iter_mut().filter(|m| m.kind == SurfaceKind::Modal) {
            mounted.surface.show_confirmation(receipt);
        }
    }

    fn should_refresh(&self, kind: SurfaceKind) -> bool {
        kind == SurfaceKind::Badge || self.modal == ModalState::Open
    }
}
