pub mod errors;
pub mod models;
pub mod providers;
pub mod services;
pub mod storage;

use std::sync::Arc;

use tracing::{debug, warn};

use errors::CoreError;
use models::{
    cart::CartLine,
    catalog::Catalog,
    command::{Command, DispatchOutcome},
    pagination::ProximityTrigger,
    product::Product,
    settings::StorefrontSettings,
    view::View,
};
use providers::traits::CatalogSource;
use services::{
    cart_store::CartStore,
    catalog_service::CatalogService,
    detail_service::{self, DetailPage},
    pagination_service::PaginationController,
    presentation_service::{CartPresentationSync, CatalogView},
};
use storage::backend::KeyValueStore;

/// Main entry point for the storefront core library.
/// Holds the session's catalog, paging state, cart, and the current view,
/// and turns `Command`s into state changes plus rendering calls.
#[must_use]
pub struct Storefront {
    settings: StorefrontSettings,
    store: Arc<dyn KeyValueStore>,
    catalog: Catalog,
    catalog_service: CatalogService,
    catalog_error: Option<String>,
    pagination: PaginationController,
    cart: CartStore,
    view: Option<Box<dyn CatalogView>>,
    current_view: View,
    detail: Option<DetailPage>,
}

impl std::fmt::Debug for Storefront {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Storefront")
            .field("products", &self.catalog.len())
            .field("cursor", self.pagination.cursor())
            .field("cart", &self.cart)
            .field("current_view", &self.current_view)
            .finish()
    }
}

impl Storefront {
    /// Open the storefront against a durable store. The persisted cart is
    /// loaded immediately; the catalog is empty until `load_catalog`.
    pub fn new(settings: StorefrontSettings, store: Arc<dyn KeyValueStore>) -> Result<Self, CoreError> {
        settings.validate()?;
        let presentation = CartPresentationSync::new(settings.badge_cap, settings.currency_symbol.clone());
        let cart = CartStore::open(
            Arc::clone(&store),
            settings.cart_storage_key.clone(),
            settings.max_quantity,
            presentation,
        );
        let catalog_service =
            CatalogService::new(settings.catalog_cache_key.clone(), settings.default_unit_price);
        let pagination = PaginationController::new(0, settings.page_size);

        Ok(Self {
            settings,
            store,
            catalog: Catalog::default(),
            catalog_service,
            catalog_error: None,
            pagination,
            cart,
            view: None,
            current_view: View::Catalog,
            detail: None,
        })
    }

    /// Attach the grid/navigation renderer.
    pub fn attach_view(&mut self, view: Box<dyn CatalogView>) {
        self.view = Some(view);
    }

    // ── Catalog ─────────────────────────────────────────────────────

    /// Fetch the catalog, reveal the first page and arm the proximity
    /// observer. Returns the number of products.
    ///
    /// On failure the grid shows an error message and the catalog stays
    /// empty; the cart keeps working.
    pub async fn load_catalog(&mut self, source: &dyn CatalogSource) -> Result<usize, CoreError> {
        let loaded = self.catalog_service.load(source, self.store.as_ref()).await;

        match loaded {
            Ok(catalog) => {
                self.catalog = catalog;
                self.catalog_error = None;
                self.pagination = PaginationController::new(self.catalog.len(), self.settings.page_size);

                let batch = self.pagination.reveal_next(&self.catalog);
                let attached = self.pagination.trigger() == ProximityTrigger::Armed;
                let threshold = self.settings.proximity_threshold;
                if let Some(view) = self.view.as_mut() {
                    view.render_cards(&batch.items, false);
                    view.set_proximity_observer(attached, threshold);
                }
                Ok(self.catalog.len())
            }
            Err(e) => {
                warn!(error = %e, "catalog unavailable");
                self.catalog = Catalog::default();
                self.pagination = PaginationController::new(0, self.settings.page_size);
                // An empty catalog is exhausted at once; this disarms the trigger.
                self.pagination.reveal_next(&self.catalog);
                let message = e.user_message();
                let threshold = self.settings.proximity_threshold;
                if let Some(view) = self.view.as_mut() {
                    view.render_catalog_error(&message);
                    view.set_proximity_observer(false, threshold);
                }
                self.catalog_error = Some(message);
                Err(e)
            }
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// User-facing message from the last failed catalog load.
    pub fn catalog_error(&self) -> Option<&str> {
        self.catalog_error.as_deref()
    }

    pub fn pagination(&self) -> &PaginationController {
        &self.pagination
    }

    // ── Cart ────────────────────────────────────────────────────────

    pub fn cart(&self) -> &CartStore {
        &self.cart
    }

    /// Mutable access for mounting surfaces and direct cart operations.
    pub fn cart_mut(&mut self) -> &mut CartStore {
        &mut self.cart
    }

    // ── Detail page ─────────────────────────────────────────────────

    /// Navigate to a product's detail page.
    ///
    /// Uses the loaded catalog when there is one (in-page routing) and the
    /// cross-page product cache otherwise.
    pub fn show_detail(&mut self, product_id: &str) -> Result<&DetailPage, CoreError> {
        let product = if self.catalog.is_empty() {
            self.catalog_service.resolve_cached(self.store.as_ref(), product_id)?
        } else {
            self.catalog_service.resolve_loaded(&self.catalog, product_id)?
        };
        Ok(self.enter_detail(product))
    }

    /// Open the detail page addressed by a URL carrying `?id=...`, resolving
    /// the product from the cross-page cache.
    pub fn open_detail_url(&mut self, url: &str) -> Result<&DetailPage, CoreError> {
        let product_id = detail_service::product_id_from_url(url)?;
        let product = self.catalog_service.resolve_cached(self.store.as_ref(), &product_id)?;
        Ok(self.enter_detail(product))
    }

    pub fn detail(&self) -> Option<&DetailPage> {
        self.detail.as_ref()
    }

    /// Feed the detail page's quantity input. Returns whether it was accepted.
    pub fn set_detail_quantity(&mut self, input: &str) -> bool {
        self.detail
            .as_mut()
            .is_some_and(|d| d.set_quantity_input(input))
    }

    /// Press the detail page's "add to cart" button.
    pub fn add_detail_to_cart(&mut self) -> Result<bool, CoreError> {
        match self.detail.as_mut() {
            Some(detail) => detail.add_to_cart(&mut self.cart),
            None => Ok(false),
        }
    }

    pub fn current_view(&self) -> &View {
        &self.current_view
    }

    pub fn settings(&self) -> &StorefrontSettings {
        &self.settings
    }

    // ── Dispatch ────────────────────────────────────────────────────

    /// Single entry point for user intents.
    pub fn dispatch(&mut self, command: Command) -> Result<DispatchOutcome, CoreError> {
        debug!(?command, "dispatch");
        match command {
            Command::AddToCart {
                product_id,
                name,
                image_url,
                unit_price,
                quantity,
            } => {
                let line = CartLine::new(product_id, name, image_url, unit_price, quantity);
                Ok(Self::cart_outcome(self.cart.add(line)?))
            }
            Command::SetQuantity { product_id, input } => {
                Ok(Self::cart_outcome(self.cart.set_quantity_input(&product_id, &input)?))
            }
            Command::RemoveItem { product_id } => Ok(Self::cart_outcome(self.cart.remove(&product_id)?)),
            Command::ClearCart => {
                self.cart.clear()?;
                Ok(DispatchOutcome::CartUpdated)
            }
            Command::Search(term) => Ok(self.search(&term)),
            Command::RevealNext => Ok(self.reveal_next()),
            Command::OpenCart => {
                self.cart.open_modal();
                Ok(DispatchOutcome::Modal(self.cart.modal_state()))
            }
            Command::CloseCart => {
                self.cart.close_modal();
                Ok(DispatchOutcome::Modal(self.cart.modal_state()))
            }
            Command::Checkout => Ok(DispatchOutcome::CheckedOut(self.cart.checkout()?)),
            Command::ShowDetail { product_id } => {
                self.show_detail(&product_id)?;
                Ok(DispatchOutcome::Navigated)
            }
            Command::SetDetailQuantity { input } => {
                if self.set_detail_quantity(&input) {
                    Ok(DispatchOutcome::DetailUpdated)
                } else {
                    Ok(DispatchOutcome::Ignored)
                }
            }
            Command::AddDetailToCart => Ok(Self::cart_outcome(self.add_detail_to_cart()?)),
            Command::ShowCatalog => {
                self.detail = None;
                self.navigate(View::Catalog);
                Ok(DispatchOutcome::Navigated)
            }
        }
    }

    // ── Internal ────────────────────────────────────────────────────

    fn cart_outcome(changed: bool) -> DispatchOutcome {
        if changed {
            DispatchOutcome::CartUpdated
        } else {
            DispatchOutcome::Ignored
        }
    }

    fn search(&mut self, term: &str) -> DispatchOutcome {
        let result = self.pagination.set_search_term(&self.catalog, term);
        let attached = result.trigger == ProximityTrigger::Armed;
        let threshold = self.settings.proximity_threshold;
        if let Some(view) = self.view.as_mut() {
            view.render_cards(&result.products, false);
            view.set_proximity_observer(attached, threshold);
        }
        DispatchOutcome::Revealed(result.products)
    }

    fn reveal_next(&mut self) -> DispatchOutcome {
        let batch = self.pagination.reveal_next(&self.catalog);
        let threshold = self.settings.proximity_threshold;
        if let Some(view) = self.view.as_mut() {
            if !batch.items.is_empty() {
                view.render_cards(&batch.items, true);
            }
            if batch.exhausted {
                view.set_proximity_observer(false, threshold);
            }
        }
        if batch.items.is_empty() {
            DispatchOutcome::Ignored
        } else {
            DispatchOutcome::Revealed(batch.items)
        }
    }

    fn enter_detail(&mut self, product: Product) -> &DetailPage {
        let view = View::Detail {
            product_id: product.id.clone(),
        };
        self.navigate(view);
        self.detail.insert(DetailPage::new(product, &self.settings))
    }

    fn navigate(&mut self, view: View) {
        if let Some(renderer) = self.view.as_mut() {
            renderer.navigate(&view);
        }
        self.current_view = view;
    }
}
