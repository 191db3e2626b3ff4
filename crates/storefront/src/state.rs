//! Session state shared by every presentation of the storefront.
//!
//! [`Storefront`] owns the two stores and the current filter criteria and is
//! the only place intents are applied. Everything runs on one logical thread;
//! the catalog fetch is the only await point.

use fakestore_core::FilterCriteria;
use tracing::{debug, instrument};

use crate::cart::{CartChange, CartLoad, CartStore};
use crate::catalog::{CatalogSource, CatalogStore};
use crate::error::add_breadcrumb;
use crate::filter::Listing;
use crate::intent::{CartSnapshot, Intent, UiEvent};
use crate::storage::LocalStorage;

/// A shopper's session.
#[derive(Debug)]
pub struct Storefront {
    catalog: CatalogStore,
    cart: CartStore,
    criteria: FilterCriteria,
    cart_panel_open: bool,
}

impl Storefront {
    /// Create a session whose cart persists to `storage`.
    #[must_use]
    pub fn new(storage: Box<dyn LocalStorage>) -> Self {
        Self {
            catalog: CatalogStore::new(),
            cart: CartStore::new(storage),
            criteria: FilterCriteria::default(),
            cart_panel_open: false,
        }
    }

    /// Restore the saved cart. Call once at startup.
    pub fn start(&mut self) -> Vec<UiEvent> {
        let mut events = Vec::new();
        if let CartLoad::Reset(e) = self.cart.load() {
            events.push(UiEvent::CartReset(e));
        }
        events.push(self.cart_changed());
        events
    }

    /// Fetch the catalog and publish the first listing.
    #[instrument(skip_all)]
    pub async fn load_catalog<S: CatalogSource>(&mut self, source: &S) -> Vec<UiEvent> {
        let first = match self.catalog.load(source).await {
            Ok(products) => UiEvent::CatalogLoaded(products.to_vec()),
            Err(e) => UiEvent::CatalogFailed(e),
        };
        vec![first, self.filter_result()]
    }

    /// Apply one intent.
    #[instrument(skip(self))]
    pub fn dispatch(&mut self, intent: Intent) -> Vec<UiEvent> {
        let events = match intent {
            Intent::AddToCart(id) => {
                let change = self.cart.add_item(&self.catalog, id);
                if change.is_changed() {
                    add_breadcrumb(
                        "cart",
                        "Added to cart",
                        Some(&[("product_id", id.to_string().as_str())]),
                    );
                }
                let mut events = self.after_change(change);
                if !events.is_empty() {
                    events.push(self.set_panel(true));
                }
                events
            }
            Intent::RemoveFromCart(id) => {
                let change = self.cart.remove_item(id);
                if change.is_changed() {
                    add_breadcrumb(
                        "cart",
                        "Removed from cart",
                        Some(&[("product_id", id.to_string().as_str())]),
                    );
                }
                self.after_change(change)
            }
            Intent::SetQuantity(id, input) => {
                let change = self.cart.set_quantity_from_input(id, &input);
                self.after_change(change)
            }
            Intent::ChangeCategory(category) => {
                self.criteria.category = category;
                vec![self.filter_result()]
            }
            Intent::ChangeSort(sort_key) => {
                self.criteria.sort_key = sort_key;
                vec![self.filter_result()]
            }
            Intent::ChangeSearch(term) => {
                self.criteria.set_search_term(&term);
                vec![self.filter_result()]
            }
            Intent::Checkout => self.checkout(),
            Intent::OpenCartPanel => vec![self.set_panel(true)],
            Intent::CloseCartPanel => vec![self.set_panel(false)],
        };
        debug!(
            events = ?events.iter().map(UiEvent::name).collect::<Vec<_>>(),
            "Intent applied"
        );
        events
    }

    #[must_use]
    pub const fn catalog(&self) -> &CatalogStore {
        &self.catalog
    }

    #[must_use]
    pub const fn cart(&self) -> &CartStore {
        &self.cart
    }

    #[must_use]
    pub const fn criteria(&self) -> &FilterCriteria {
        &self.criteria
    }

    #[must_use]
    pub const fn is_cart_panel_open(&self) -> bool {
        self.cart_panel_open
    }

    /// Current listing for the current criteria.
    #[must_use]
    pub fn listing(&self) -> Listing {
        Listing::of(&self.catalog, &self.criteria)
    }

    /// Current cart and totals.
    #[must_use]
    pub fn cart_snapshot(&self) -> CartSnapshot {
        CartSnapshot {
            lines: self.cart.lines().to_vec(),
            totals: self.cart.totals(),
        }
    }

    fn checkout(&mut self) -> Vec<UiEvent> {
        add_breadcrumb("checkout", "Checkout requested", None);
        match self.cart.checkout() {
            Ok(mut receipt) => {
                let mut events = Vec::with_capacity(4);
                if let Some(e) = receipt.storage_warning.take() {
                    events.push(UiEvent::StorageWarning(e));
                }
                events.push(UiEvent::CheckoutCompleted(receipt));
                events.push(self.cart_changed());
                events.push(self.set_panel(false));
                events
            }
            Err(e) => vec![UiEvent::CheckoutRejected(e)],
        }
    }

    /// Events for a cart mutation; empty when nothing changed.
    fn after_change(&self, change: CartChange) -> Vec<UiEvent> {
        if !change.is_changed() {
            return Vec::new();
        }
        let mut events = Vec::with_capacity(3);
        if let Some(e) = change.into_storage_warning() {
            events.push(UiEvent::StorageWarning(e));
        }
        events.push(self.cart_changed());
        events
    }

    fn cart_changed(&self) -> UiEvent {
        UiEvent::CartChanged(self.cart_snapshot())
    }

    fn filter_result(&self) -> UiEvent {
        UiEvent::FilterResultChanged(self.listing())
    }

    fn set_panel(&mut self, open: bool) -> UiEvent {
        self.cart_panel_open = open;
        UiEvent::CartPanelToggled { open }
    }
}
