//! Presentation boundary: intents in, events out.
//!
//! A renderer never touches the stores directly. It sends an [`Intent`]
//! describing what the shopper did and redraws from the [`UiEvent`]s that
//! come back.

use fakestore_core::{CartLineItem, CategoryFilter, Product, ProductId, SortKey};

use crate::cart::{CartTotals, CheckoutReceipt, EmptyCartError, StorageCorruptError};
use crate::catalog::FetchError;
use crate::filter::Listing;
use crate::storage::StorageWriteError;

/// Something the shopper asked for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    AddToCart(ProductId),
    RemoveFromCart(ProductId),
    /// Raw quantity input; coerced leniently.
    SetQuantity(ProductId, String),
    ChangeCategory(CategoryFilter),
    ChangeSort(SortKey),
    ChangeSearch(String),
    Checkout,
    OpenCartPanel,
    CloseCartPanel,
}

/// Cart contents plus derived totals, as handed to renderers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartSnapshot {
    pub lines: Vec<CartLineItem>,
    pub totals: CartTotals,
}

/// Something the renderer should reflect.
#[derive(Debug)]
pub enum UiEvent {
    CatalogLoaded(Vec<Product>),
    CatalogFailed(FetchError),
    CartChanged(CartSnapshot),
    FilterResultChanged(Listing),
    CartPanelToggled { open: bool },
    CheckoutCompleted(CheckoutReceipt),
    CheckoutRejected(EmptyCartError),
    /// A cart change stands in memory but was not saved.
    StorageWarning(StorageWriteError),
    /// The stored cart was unusable and the cart restarted empty.
    CartReset(StorageCorruptError),
}

impl UiEvent {
    /// Short name for logging.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::CatalogLoaded(_) => "catalog_loaded",
            Self::CatalogFailed(_) => "catalog_failed",
            Self::CartChanged(_) => "cart_changed",
            Self::FilterResultChanged(_) => "filter_result_changed",
            Self::CartPanelToggled { .. } => "cart_panel_toggled",
            Self::CheckoutCompleted(_) => "checkout_completed",
            Self::CheckoutRejected(_) => "checkout_rejected",
            Self::StorageWarning(_) => "storage_warning",
            Self::CartReset(_) => "cart_reset",
        }
    }
}
