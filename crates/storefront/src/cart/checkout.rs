//! Simulated checkout.
//!
//! There is no payment integration: a successful checkout produces a receipt
//! carrying the total and then empties the cart.

use chrono::{DateTime, Utc};
use fakestore_core::Price;
use thiserror::Error;
use tracing::{info, instrument, warn};
use uuid::Uuid;

use super::CartStore;
use crate::storage::StorageWriteError;

/// Checkout was attempted with nothing in the cart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("cart is empty")]
pub struct EmptyCartError;

/// Confirmation of a simulated order.
#[derive(Debug)]
pub struct CheckoutReceipt {
    /// Reference shown to the shopper.
    pub order_ref: Uuid,
    pub placed_at: DateTime<Utc>,
    pub total: Price,
    pub item_count: u64,
    pub line_count: usize,
    /// Set when the emptied cart could not be written to storage.
    pub storage_warning: Option<StorageWriteError>,
}

impl CartStore {
    /// Confirm the order and clear the cart.
    ///
    /// # Errors
    ///
    /// Returns `EmptyCartError` if the cart has no lines; the cart is left
    /// untouched.
    #[instrument(skip(self))]
    pub fn checkout(&mut self) -> Result<CheckoutReceipt, EmptyCartError> {
        if self.is_empty() {
            warn!("Checkout attempted with an empty cart");
            return Err(EmptyCartError);
        }

        let totals = self.totals();
        let line_count = self.len();
        let order_ref = Uuid::new_v4();
        info!(
            order_ref = %order_ref,
            total = %totals.total_price,
            items = totals.item_count,
            "Checkout confirmed"
        );

        let storage_warning = self.clear().into_storage_warning();

        Ok(CheckoutReceipt {
            order_ref,
            placed_at: Utc::now(),
            total: totals.total_price,
            item_count: totals.item_count,
            line_count,
            storage_warning,
        })
    }
}
