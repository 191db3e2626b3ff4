//! Cart line items.

use serde::{Deserialize, Serialize};

use super::id::ProductId;
use super::price::Price;
use super::product::Product;
use super::quantity::Quantity;

/// One row of the cart: a product snapshot and how many units are wanted.
///
/// Title, price and image are copied from the catalog when the line is
/// created and never refreshed afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLineItem {
    pub id: ProductId,
    pub title: String,
    pub price: Price,
    pub image: String,
    pub quantity: Quantity,
}

impl CartLineItem {
    /// Snapshot a product into a new line with a quantity of one.
    #[must_use]
    pub fn from_product(product: &Product) -> Self {
        Self {
            id: product.id,
            title: product.title.clone(),
            price: product.price,
            image: product.image.clone(),
            quantity: Quantity::ONE,
        }
    }

    /// Unit price multiplied by quantity, unrounded.
    #[must_use]
    pub fn line_total(&self) -> Price {
        self.price * self.quantity
    }
}
