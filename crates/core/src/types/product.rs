//! Catalog products.

use serde::{Deserialize, Serialize};

use super::id::ProductId;
use super::price::Price;

/// A purchasable product as served by the remote catalog.
///
/// Read-only within a session. Extra fields in the remote payload (ratings,
/// for example) are ignored on deserialization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub title: String,
    pub price: Price,
    /// Image URL.
    pub image: String,
    pub category: String,
    pub description: String,
}
