//! Client-side shopping cart.
//!
//! The cart is an ordered list of line items, at most one per product, kept in
//! the order products were first added. Every mutation is written through to
//! [`LocalStorage`] under [`CART_STORAGE_KEY`]. A failed write never rolls the
//! in-memory change back; it is handed to the caller as
//! [`CartChange::Unsaved`] so the user can be warned.

mod aggregate;
mod checkout;

pub use aggregate::{CartTotals, total_item_count, total_price};
pub use checkout::{CheckoutReceipt, EmptyCartError};

use std::collections::HashSet;

use fakestore_core::{CartLineItem, ProductId, Quantity};
use thiserror::Error;
use tracing::{debug, error, info, instrument, warn};

use crate::catalog::CatalogStore;
use crate::storage::{LocalStorage, StorageReadError, StorageWriteError};

/// Storage key holding the serialized cart.
pub const CART_STORAGE_KEY: &str = "shoppingCart";

/// The stored cart could not be used.
#[derive(Debug, Error)]
pub enum StorageCorruptError {
    /// The record is not a JSON array of cart lines.
    #[error("stored cart is malformed: {0}")]
    Malformed(#[from] serde_json::Error),

    /// The record breaks the one-line-per-product rule.
    #[error("stored cart lists product {0} more than once")]
    DuplicateLine(ProductId),

    /// The record exists but could not be read.
    #[error("stored cart is unreadable: {0}")]
    Unreadable(#[from] StorageReadError),
}

/// What [`CartStore::load`] found in storage.
#[derive(Debug)]
pub enum CartLoad {
    /// Nothing was stored.
    Empty,
    /// A stored cart with this many lines was restored.
    Restored(usize),
    /// The stored cart was discarded and the cart started empty.
    Reset(StorageCorruptError),
}

/// Outcome of a cart mutation.
#[derive(Debug)]
#[must_use]
pub enum CartChange {
    /// Nothing matched; neither memory nor storage was touched.
    Unchanged,
    /// The change was applied and written to storage.
    Saved,
    /// The change was applied in memory but could not be written.
    Unsaved(StorageWriteError),
}

impl CartChange {
    /// Whether the in-memory cart changed.
    #[must_use]
    pub const fn is_changed(&self) -> bool {
        !matches!(self, Self::Unchanged)
    }

    /// The write failure, if any.
    #[must_use]
    pub const fn storage_warning(&self) -> Option<&StorageWriteError> {
        match self {
            Self::Unsaved(e) => Some(e),
            _ => None,
        }
    }

    /// Take the write failure, if any.
    #[must_use]
    pub fn into_storage_warning(self) -> Option<StorageWriteError> {
        match self {
            Self::Unsaved(e) => Some(e),
            _ => None,
        }
    }
}

/// The session's cart and its durable copy.
pub struct CartStore {
    lines: Vec<CartLineItem>,
    storage: Box<dyn LocalStorage>,
}

impl std::fmt::Debug for CartStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CartStore")
            .field("lines", &self.lines)
            .field("storage", &"[LocalStorage]")
            .finish()
    }
}

impl CartStore {
    /// Create an empty cart over `storage`. Nothing is read until [`load`](Self::load).
    #[must_use]
    pub fn new(storage: Box<dyn LocalStorage>) -> Self {
        Self {
            lines: Vec::new(),
            storage,
        }
    }

    /// Restore the cart from storage.
    ///
    /// A missing or blank record leaves the cart empty. A record that cannot
    /// be read or decoded is logged, removed from storage, and the cart starts
    /// empty.
    #[instrument(skip(self))]
    pub fn load(&mut self) -> CartLoad {
        let decoded = self
            .storage
            .get_item(CART_STORAGE_KEY)
            .map_err(StorageCorruptError::from)
            .and_then(|raw| {
                raw.filter(|raw| !raw.trim().is_empty())
                    .map(|raw| decode_lines(&raw))
                    .transpose()
            });

        match decoded {
            Ok(None) => {
                self.lines.clear();
                debug!("No stored cart");
                CartLoad::Empty
            }
            Ok(Some(lines)) => {
                info!(lines = lines.len(), "Cart restored from storage");
                let count = lines.len();
                self.lines = lines;
                CartLoad::Restored(count)
            }
            Err(e) => {
                error!(error = %e, "Failed to load stored cart, starting empty");
                self.lines.clear();
                if let Err(remove_err) = self.storage.remove_item(CART_STORAGE_KEY) {
                    warn!(error = %remove_err, "Could not discard corrupt cart record");
                }
                CartLoad::Reset(e)
            }
        }
    }

    /// Add one unit of a catalog product.
    ///
    /// Products missing from `catalog` are ignored. An existing line has its
    /// quantity incremented; otherwise a new line snapshots the product.
    #[instrument(skip(self, catalog), fields(product_id = %id))]
    pub fn add_item(&mut self, catalog: &CatalogStore, id: ProductId) -> CartChange {
        let Some(product) = catalog.find(id) else {
            warn!("Product not in catalog, ignoring add");
            return CartChange::Unchanged;
        };

        if let Some(line) = self.line_mut(id) {
            line.quantity = line.quantity.incremented();
            debug!(quantity = %line.quantity, "Incremented cart line");
        } else {
            self.lines.push(CartLineItem::from_product(product));
            debug!("Added new cart line");
        }
        self.persist()
    }

    /// Remove a product's line regardless of its quantity.
    #[instrument(skip(self), fields(product_id = %id))]
    pub fn remove_item(&mut self, id: ProductId) -> CartChange {
        let before = self.lines.len();
        self.lines.retain(|line| line.id != id);
        if self.lines.len() == before {
            return CartChange::Unchanged;
        }
        self.persist()
    }

    /// Set a line's quantity, clamping anything below one to one.
    #[instrument(skip(self), fields(product_id = %id))]
    pub fn set_quantity(&mut self, id: ProductId, quantity: i64) -> CartChange {
        self.replace_quantity(id, Quantity::clamped(quantity))
    }

    /// Set a line's quantity from raw user input.
    ///
    /// Non-numeric input is treated as one; see [`Quantity::parse_lenient`].
    #[instrument(skip(self), fields(product_id = %id))]
    pub fn set_quantity_from_input(&mut self, id: ProductId, input: &str) -> CartChange {
        self.replace_quantity(id, Quantity::parse_lenient(input))
    }

    /// Empty the cart and write the empty cart to storage.
    #[instrument(skip(self))]
    pub fn clear(&mut self) -> CartChange {
        self.lines.clear();
        self.persist()
    }

    /// Write the whole cart to storage.
    pub fn persist(&mut self) -> CartChange {
        let result = serde_json::to_string(&self.lines)
            .map_err(|e| StorageWriteError::Io {
                key: CART_STORAGE_KEY.to_string(),
                source: std::io::Error::other(e),
            })
            .and_then(|json| self.storage.set_item(CART_STORAGE_KEY, &json));

        match result {
            Ok(()) => CartChange::Saved,
            Err(e) => {
                error!(error = %e, "Could not save cart");
                CartChange::Unsaved(e)
            }
        }
    }

    /// Lines in insertion order.
    #[must_use]
    pub fn lines(&self) -> &[CartLineItem] {
        &self.lines
    }

    /// The line for `id`, if present.
    #[must_use]
    pub fn get(&self, id: ProductId) -> Option<&CartLineItem> {
        self.lines.iter().find(|line| line.id == id)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Current totals.
    #[must_use]
    pub fn totals(&self) -> CartTotals {
        CartTotals::of(&self.lines)
    }

    fn line_mut(&mut self, id: ProductId) -> Option<&mut CartLineItem> {
        self.lines.iter_mut().find(|line| line.id == id)
    }

    fn replace_quantity(&mut self, id: ProductId, quantity: Quantity) -> CartChange {
        let Some(line) = self.line_mut(id) else {
            return CartChange::Unchanged;
        };
        line.quantity = quantity;
        debug!(quantity = %quantity, "Set cart line quantity");
        self.persist()
    }
}

/// Decode a stored cart, enforcing one line per product.
fn decode_lines(raw: &str) -> Result<Vec<CartLineItem>, StorageCorruptError> {
    let lines: Vec<CartLineItem> = serde_json::from_str(raw)?;
    let mut seen = HashSet::with_capacity(lines.len());
    for line in &lines {
        if !seen.insert(line.id) {
            return Err(StorageCorruptError::DuplicateLine(line.id));
        }
    }
    Ok(lines)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::catalog::test_support::product;
    use crate::storage::MemoryStorage;

    fn catalog() -> CatalogStore {
        CatalogStore::from_products(vec![
            product(1, "Backpack", "109.95", "men's clothing"),
            product(2, "Ring", "9.99", "jewelery"),
            product(3, "Jacket", "55.99", "men's clothing"),
        ])
        .unwrap()
    }

    fn cart_with(storage: &MemoryStorage) -> CartStore {
        CartStore::new(Box::new(storage.clone()))
    }

    fn stored_lines(storage: &MemoryStorage) -> Vec<CartLineItem> {
        serde_json::from_str(&storage.get_item(CART_STORAGE_KEY).unwrap().unwrap()).unwrap()
    }

    #[test]
    fn test_blank_record_loads_empty() {
        for raw in ["", "  \n"] {
            let mut storage = MemoryStorage::new();
            storage.set_item(CART_STORAGE_KEY, raw).unwrap();
            let mut cart = cart_with(&storage);
            assert!(matches!(cart.load(), CartLoad::Empty));
            assert!(cart.is_empty());
            assert_eq!(storage.get_item(CART_STORAGE_KEY).unwrap().as_deref(), Some(raw));
        }
    }

    #[test]
    fn test_repeated_add_keeps_single_line() {
        let storage = MemoryStorage::new();
        let mut cart = cart_with(&storage);
        let catalog = catalog();
        for _ in 0..4 {
            assert!(matches!(
                cart.add_item(&catalog, ProductId::new(2)),
                CartChange::Saved
            ));
        }
        assert_eq!(cart.len(), 1);
        assert_eq!(cart.get(ProductId::new(2)).unwrap().quantity.get(), 4);
        assert_eq!(stored_lines(&storage)[0].quantity.get(), 4);
    }

    #[test]
    fn test_add_preserves_first_insertion_order() {
        let storage = MemoryStorage::new();
        let mut cart = cart_with(&storage);
        let catalog = catalog();
        let _ = cart.add_item(&catalog, ProductId::new(3));
        let _ = cart.add_item(&catalog, ProductId::new(1));
        let _ = cart.add_item(&catalog, ProductId::new(3));
        let ids: Vec<i32> = cart.lines().iter().map(|l| l.id.as_i32()).collect();
        assert_eq!(ids, vec![3, 1]);
    }

    #[test]
    fn test_add_unknown_product_is_noop() {
        let storage = MemoryStorage::new();
        let mut cart = cart_with(&storage);
        let change = cart.add_item(&catalog(), ProductId::new(404));
        assert!(!change.is_changed());
        assert!(cart.is_empty());
        assert_eq!(storage.get_item(CART_STORAGE_KEY).unwrap(), None);
    }

    #[test]
    fn test_add_before_catalog_loaded_is_noop() {
        let storage = MemoryStorage::new();
        let mut cart = cart_with(&storage);
        let change = cart.add_item(&CatalogStore::new(), ProductId::new(1));
        assert!(matches!(change, CartChange::Unchanged));
    }

    #[test]
    fn test_snapshot_survives_catalog_change_until_readded() {
        let storage = MemoryStorage::new();
        let mut cart = cart_with(&storage);
        let _ = cart.add_item(&catalog(), ProductId::new(2));
        let _ = cart.add_item(&catalog(), ProductId::new(2));

        let repriced = CatalogStore::from_products(vec![product(2, "Gold Ring", "19.99", "jewelery")])
            .unwrap();
        let _ = cart.add_item(&repriced, ProductId::new(2));
        let line = cart.get(ProductId::new(2)).unwrap();
        assert_eq!(line.price, "9.99".parse().unwrap());
        assert_eq!(line.title, "Ring");
        assert_eq!(line.quantity.get(), 3);

        let _ = cart.remove_item(ProductId::new(2));
        let _ = cart.add_item(&repriced, ProductId::new(2));
        let line = cart.get(ProductId::new(2)).unwrap();
        assert_eq!(line.price, "19.99".parse().unwrap());
        assert_eq!(line.title, "Gold Ring");
        assert_eq!(line.quantity, Quantity::ONE);
    }

    #[test]
    fn test_remove_deletes_whole_line() {
        let storage = MemoryStorage::new();
        let mut cart = cart_with(&storage);
        let _ = cart.add_item(&catalog(), ProductId::new(1));
        let _ = cart.set_quantity(ProductId::new(1), 7);
        assert!(cart.remove_item(ProductId::new(1)).is_changed());
        assert!(cart.is_empty());
        assert!(stored_lines(&storage).is_empty());
        assert!(!cart.remove_item(ProductId::new(1)).is_changed());
    }

    #[test]
    fn test_set_quantity_clamps_to_one() {
        let storage = MemoryStorage::new();
        let mut cart = cart_with(&storage);
        let _ = cart.add_item(&catalog(), ProductId::new(1));
        let _ = cart.set_quantity(ProductId::new(1), 5);
        assert_eq!(cart.get(ProductId::new(1)).unwrap().quantity.get(), 5);
        let _ = cart.set_quantity(ProductId::new(1), 0);
        assert_eq!(cart.get(ProductId::new(1)).unwrap().quantity, Quantity::ONE);
        let _ = cart.set_quantity(ProductId::new(1), -5);
        assert_eq!(cart.get(ProductId::new(1)).unwrap().quantity, Quantity::ONE);
        let _ = cart.set_quantity_from_input(ProductId::new(1), "abc");
        assert_eq!(cart.get(ProductId::new(1)).unwrap().quantity, Quantity::ONE);
        let _ = cart.set_quantity_from_input(ProductId::new(1), "6");
        assert_eq!(stored_lines(&storage)[0].quantity.get(), 6);
    }

    #[test]
    fn test_set_quantity_unknown_line_is_noop() {
        let storage = MemoryStorage::new();
        let mut cart = cart_with(&storage);
        assert!(!cart.set_quantity(ProductId::new(1), 3).is_changed());
        assert_eq!(storage.get_item(CART_STORAGE_KEY).unwrap(), None);
    }

    #[test]
    fn test_load_restores_saved_cart() {
        let storage = MemoryStorage::new();
        let mut cart = cart_with(&storage);
        let _ = cart.add_item(&catalog(), ProductId::new(3));
        let _ = cart.add_item(&catalog(), ProductId::new(1));

        let mut reloaded = cart_with(&storage);
        assert!(matches!(reloaded.load(), CartLoad::Restored(2)));
        assert_eq!(reloaded.lines(), cart.lines());
    }

    #[test]
    fn test_load_empty_storage() {
        let mut cart = cart_with(&MemoryStorage::new());
        assert!(matches!(cart.load(), CartLoad::Empty));
        assert!(cart.is_empty());
    }

    #[test]
    fn test_load_corrupt_resets_and_wipes_record() {
        for corrupt in ["{not json", "42", "{}", r#"[{"id":1}]"#] {
            let mut storage = MemoryStorage::new();
            storage.set_item(CART_STORAGE_KEY, corrupt).unwrap();
            let mut cart = cart_with(&storage);
            assert!(
                matches!(cart.load(), CartLoad::Reset(StorageCorruptError::Malformed(_))),
                "input {corrupt:?} should be treated as corrupt"
            );
            assert!(cart.is_empty());
            assert_eq!(storage.get_item(CART_STORAGE_KEY).unwrap(), None);
        }
    }

    #[test]
    fn test_load_rejects_zero_quantity_and_duplicates() {
        let mut storage = MemoryStorage::new();
        let zero = r#"[{"id":1,"title":"t","price":"1.00","image":"i","quantity":0}]"#;
        storage.set_item(CART_STORAGE_KEY, zero).unwrap();
        assert!(matches!(
            cart_with(&storage).load(),
            CartLoad::Reset(StorageCorruptError::Malformed(_))
        ));

        let dup = r#"[{"id":1,"title":"t","price":"1.00","image":"i","quantity":1},
                      {"id":1,"title":"t","price":"1.00","image":"i","quantity":2}]"#;
        storage.set_item(CART_STORAGE_KEY, dup).unwrap();
        assert!(matches!(
            cart_with(&storage).load(),
            CartLoad::Reset(StorageCorruptError::DuplicateLine(_))
        ));
    }

    #[test]
    fn test_load_accepts_numeric_prices() {
        let mut storage = MemoryStorage::new();
        let stored = r#"[{"id":2,"title":"Ring","price":9.99,"image":"i","quantity":2}]"#;
        storage.set_item(CART_STORAGE_KEY, stored).unwrap();
        let mut cart = cart_with(&storage);
        assert!(matches!(cart.load(), CartLoad::Restored(1)));
        assert_eq!(cart.totals().total_price, "19.98".parse().unwrap());
    }

    #[test]
    fn test_write_failure_keeps_in_memory_change() {
        let storage = MemoryStorage::new().with_quota(0);
        let mut cart = cart_with(&storage);
        let change = cart.add_item(&catalog(), ProductId::new(1));
        assert!(change.is_changed());
        assert!(matches!(
            change.storage_warning(),
            Some(StorageWriteError::QuotaExceeded { .. })
        ));
        assert_eq!(cart.len(), 1);
    }
}
