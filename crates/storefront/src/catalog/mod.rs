//! Product catalog: remote source and in-memory store.
//!
//! # Architecture
//!
//! - The remote catalog is the source of truth; nothing is synced locally
//! - One GET per load, no pagination, no retry, no cache
//! - Loads are all-or-nothing: a failed load leaves the store empty
//!
//! # Example
//!
//! ```rust,ignore
//! use fakestore_storefront::catalog::{CatalogClient, CatalogStore};
//!
//! let client = CatalogClient::new(&config.catalog);
//! let mut catalog = CatalogStore::new();
//! match catalog.load(&client).await {
//!     Ok(products) => tracing::info!(count = products.len(), "Catalog ready"),
//!     Err(e) => tracing::warn!("Catalog unavailable: {e}"),
//! }
//! ```

mod client;

pub use client::CatalogClient;

use std::collections::HashSet;
use std::future::Future;

use fakestore_core::{Product, ProductId};
use thiserror::Error;
use tracing::{info, instrument, warn};

/// Errors that can occur when loading the catalog.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The request never produced a response.
    #[error("network error: {0}")]
    Network(#[source] reqwest::Error),

    /// The server answered with a non-2xx status.
    #[error("catalog returned HTTP {0}")]
    Status(u16),

    /// The body was not a JSON array of products.
    #[error("malformed catalog body: {0}")]
    Malformed(#[from] serde_json::Error),

    /// The body listed the same product id twice.
    #[error("catalog lists product {0} more than once")]
    DuplicateProduct(ProductId),
}

/// Somewhere the full product list can be fetched from.
pub trait CatalogSource {
    /// Fetch every product in a single read.
    fn fetch_products(&self) -> impl Future<Output = Result<Vec<Product>, FetchError>> + Send;
}

/// Where the catalog is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CatalogStatus {
    /// No load has completed yet.
    #[default]
    NotLoaded,
    /// The last load succeeded (the catalog may still be empty).
    Loaded,
    /// The last load failed; the catalog is empty.
    Failed,
}

/// The session's read-only product list.
#[derive(Debug, Clone, Default)]
pub struct CatalogStore {
    products: Vec<Product>,
    status: CatalogStatus,
}

impl CatalogStore {
    /// Create an empty, not-yet-loaded store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a loaded store from a known product list.
    ///
    /// # Errors
    ///
    /// Returns `FetchError::DuplicateProduct` if two products share an id.
    pub fn from_products(products: Vec<Product>) -> Result<Self, FetchError> {
        ensure_unique_ids(&products)?;
        Ok(Self {
            products,
            status: CatalogStatus::Loaded,
        })
    }

    /// Fetch the catalog from `source`, replacing the current contents.
    ///
    /// # Errors
    ///
    /// Returns the `FetchError` from the source, or `DuplicateProduct` if the
    /// payload repeats an id. On error the store is left empty.
    #[instrument(skip_all)]
    pub async fn load<S: CatalogSource>(&mut self, source: &S) -> Result<&[Product], FetchError> {
        let fetched = source
            .fetch_products()
            .await
            .and_then(|products| ensure_unique_ids(&products).map(|()| products));

        match fetched {
            Ok(products) => {
                info!(count = products.len(), "Catalog loaded");
                self.products = products;
                self.status = CatalogStatus::Loaded;
                Ok(&self.products)
            }
            Err(e) => {
                warn!(error = %e, "Catalog load failed");
                self.products.clear();
                self.status = CatalogStatus::Failed;
                Err(e)
            }
        }
    }

    /// All products in catalog order.
    #[must_use]
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    /// Look up a product by id.
    #[must_use]
    pub fn find(&self, id: ProductId) -> Option<&Product> {
        self.products.iter().find(|p| p.id == id)
    }

    /// Distinct categories in the order they first appear.
    #[must_use]
    pub fn categories(&self) -> Vec<&str> {
        let mut seen = HashSet::new();
        self.products
            .iter()
            .map(|p| p.category.as_str())
            .filter(|category| seen.insert(*category))
            .collect()
    }

    #[must_use]
    pub const fn status(&self) -> CatalogStatus {
        self.status
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}

fn ensure_unique_ids(products: &[Product]) -> Result<(), FetchError> {
    let mut seen = HashSet::with_capacity(products.len());
    for product in products {
        if !seen.insert(product.id) {
            return Err(FetchError::DuplicateProduct(product.id));
        }
    }
    Ok(())
}

#[cfg(test)]
pub(crate) mod test_support {
    use fakestore_core::{Product, ProductId};

    use super::{CatalogSource, FetchError};

    /// Build a product with a generated description.
    #[allow(clippy::unwrap_used)]
    pub fn product(id: i32, title: &str, price: &str, category: &str) -> Product {
        Product {
            id: ProductId::new(id),
            title: title.to_string(),
            price: price.parse().unwrap(),
            image: format!("https://example.com/{id}.jpg"),
            category: category.to_string(),
            description: format!("{title} description"),
        }
    }

    /// A source that answers from a canned result.
    pub struct StaticSource(pub fn() -> Result<Vec<Product>, FetchError>);

    impl CatalogSource for StaticSource {
        async fn fetch_products(&self) -> Result<Vec<Product>, FetchError> {
            (self.0)()
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::test_support::{StaticSource, product};
    use super::*;

    fn three_products() -> Result<Vec<Product>, FetchError> {
        Ok(vec![
            product(1, "Backpack", "109.95", "men's clothing"),
            product(2, "Ring", "9.99", "jewelery"),
            product(3, "Jacket", "55.99", "men's clothing"),
        ])
    }

    fn server_error() -> Result<Vec<Product>, FetchError> {
        Err(FetchError::Status(500))
    }

    fn duplicated() -> Result<Vec<Product>, FetchError> {
        Ok(vec![
            product(1, "Backpack", "109.95", "men's clothing"),
            product(1, "Backpack again", "1.00", "men's clothing"),
        ])
    }

    #[tokio::test]
    async fn test_load_replaces_catalog() {
        let mut catalog = CatalogStore::new();
        assert_eq!(catalog.status(), CatalogStatus::NotLoaded);
        let loaded = catalog.load(&StaticSource(three_products)).await.unwrap();
        assert_eq!(loaded.len(), 3);
        assert_eq!(catalog.status(), CatalogStatus::Loaded);
        assert_eq!(catalog.find(ProductId::new(2)).unwrap().title, "Ring");
        assert!(catalog.find(ProductId::new(99)).is_none());
    }

    #[tokio::test]
    async fn test_failed_load_leaves_catalog_empty() {
        let mut catalog = CatalogStore::new();
        catalog.load(&StaticSource(three_products)).await.unwrap();
        let err = catalog.load(&StaticSource(server_error)).await.unwrap_err();
        assert!(matches!(err, FetchError::Status(500)));
        assert!(catalog.is_empty());
        assert_eq!(catalog.status(), CatalogStatus::Failed);
    }

    #[tokio::test]
    async fn test_duplicate_ids_rejected_whole() {
        let mut catalog = CatalogStore::new();
        let err = catalog.load(&StaticSource(duplicated)).await.unwrap_err();
        assert!(matches!(err, FetchError::DuplicateProduct(id) if id == ProductId::new(1)));
        assert!(catalog.is_empty());
    }

    #[test]
    fn test_categories_unique_in_first_seen_order() {
        let catalog = CatalogStore::from_products(three_products().unwrap()).unwrap();
        assert_eq!(catalog.categories(), vec!["men's clothing", "jewelery"]);
    }
}
