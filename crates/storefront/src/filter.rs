//! Category filter, search and sort over the catalog.
//!
//! [`apply`] is a pure function: it never touches the catalog it is given
//! and always runs the steps in the same order (category, then search, then
//! a stable sort).

use std::cmp::Ordering;

use fakestore_core::{FilterCriteria, Product, SortKey};
use icu_collator::{Collator, CollatorOptions};
use tracing::warn;

use crate::catalog::{CatalogStatus, CatalogStore};

/// Derive the displayable product list for `criteria`.
#[must_use]
pub fn apply(catalog: &[Product], criteria: &FilterCriteria) -> Vec<Product> {
    let term = criteria.search_term();
    let mut products: Vec<Product> = catalog
        .iter()
        .filter(|p| criteria.category.matches(&p.category))
        .filter(|p| term.is_empty() || matches_search(p, term))
        .cloned()
        .collect();

    // `sort_by` is stable, so equal keys keep catalog order.
    match criteria.sort_key {
        SortKey::None => {}
        SortKey::PriceAsc => products.sort_by(|a, b| a.price.cmp(&b.price)),
        SortKey::PriceDesc => products.sort_by(|a, b| b.price.cmp(&a.price)),
        SortKey::NameAsc => {
            let titles = TitleOrder::new();
            products.sort_by(|a, b| titles.compare(&a.title, &b.title));
        }
        SortKey::NameDesc => {
            let titles = TitleOrder::new();
            products.sort_by(|a, b| titles.compare(&b.title, &a.title));
        }
    }
    products
}

/// `term` must already be trimmed and lowercased.
fn matches_search(product: &Product, term: &str) -> bool {
    product.title.to_lowercase().contains(term)
        || product.description.to_lowercase().contains(term)
}

/// Human ordering for titles using the root-locale collator.
///
/// Accents and case are secondary and tertiary differences, so "Éclair"
/// sorts among the E titles and "apple" directly before "Apple".
struct TitleOrder(Option<Collator>);

impl TitleOrder {
    fn new() -> Self {
        match Collator::try_new(&Default::default(), CollatorOptions::new()) {
            Ok(collator) => Self(Some(collator)),
            Err(e) => {
                warn!(error = %e, "Collator unavailable, sorting titles case-insensitively");
                Self(None)
            }
        }
    }

    fn compare(&self, a: &str, b: &str) -> Ordering {
        let primary = match &self.0 {
            Some(collator) => collator.compare(a, b),
            None => a.to_lowercase().cmp(&b.to_lowercase()),
        };
        primary.then_with(|| a.cmp(b))
    }
}

/// What the product grid should show.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Listing {
    /// The catalog has not been fetched yet.
    Loading,
    /// The catalog fetch failed.
    Failed,
    /// The catalog loaded but has no products.
    Empty,
    /// The catalog has products but none pass the filter.
    NoMatches,
    Products(Vec<Product>),
}

impl Listing {
    /// Filter the catalog and classify the result.
    #[must_use]
    pub fn of(catalog: &CatalogStore, criteria: &FilterCriteria) -> Self {
        match catalog.status() {
            CatalogStatus::NotLoaded => Self::Loading,
            CatalogStatus::Failed => Self::Failed,
            CatalogStatus::Loaded if catalog.is_empty() => Self::Empty,
            CatalogStatus::Loaded => {
                let products = apply(catalog.products(), criteria);
                if products.is_empty() {
                    Self::NoMatches
                } else {
                    Self::Products(products)
                }
            }
        }
    }

    /// Products to show, empty for every non-product state.
    #[must_use]
    pub fn products(&self) -> &[Product] {
        match self {
            Self::Products(products) => products,
            _ => &[],
        }
    }
}
