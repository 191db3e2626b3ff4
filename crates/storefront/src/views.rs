//! Plain-text views rendered with Askama.
//!
//! View structs hold display-ready strings only: prices are formatted to two
//! decimals here, never inside templates.

use askama::Template;
use fakestore_core::{CartLineItem, FilterCriteria, Product};

use crate::cart::CheckoutReceipt;
use crate::filter::Listing;
use crate::intent::CartSnapshot;

pub const LOADING_MESSAGE: &str = "Loading products...";
pub const FETCH_FAILED_MESSAGE: &str =
    "Oops! The products could not be loaded. Please try again later.";
pub const EMPTY_CATALOG_MESSAGE: &str = "No products are available right now.";
pub const NO_MATCHES_MESSAGE: &str = "No products match your search.";

// =============================================================================
// Catalog
// =============================================================================

/// Product display data for templates.
#[derive(Debug, Clone)]
pub struct ProductCardView {
    pub id: i32,
    pub title: String,
    pub price: String,
    pub category: String,
}

impl From<&Product> for ProductCardView {
    fn from(product: &Product) -> Self {
        Self {
            id: product.id.as_i32(),
            title: product.title.clone(),
            price: product.price.display(),
            category: product.category.clone(),
        }
    }
}

/// Product grid.
#[derive(Template)]
#[template(path = "catalog.txt")]
pub struct CatalogTemplate {
    /// Shown instead of the grid when there is nothing to list.
    pub message: Option<&'static str>,
    pub products: Vec<ProductCardView>,
    pub summary: Option<String>,
}

impl CatalogTemplate {
    #[must_use]
    pub fn new(listing: &Listing, criteria: &FilterCriteria) -> Self {
        let message = match listing {
            Listing::Loading => Some(LOADING_MESSAGE),
            Listing::Failed => Some(FETCH_FAILED_MESSAGE),
            Listing::Empty => Some(EMPTY_CATALOG_MESSAGE),
            Listing::NoMatches => Some(NO_MATCHES_MESSAGE),
            Listing::Products(_) => None,
        };
        let summary = (!criteria.is_identity()).then(|| {
            format!(
                "Category: {} | Search: \"{}\" | Sort: {}",
                criteria.category,
                criteria.search_term(),
                criteria.sort_key
            )
        });
        Self {
            message,
            products: listing.products().iter().map(ProductCardView::from).collect(),
            summary,
        }
    }
}

/// One category choice.
#[derive(Debug, Clone)]
pub struct CategoryOptionView {
    pub value: String,
    pub label: String,
}

/// Category choices, "all" first.
#[derive(Template)]
#[template(path = "categories.txt")]
pub struct CategoriesTemplate {
    pub options: Vec<CategoryOptionView>,
}

impl CategoriesTemplate {
    #[must_use]
    pub fn new<'a>(categories: impl IntoIterator<Item = &'a str>) -> Self {
        let options = std::iter::once("all")
            .chain(categories)
            .map(|value| CategoryOptionView {
                value: value.to_string(),
                label: capitalize(value),
            })
            .collect();
        Self { options }
    }
}

/// Uppercase the first character, leave the rest alone.
fn capitalize(value: &str) -> String {
    let mut chars = value.chars();
    chars.next().map_or_else(String::new, |first| {
        first.to_uppercase().chain(chars).collect()
    })
}

// =============================================================================
// Cart
// =============================================================================

/// Cart line display data for templates.
#[derive(Debug, Clone)]
pub struct CartItemView {
    pub id: i32,
    pub title: String,
    pub quantity: u32,
    pub price: String,
    pub line_price: String,
}

impl From<&CartLineItem> for CartItemView {
    fn from(line: &CartLineItem) -> Self {
        Self {
            id: line.id.as_i32(),
            title: line.title.clone(),
            quantity: line.quantity.get(),
            price: line.price.display(),
            line_price: line.line_total().display(),
        }
    }
}

/// Cart display data for templates.
#[derive(Debug, Clone)]
pub struct CartView {
    pub items: Vec<CartItemView>,
    pub total: String,
    pub item_count: u64,
}

impl From<&CartSnapshot> for CartView {
    fn from(snapshot: &CartSnapshot) -> Self {
        Self {
            items: snapshot.lines.iter().map(CartItemView::from).collect(),
            total: snapshot.totals.total_price.display(),
            item_count: snapshot.totals.item_count,
        }
    }
}

/// Cart panel.
#[derive(Template)]
#[template(path = "cart.txt")]
pub struct CartTemplate {
    pub cart: CartView,
}

impl CartTemplate {
    #[must_use]
    pub fn new(snapshot: &CartSnapshot) -> Self {
        Self {
            cart: CartView::from(snapshot),
        }
    }
}

// =============================================================================
// Checkout
// =============================================================================

/// Order confirmation.
#[derive(Template)]
#[template(path = "receipt.txt")]
pub struct ReceiptTemplate {
    pub order_ref: String,
    pub placed_at: String,
    pub total: String,
    pub item_count: u64,
}

impl From<&CheckoutReceipt> for ReceiptTemplate {
    fn from(receipt: &CheckoutReceipt) -> Self {
        Self {
            order_ref: receipt.order_ref.to_string(),
            placed_at: receipt.placed_at.format("%Y-%m-%d %H:%M:%S UTC").to_string(),
            total: receipt.total.display(),
            item_count: receipt.item_count,
        }
    }
}
