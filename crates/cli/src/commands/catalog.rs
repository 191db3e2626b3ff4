//! Catalog browsing commands.

use fakestore_core::{CategoryFilter, SortKey};
use fakestore_storefront::error::AppError;
use fakestore_storefront::intent::Intent;
use fakestore_storefront::views::{CatalogTemplate, CategoriesTemplate};

use super::{Session, print_view};

/// List products matching the given criteria.
///
/// # Errors
///
/// Returns an error if the catalog cannot be loaded or the view fails to render.
pub async fn products(
    session: &mut Session,
    category: Option<String>,
    search: Option<String>,
    sort: SortKey,
) -> Result<(), AppError> {
    session.load_catalog().await?;

    let storefront = &mut session.storefront;
    if let Some(category) = category {
        storefront.dispatch(Intent::ChangeCategory(CategoryFilter::from(
            category.as_str(),
        )));
    }
    if let Some(term) = search {
        storefront.dispatch(Intent::ChangeSearch(term));
    }
    storefront.dispatch(Intent::ChangeSort(sort));

    print_view(&CatalogTemplate::new(
        &storefront.listing(),
        storefront.criteria(),
    ))
}

/// List the categories present in the catalog.
///
/// # Errors
///
/// Returns an error if the catalog cannot be loaded or the view fails to render.
pub async fn categories(session: &mut Session) -> Result<(), AppError> {
    session.load_catalog().await?;
    print_view(&CategoriesTemplate::new(
        session.storefront.catalog().categories(),
    ))
}
