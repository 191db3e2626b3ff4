//! Catalog loading against a mock HTTP catalog.

use axum::http::StatusCode;
use fakestore_core::{CategoryFilter, Price, ProductId, SortKey};
use fakestore_integration_tests::{
    MockCatalog, serve_catalog, serve_sample_catalog, unreachable_catalog_url,
};
use fakestore_storefront::catalog::{CatalogClient, CatalogStatus, FetchError};
use fakestore_storefront::config::CatalogConfig;
use fakestore_storefront::filter::Listing;
use fakestore_storefront::intent::{Intent, UiEvent};
use fakestore_storefront::state::Storefront;
use fakestore_storefront::storage::MemoryStorage;

async fn load(mock: &MockCatalog) -> (Storefront, Vec<UiEvent>) {
    let mut storefront = Storefront::new(Box::new(MemoryStorage::new()));
    let _ = storefront.start();
    let events = storefront.load_catalog(&mock.client()).await;
    (storefront, events)
}

fn failure(events: &[UiEvent]) -> Option<&FetchError> {
    events.iter().find_map(|event| match event {
        UiEvent::CatalogFailed(e) => Some(e),
        _ => None,
    })
}

#[tokio::test]
async fn test_catalog_loads_in_server_order() {
    let mock = serve_sample_catalog().await;
    let (storefront, events) = load(&mock).await;

    assert!(failure(&events).is_none());
    assert_eq!(mock.hits(), 1);
    assert_eq!(storefront.catalog().status(), CatalogStatus::Loaded);

    let ids: Vec<i32> = storefront
        .catalog()
        .products()
        .iter()
        .map(|p| p.id.as_i32())
        .collect();
    assert_eq!(ids, vec![1, 5, 9]);
    assert_eq!(
        storefront.catalog().categories(),
        vec!["men's clothing", "jewelery", "electronics"]
    );

    let backpack = storefront.catalog().find(ProductId::new(1)).expect("backpack");
    assert_eq!(backpack.price, "109.95".parse::<Price>().expect("price"));
}

#[tokio::test]
async fn test_server_error_fails_without_retry() {
    let mock = serve_catalog(StatusCode::INTERNAL_SERVER_ERROR, "oops").await;
    let (storefront, events) = load(&mock).await;

    assert!(matches!(failure(&events), Some(FetchError::Status(500))));
    assert_eq!(mock.hits(), 1);
    assert_eq!(storefront.listing(), Listing::Failed);
    assert!(storefront.catalog().products().is_empty());
}

#[tokio::test]
async fn test_malformed_body_fails() {
    let mock = serve_catalog(StatusCode::OK, r#"{"products": []}"#).await;
    let (storefront, events) = load(&mock).await;

    assert!(matches!(failure(&events), Some(FetchError::Malformed(_))));
    assert_eq!(storefront.catalog().status(), CatalogStatus::Failed);
}

#[tokio::test]
async fn test_product_missing_field_fails_whole_load() {
    let body = r#"[
        {"id": 1, "title": "A", "price": 1, "image": "", "category": "x", "description": ""},
        {"id": 2, "title": "B", "image": "", "category": "x", "description": ""}
    ]"#;
    let mock = serve_catalog(StatusCode::OK, body).await;
    let (storefront, events) = load(&mock).await;

    assert!(matches!(failure(&events), Some(FetchError::Malformed(_))));
    assert!(storefront.catalog().products().is_empty());
}

#[tokio::test]
async fn test_duplicate_ids_rejected() {
    let body = r#"[
        {"id": 1, "title": "A", "price": 1, "image": "", "category": "x", "description": ""},
        {"id": 1, "title": "B", "price": 2, "image": "", "category": "x", "description": ""}
    ]"#;
    let mock = serve_catalog(StatusCode::OK, body).await;
    let (_, events) = load(&mock).await;

    assert!(matches!(
        failure(&events),
        Some(FetchError::DuplicateProduct(id)) if id.as_i32() == 1
    ));
}

#[tokio::test]
async fn test_empty_catalog_is_not_a_failure() {
    let mock = serve_catalog(StatusCode::OK, "[]").await;
    let (storefront, events) = load(&mock).await;

    assert!(failure(&events).is_none());
    assert_eq!(storefront.listing(), Listing::Empty);
}

#[tokio::test]
async fn test_unreachable_catalog_is_network_error() {
    let client = CatalogClient::new(&CatalogConfig {
        url: unreachable_catalog_url().await,
    });
    let mut storefront = Storefront::new(Box::new(MemoryStorage::new()));
    let events = storefront.load_catalog(&client).await;

    assert!(matches!(failure(&events), Some(FetchError::Network(_))));
}

#[tokio::test]
async fn test_filtering_loaded_catalog() {
    let mock = serve_sample_catalog().await;
    let (mut storefront, _) = load(&mock).await;

    storefront.dispatch(Intent::ChangeSort(SortKey::PriceDesc));
    let ids: Vec<i32> = storefront
        .listing()
        .products()
        .iter()
        .map(|p| p.id.as_i32())
        .collect();
    assert_eq!(ids, vec![5, 1, 9]);

    storefront.dispatch(Intent::ChangeCategory(CategoryFilter::from("electronics")));
    storefront.dispatch(Intent::ChangeSearch("USB".to_string()));
    assert_eq!(storefront.listing().products().len(), 1);

    storefront.dispatch(Intent::ChangeSearch("bracelet".to_string()));
    assert_eq!(storefront.listing(), Listing::NoMatches);
}
