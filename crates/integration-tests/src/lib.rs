//! Integration tests for Fakestore.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p fakestore-integration-tests
//! ```
//!
//! Tests run against an in-process mock of the catalog API bound to a random
//! local port, so no network access is needed.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use axum::http::StatusCode;
use axum::http::header::CONTENT_TYPE;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Router, extract::State};
use fakestore_storefront::catalog::CatalogClient;
use fakestore_storefront::config::CatalogConfig;
use serde_json::{Value, json};
use url::Url;

/// A running mock catalog endpoint.
pub struct MockCatalog {
    pub url: Url,
    hits: Arc<AtomicUsize>,
}

impl MockCatalog {
    /// Number of requests served so far.
    #[must_use]
    pub fn hits(&self) -> usize {
        self.hits.load(Ordering::SeqCst)
    }

    /// A client pointed at this mock.
    #[must_use]
    pub fn client(&self) -> CatalogClient {
        CatalogClient::new(&CatalogConfig {
            url: self.url.clone(),
        })
    }
}

#[derive(Clone)]
struct Reply {
    status: StatusCode,
    body: Arc<str>,
    hits: Arc<AtomicUsize>,
}

async fn products(State(reply): State<Reply>) -> impl IntoResponse {
    reply.hits.fetch_add(1, Ordering::SeqCst);
    (
        reply.status,
        [(CONTENT_TYPE, "application/json")],
        reply.body.to_string(),
    )
}

/// Serve `body` with `status` at `/products` until the runtime shuts down.
///
/// # Panics
///
/// Panics if no local port can be bound.
pub async fn serve_catalog(status: StatusCode, body: impl Into<String>) -> MockCatalog {
    let hits = Arc::new(AtomicUsize::new(0));
    let reply = Reply {
        status,
        body: Arc::from(body.into()),
        hits: Arc::clone(&hits),
    };
    let app = Router::new()
        .route("/products", get(products))
        .with_state(reply);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind listener");
    let addr = listener.local_addr().expect("local addr");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("serve mock catalog");
    });

    MockCatalog {
        url: Url::parse(&format!("http://{addr}/products")).expect("mock url"),
        hits,
    }
}

/// A URL on a local port nothing is listening on.
///
/// # Panics
///
/// Panics if no local port can be bound.
pub async fn unreachable_catalog_url() -> Url {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind listener");
    let addr = listener.local_addr().expect("local addr");
    drop(listener);
    Url::parse(&format!("http://{addr}/products")).expect("url")
}

/// Three products shaped like the public fakestore API, extra fields included.
#[must_use]
pub fn sample_products() -> Value {
    json!([
        {
            "id": 1,
            "title": "Fjallraven Backpack",
            "price": 109.95,
            "description": "Your perfect pack for everyday use",
            "category": "men's clothing",
            "image": "https://fakestoreapi.com/img/81fPKd-2AYL._AC_SL1500_.jpg",
            "rating": { "rate": 3.9, "count": 120 }
        },
        {
            "id": 5,
            "title": "Dragon Station Chain Bracelet",
            "price": 695,
            "description": "From our Legends Collection",
            "category": "jewelery",
            "image": "https://fakestoreapi.com/img/71pWzhdJNwL._AC_UL640_QL65_ML3_.jpg",
            "rating": { "rate": 4.6, "count": 400 }
        },
        {
            "id": 9,
            "title": "WD 2TB Elements Portable Hard Drive",
            "price": 64,
            "description": "USB 3.0 and USB 2.0 compatibility",
            "category": "electronics",
            "image": "https://fakestoreapi.com/img/61IBBVJvSDL._AC_SY879_.jpg",
            "rating": { "rate": 3.3, "count": 203 }
        }
    ])
}

/// Serve [`sample_products`] with a 200.
pub async fn serve_sample_catalog() -> MockCatalog {
    serve_catalog(StatusCode::OK, sample_products().to_string()).await
}
