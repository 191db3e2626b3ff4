//! HTTP catalog client.
//!
//! Issues a single unauthenticated GET against the configured endpoint and
//! expects a JSON array of products back.

use fakestore_core::Product;
use reqwest::header::ACCEPT;
use tracing::{debug, error, instrument};
use url::Url;

use super::{CatalogSource, FetchError};
use crate::config::CatalogConfig;

/// Maximum number of body characters echoed into logs.
const LOGGED_BODY_CHARS: usize = 500;

/// Client for the remote product catalog.
#[derive(Debug, Clone)]
pub struct CatalogClient {
    client: reqwest::Client,
    endpoint: Url,
}

impl CatalogClient {
    /// Create a new catalog client.
    #[must_use]
    pub fn new(config: &CatalogConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint: config.url.clone(),
        }
    }

    /// The endpoint products are fetched from.
    #[must_use]
    pub const fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

impl CatalogSource for CatalogClient {
    #[instrument(skip(self), fields(endpoint = %self.endpoint))]
    async fn fetch_products(&self) -> Result<Vec<Product>, FetchError> {
        let response = self
            .client
            .get(self.endpoint.clone())
            .header(ACCEPT, "application/json")
            .send()
            .await
            .map_err(FetchError::Network)?;

        let status = response.status();

        // Get response body as text first for better error diagnostics
        let body = response.text().await.map_err(FetchError::Network)?;

        if !status.is_success() {
            error!(
                status = %status,
                body = %body.chars().take(LOGGED_BODY_CHARS).collect::<String>(),
                "Catalog returned non-success status"
            );
            return Err(FetchError::Status(status.as_u16()));
        }

        let products: Vec<Product> = serde_json::from_str(&body).map_err(|e| {
            error!(
                error = %e,
                body = %body.chars().take(LOGGED_BODY_CHARS).collect::<String>(),
                "Failed to parse catalog response"
            );
            FetchError::Malformed(e)
        })?;

        debug!(count = products.len(), "Catalog response parsed");
        Ok(products)
    }
}
