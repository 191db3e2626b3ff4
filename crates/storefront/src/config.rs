//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Optional
//! - `FAKESTORE_CATALOG_URL` - Catalog endpoint (default: <https://fakestoreapi.com/products>)
//! - `FAKESTORE_DATA_DIR` - Directory for the durable cart record (default: `.fakestore`)
//! - `FAKESTORE_STORAGE_QUOTA_BYTES` - Byte limit for stored records (default: unlimited)
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment name

use std::path::PathBuf;

use thiserror::Error;
use url::Url;

/// Default remote catalog endpoint.
pub const DEFAULT_CATALOG_URL: &str = "https://fakestoreapi.com/products";

/// Default directory for durable storage.
pub const DEFAULT_DATA_DIR: &str = ".fakestore";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Storefront application configuration.
#[derive(Debug, Clone)]
pub struct StorefrontConfig {
    /// Remote catalog configuration
    pub catalog: CatalogConfig,
    /// Durable storage configuration
    pub storage: StorageConfig,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment name
    pub sentry_environment: Option<String>,
}

/// Remote catalog configuration.
#[derive(Debug, Clone)]
pub struct CatalogConfig {
    /// Endpoint returning the JSON product array
    pub url: Url,
}

/// Durable storage configuration.
#[derive(Debug, Clone)]
pub struct StorageConfig {
    /// Directory records are written to
    pub data_dir: PathBuf,
    /// Optional byte quota across all records
    pub quota_bytes: Option<u64>,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            quota_bytes: None,
        }
    }
}

impl StorefrontConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is present but invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is present but invalid.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let catalog = CatalogConfig {
            url: parse_catalog_url(
                "FAKESTORE_CATALOG_URL",
                &lookup("FAKESTORE_CATALOG_URL").unwrap_or_else(|| DEFAULT_CATALOG_URL.to_string()),
            )?,
        };

        let storage = StorageConfig {
            data_dir: lookup("FAKESTORE_DATA_DIR")
                .filter(|dir| !dir.trim().is_empty())
                .map_or_else(|| PathBuf::from(DEFAULT_DATA_DIR), PathBuf::from),
            quota_bytes: lookup("FAKESTORE_STORAGE_QUOTA_BYTES")
                .map(|raw| parse_quota("FAKESTORE_STORAGE_QUOTA_BYTES", &raw))
                .transpose()?,
        };

        Ok(Self {
            catalog,
            storage,
            sentry_dsn: lookup("SENTRY_DSN").filter(|dsn| !dsn.is_empty()),
            sentry_environment: lookup("SENTRY_ENVIRONMENT"),
        })
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Parse and validate a catalog URL (http or https only).
///
/// # Errors
///
/// Returns `ConfigError::InvalidEnvVar` naming `var_name` if the value is not
/// an absolute http(s) URL.
pub fn parse_catalog_url(var_name: &str, raw: &str) -> Result<Url, ConfigError> {
    let url = Url::parse(raw.trim())
        .map_err(|e| ConfigError::InvalidEnvVar(var_name.to_string(), e.to_string()))?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(ConfigError::InvalidEnvVar(
            var_name.to_string(),
            format!("unsupported scheme '{other}' (expected http or https)"),
        )),
    }
}

/// Parse a positive byte quota.
fn parse_quota(var_name: &str, raw: &str) -> Result<u64, ConfigError> {
    match raw.trim().parse::<u64>() {
        Ok(0) => Err(ConfigError::InvalidEnvVar(
            var_name.to_string(),
            "must be greater than zero".to_string(),
        )),
        Ok(quota) => Ok(quota),
        Err(e) => Err(ConfigError::InvalidEnvVar(var_name.to_string(), e.to_string())),
    }
}
