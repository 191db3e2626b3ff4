//! Unified error handling with Sentry integration.
//!
//! Provides a unified `AppError` type for the presentation layer. None of
//! these errors is fatal: each one has a user-facing message and the caller
//! carries on from a safe state.

use thiserror::Error;

use crate::cart::{EmptyCartError, StorageCorruptError};
use crate::catalog::FetchError;
use crate::config::ConfigError;
use crate::storage::StorageWriteError;

/// Application-level error type for the storefront.
#[derive(Debug, Error)]
pub enum AppError {
    /// Configuration was invalid.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Catalog could not be loaded.
    #[error("Catalog error: {0}")]
    Fetch(#[from] FetchError),

    /// Stored cart was unusable and has been discarded.
    #[error("Storage corrupt: {0}")]
    StorageCorrupt(#[from] StorageCorruptError),

    /// Cart could not be saved; the in-memory cart is unaffected.
    #[error("Storage write failed: {0}")]
    StorageWrite(#[from] StorageWriteError),

    /// Checkout attempted on an empty cart.
    #[error("Checkout refused: {0}")]
    EmptyCart(#[from] EmptyCartError),

    /// A view template failed to render.
    #[error("Render error: {0}")]
    Render(#[from] askama::Error),
}

impl AppError {
    /// Message safe to show the shopper.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Config(e) => e.to_string(),
            Self::Fetch(_) => {
                "Oops! The products could not be loaded. Please try again later.".to_string()
            }
            Self::StorageCorrupt(_) => {
                "Your saved cart could not be read and has been reset.".to_string()
            }
            Self::StorageWrite(_) => {
                "There was a problem saving your cart. Your local storage may be full."
                    .to_string()
            }
            Self::EmptyCart(_) => {
                "Your cart is empty. Add products before checking out.".to_string()
            }
            Self::Render(_) => "Internal error".to_string(),
        }
    }

    /// Whether the error originates in infrastructure rather than user action.
    #[must_use]
    pub const fn is_infrastructure(&self) -> bool {
        matches!(
            self,
            Self::Fetch(_) | Self::StorageCorrupt(_) | Self::StorageWrite(_) | Self::Render(_)
        )
    }

    /// Log the error and capture infrastructure failures to Sentry.
    pub fn report(&self) {
        if self.is_infrastructure() {
            let event_id = sentry::capture_error(self);
            tracing::error!(
                error = %self,
                sentry_event_id = %event_id,
                "Storefront error"
            );
        } else {
            tracing::warn!(error = %self, "Storefront refused action");
        }
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;

/// Add a breadcrumb for user actions.
///
/// Breadcrumbs appear in Sentry error reports to show the trail of user actions
/// leading up to an error.
///
/// # Example
///
/// ```rust,ignore
/// add_breadcrumb("cart", "Added to cart", Some(&[("product_id", "3")]));
/// ```
pub fn add_breadcrumb(category: &str, message: &str, data: Option<&[(&str, &str)]>) {
    let mut breadcrumb = sentry::Breadcrumb {
        category: Some(category.to_string()),
        message: Some(message.to_string()),
        level: sentry::Level::Info,
        ..Default::default()
    };

    if let Some(pairs) = data {
        for (key, value) in pairs {
            breadcrumb.data.insert(
                (*key).to_string(),
                serde_json::Value::String((*value).to_string()),
            );
        }
    }

    sentry::add_breadcrumb(breadcrumb);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_error_display() {
        let err = AppError::from(FetchError::Status(503));
        assert_eq!(err.to_string(), "Catalog error: catalog returned HTTP 503");

        let err = AppError::from(EmptyCartError);
        assert_eq!(err.to_string(), "Checkout refused: cart is empty");
    }

    #[test]
    fn test_user_message_hides_details() {
        let err = AppError::from(FetchError::Status(500));
        assert!(!err.user_message().contains("500"));
        assert!(err.is_infrastructure());
    }

    #[test]
    fn test_empty_cart_is_not_infrastructure() {
        let err = AppError::from(EmptyCartError);
        assert!(!err.is_infrastructure());
        assert!(err.user_message().contains("empty"));
    }

    #[test]
    fn test_storage_write_message_names_local_storage() {
        let err = AppError::from(StorageWriteError::QuotaExceeded {
            needed: 20,
            quota: 10,
        });
        let message = err.user_message();
        assert!(message.contains("local storage may be full"));
        assert!(!message.contains("browser"));
        assert!(!message.contains("20"));
    }

    #[test]
    fn test_report_without_sentry_client_is_harmless() {
        AppError::from(FetchError::Status(502)).report();
        AppError::from(EmptyCartError).report();
    }
}
