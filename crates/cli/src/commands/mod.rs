//! Command implementations.

pub mod cart;
pub mod catalog;

use askama::Template;
use fakestore_storefront::catalog::CatalogClient;
use fakestore_storefront::config::StorefrontConfig;
use fakestore_storefront::error::AppError;
use fakestore_storefront::intent::UiEvent;
use fakestore_storefront::state::Storefront;
use fakestore_storefront::storage::{FileStorage, LocalStorage, MemoryStorage};

/// A storefront session plus the catalog it reads from.
pub struct Session {
    pub storefront: Storefront,
    client: CatalogClient,
}

impl Session {
    /// Open the cart store and restore the saved cart.
    pub fn open(config: &StorefrontConfig, ephemeral: bool) -> Self {
        let storage: Box<dyn LocalStorage> = if ephemeral {
            Box::new(MemoryStorage::new())
        } else {
            Box::new(
                FileStorage::new(config.storage.data_dir.clone())
                    .with_quota(config.storage.quota_bytes),
            )
        };
        let mut storefront = Storefront::new(storage);
        let _ = take_notices(storefront.start());
        Self {
            storefront,
            client: CatalogClient::new(&config.catalog),
        }
    }

    /// Fetch the catalog.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Fetch` if the catalog could not be loaded.
    pub async fn load_catalog(&mut self) -> Result<(), AppError> {
        for event in self.storefront.load_catalog(&self.client).await {
            if let UiEvent::CatalogFailed(e) = event {
                return Err(e.into());
            }
        }
        Ok(())
    }
}

/// Show warnings carried by `events` and return the remaining events.
pub fn take_notices(events: Vec<UiEvent>) -> Vec<UiEvent> {
    events
        .into_iter()
        .filter_map(|event| match event {
            UiEvent::StorageWarning(e) => {
                notice(&e.into());
                None
            }
            UiEvent::CartReset(e) => {
                notice(&e.into());
                None
            }
            other => Some(other),
        })
        .collect()
}

#[allow(clippy::print_stderr)]
fn notice(error: &AppError) {
    error.report();
    eprintln!("{}", error.user_message());
}

/// Render a view to stdout.
#[allow(clippy::print_stdout)]
pub fn print_view(view: &impl Template) -> Result<(), AppError> {
    println!("{}", view.render()?);
    Ok(())
}

/// Print a plain line to stdout.
#[allow(clippy::print_stdout)]
pub fn print_line(line: &str) {
    println!("{line}");
}
