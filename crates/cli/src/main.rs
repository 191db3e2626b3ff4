//! Fakestore CLI - Browse the catalog and manage a persistent cart.
//!
//! # Usage
//!
//! ```bash
//! # List products, optionally filtered and sorted
//! fakestore products --category electronics --search ssd --sort price-asc
//!
//! # Add product 3 to the cart, then change its quantity
//! fakestore add 3
//! fakestore set-qty 3 2
//!
//! # Place the (simulated) order
//! fakestore checkout
//! ```
//!
//! # Commands
//!
//! - `products` - List the catalog
//! - `categories` - List catalog categories
//! - `cart` - Show the cart
//! - `add`, `remove`, `set-qty` - Edit the cart
//! - `checkout` - Simulated checkout

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use fakestore_core::{ProductId, SortKey};
use fakestore_storefront::config::{StorefrontConfig, parse_catalog_url};
use fakestore_storefront::error::AppError;
use sentry::integrations::tracing as sentry_tracing;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;

use commands::Session;

#[derive(Parser)]
#[command(name = "fakestore")]
#[command(author, version, about = "Fakestore terminal storefront")]
struct Cli {
    /// Directory holding the saved cart (overrides `FAKESTORE_DATA_DIR`)
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Catalog endpoint (overrides `FAKESTORE_CATALOG_URL`)
    #[arg(long, global = true)]
    catalog_url: Option<String>,

    /// Keep the cart in memory; nothing is written to disk
    #[arg(long, global = true)]
    ephemeral: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List products
    Products {
        /// Only show this category (exact match)
        #[arg(short, long)]
        category: Option<String>,

        /// Case-insensitive text to find in title or description
        #[arg(short, long)]
        search: Option<String>,

        /// Sort order (`none`, `price-asc`, `price-desc`, `name-asc`, `name-desc`)
        #[arg(long, default_value = "none")]
        sort: SortKey,
    },
    /// List catalog categories
    Categories,
    /// Show the cart
    Cart,
    /// Add one unit of a product to the cart
    Add {
        /// Product id
        id: ProductId,
    },
    /// Remove a product from the cart
    Remove {
        /// Product id
        id: ProductId,
    },
    /// Set the quantity of a cart line (values below 1 become 1)
    SetQty {
        /// Product id
        id: ProductId,

        /// New quantity
        #[arg(allow_hyphen_values = true)]
        quantity: String,
    },
    /// Place the order and empty the cart
    Checkout,
}

/// Initialize Sentry error tracking and return guard that must be kept alive.
fn init_sentry(config: &StorefrontConfig) -> Option<sentry::ClientInitGuard> {
    let dsn = config.sentry_dsn.as_ref()?;

    let guard = sentry::init((
        dsn.as_str(),
        sentry::ClientOptions {
            release: sentry::release_name!(),
            environment: config
                .sentry_environment
                .clone()
                .map(std::borrow::Cow::Owned),
            attach_stacktrace: true,
            ..Default::default()
        },
    ));

    tracing::info!("Sentry initialized");
    Some(guard)
}

/// Filter tracing events to Sentry event types.
fn sentry_event_filter(metadata: &tracing::Metadata<'_>) -> sentry_tracing::EventFilter {
    match *metadata.level() {
        tracing::Level::ERROR | tracing::Level::WARN => sentry_tracing::EventFilter::Event,
        tracing::Level::INFO | tracing::Level::DEBUG => sentry_tracing::EventFilter::Breadcrumb,
        _ => sentry_tracing::EventFilter::Ignore,
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let cli = Cli::parse();

    let config = match load_config(&cli) {
        Ok(config) => config,
        Err(e) => exit_with(&e),
    };

    // Initialize Sentry (must be done before tracing subscriber)
    let _sentry_guard = init_sentry(&config);

    // Logs go to stderr so they never mix with rendered views
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "fakestore_cli=warn,fakestore_storefront=warn".into());

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(sentry_tracing::layer().event_filter(sentry_event_filter))
        .init();

    if let Err(e) = run(cli, &config).await {
        exit_with(&e);
    }
}

/// Environment configuration with command-line overrides applied.
fn load_config(cli: &Cli) -> Result<StorefrontConfig, AppError> {
    let mut config = StorefrontConfig::from_env()?;
    if let Some(raw) = &cli.catalog_url {
        config.catalog.url = parse_catalog_url("--catalog-url", raw)?;
    }
    if let Some(dir) = &cli.data_dir {
        config.storage.data_dir.clone_from(dir);
    }
    Ok(config)
}

#[allow(clippy::print_stderr)]
fn exit_with(error: &AppError) -> ! {
    error.report();
    eprintln!("{}", error.user_message());
    std::process::exit(1);
}

async fn run(cli: Cli, config: &StorefrontConfig) -> Result<(), AppError> {
    let mut session = Session::open(config, cli.ephemeral);
    match cli.command {
        Commands::Products {
            category,
            search,
            sort,
        } => commands::catalog::products(&mut session, category, search, sort).await?,
        Commands::Categories => commands::catalog::categories(&mut session).await?,
        Commands::Cart => commands::cart::show(&session)?,
        Commands::Add { id } => commands::cart::add(&mut session, id).await?,
        Commands::Remove { id } => commands::cart::remove(&mut session, id)?,
        Commands::SetQty { id, quantity } => {
            commands::cart::set_quantity(&mut session, id, quantity)?;
        }
        Commands::Checkout => commands::cart::checkout(&mut session)?,
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_set_qty_accepts_negative_input() {
        let cli = Cli::try_parse_from(["fakestore", "set-qty", "3", "-2"]);
        assert!(matches!(
            cli.map(|c| c.command),
            Ok(Commands::SetQty { quantity, .. }) if quantity == "-2"
        ));
    }

    #[test]
    fn test_unknown_sort_rejected() {
        assert!(Cli::try_parse_from(["fakestore", "products", "--sort", "random"]).is_err());
    }
}
