//! Rocket Shoes CLI - Inspect and change the persisted cart.
//!
//! # Usage
//!
//! ```bash
//! # Show the cart and its total
//! rs-cart show
//!
//! # Add one unit of product 3
//! rs-cart add 3
//!
//! # Set product 3 to two units
//! rs-cart update 3 2
//!
//! # Remove product 3
//! rs-cart remove 3
//!
//! # Use another storage file and English messages
//! rs-cart --storage /tmp/cart.json --locale en show
//! ```
//!
//! # Commands
//!
//! - `show` - Print the cart
//! - `add` - Add one unit of a product
//! - `remove` - Remove a product
//! - `update` - Set a product's amount
//!
//! Configuration is read from the environment; see `rocket_shoes_cart::config`.

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use rocket_shoes_cart::CartConfig;
use rocket_shoes_core::{Locale, ProductId};
use sentry::integrations::tracing as sentry_tracing;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;
mod notify;

#[derive(Parser)]
#[command(name = "rs-cart")]
#[command(author, version, about = "Rocket Shoes cart tools")]
struct Cli {
    /// Storage file (overrides `ROCKETSHOES_STORAGE_PATH`)
    #[arg(long, global = true)]
    storage: Option<PathBuf>,

    /// Message and price locale, `pt-BR` or `en` (overrides `ROCKETSHOES_LOCALE`)
    #[arg(long, global = true)]
    locale: Option<Locale>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the cart
    Show,
    /// Add one unit of a product
    Add {
        /// Product id
        id: ProductId,
    },
    /// Remove a product from the cart
    Remove {
        /// Product id
        id: ProductId,
    },
    /// Set the amount of a product already in the cart
    Update {
        /// Product id
        id: ProductId,
        /// New amount (at least 1)
        amount: u32,
    },
}

/// Initialize Sentry error tracking and return guard that must be kept alive.
fn init_sentry(config: &CartConfig) -> Option<sentry::ClientInitGuard> {
    let dsn = config.sentry_dsn.as_ref()?;

    let guard = sentry::init((
        dsn.as_str(),
        sentry::ClientOptions {
            release: sentry::release_name!(),
            attach_stacktrace: true,
            ..Default::default()
        },
    ));

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

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Load configuration from environment (needed for Sentry init)
    let config = CartConfig::from_env();

    // Initialize Sentry (must be done before tracing subscriber)
    let _sentry_guard = config.as_ref().ok().and_then(init_sentry);

    // Defaults to info level for our crates if RUST_LOG is not set
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "rocket_shoes_cart=info,rocket_shoes_cli=info".into());

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .with(sentry_tracing::layer().event_filter(sentry_event_filter))
        .init();

    let result = match config {
        Ok(config) => run(cli, config).await,
        Err(e) => Err(e.into()),
    };

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli, mut config: CartConfig) -> Result<(), commands::cart::CommandError> {
    if let Some(storage) = cli.storage {
        config.storage_path = storage;
    }
    if let Some(locale) = cli.locale {
        config.locale = locale;
    }

    let mut store = commands::cart::open(&config)?;

    match cli.command {
        Commands::Show => {}
        Commands::Add { id } => commands::cart::add(&mut store, id).await?,
        Commands::Remove { id } => commands::cart::remove(&mut store, id)?,
        Commands::Update { id, amount } => {
            commands::cart::update(&mut store, id, amount).await?;
        }
    }

    let mut stdout = std::io::stdout().lock();
    commands::cart::write_summary(&mut stdout, &store.summary(), config.locale)?;
    Ok(())
}
