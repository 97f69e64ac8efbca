//! Cart commands backed by the HTTP catalog and the storage file.

use std::io::{self, Write};

use rocket_shoes_cart::{
    CartConfig, CartError, CartStore, CartSummary, CatalogError, ConfigError, FileStorage,
    HttpCatalog, UpdateProductAmount,
};
use rocket_shoes_core::{Locale, ProductId};
use thiserror::Error;
use tracing::info;

use crate::notify::TerminalNotifier;

/// Store type used by every CLI command.
pub type CliStore = CartStore<HttpCatalog, FileStorage, TerminalNotifier<io::Stderr>>;

/// Errors that can occur while running a cart command.
#[derive(Debug, Error)]
pub enum CommandError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Catalog client error: {0}")]
    Catalog(#[from] CatalogError),

    #[error("{0}")]
    Cart(#[from] CartError),

    #[error("Failed to write output: {0}")]
    Io(#[from] io::Error),
}

/// Build the store from configuration and load the persisted cart.
///
/// # Errors
///
/// Returns an error if the HTTP client cannot be built or the storage
/// file cannot be read.
pub fn open(config: &CartConfig) -> Result<CliStore, CommandError> {
    let catalog = HttpCatalog::new(&config.catalog)?;
    let storage = FileStorage::new(&config.storage_path);
    let notifier = TerminalNotifier::stderr(config.locale);

    let store = CartStore::load_with_key(catalog, storage, notifier, config.cart_key.clone())?;

    info!(
        storage = %config.storage_path.display(),
        items = store.cart().len(),
        "Cart opened"
    );
    Ok(store)
}

/// Add one unit of `id`.
///
/// # Errors
///
/// Returns the store's error; the shopper notice has already been logged.
pub async fn add(store: &mut CliStore, id: ProductId) -> Result<(), CommandError> {
    store.add_product(id).await?;
    info!(product_id = %id, "Product added");
    Ok(())
}

/// Remove `id` from the cart.
///
/// # Errors
///
/// Returns the store's error; the shopper notice has already been logged.
pub fn remove(store: &mut CliStore, id: ProductId) -> Result<(), CommandError> {
    store.remove_product(id)?;
    info!(product_id = %id, "Product removed");
    Ok(())
}

/// Set the amount of `id`.
///
/// # Errors
///
/// Returns the store's error; the shopper notice has already been logged.
pub async fn update(store: &mut CliStore, id: ProductId, amount: u32) -> Result<(), CommandError> {
    store
        .update_product_amount(UpdateProductAmount {
            product_id: id,
            amount,
        })
        .await?;
    info!(product_id = %id, amount, "Product amount updated");
    Ok(())
}

/// Write the cart lines and totals to `out`.
///
/// # Errors
///
/// Returns an error if `out` cannot be written.
pub fn write_summary(
    out: &mut impl Write,
    summary: &CartSummary,
    locale: Locale,
) -> io::Result<()> {
    if summary.is_empty() {
        writeln!(out, "Cart is empty")?;
        return Ok(());
    }

    writeln!(out, "Cart ({} items):", summary.item_count)?;
    for line in &summary.lines {
        writeln!(
            out,
            "  #{} {} x{} @ {} = {}",
            line.product_id,
            line.title,
            line.amount,
            line.unit_price.format(locale),
            line.subtotal.format(locale)
        )?;
    }
    writeln!(
        out,
        "Total: {} ({} units)",
        summary.formatted_total(locale),
        summary.total_units
    )
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use rocket_shoes_cart::{Product, ProductDetails};
    use rocket_shoes_core::CurrencyCode;
    use rust_decimal::Decimal;

    use super::*;

    fn product(id: i64, price: Decimal, amount: u32) -> Product {
        Product::from_details(
            ProductDetails {
                id: ProductId::new(id),
                title: format!("Tênis {id}"),
                price,
                image: String::new(),
            },
            amount,
        )
    }

    fn render(items: &[Product], locale: Locale) -> String {
        let summary = CartSummary::from_items(items, CurrencyCode::BRL);
        let mut out = Vec::new();
        write_summary(&mut out, &summary, locale).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_empty_cart() {
        assert_eq!(render(&[], Locale::PtBr), "Cart is empty\n");
    }

    #[test]
    fn test_lines_and_total() {
        let output = render(&[product(1, Decimal::new(17990, 2), 2)], Locale::PtBr);
        assert_eq!(
            output,
            "Cart (1 items):\n  #1 Tênis 1 x2 @ R$ 179,90 = R$ 359,80\nTotal: R$ 359,80 (2 units)\n"
        );
    }

    #[test]
    fn test_overflowing_price_still_renders() {
        let output = render(&[product(1, Decimal::MAX, 2)], Locale::En);
        assert!(output.starts_with("Cart (1 items):"));
        assert!(output.contains("(2 units)"));
    }
}
