//! Rocket Shoes cart library.
//!
//! A shopping-cart state container for the storefront client. It tracks the
//! products a shopper selected, persists that selection in a key-value slot
//! so it survives reloads, and validates quantities against the remote
//! inventory service on every mutation.
//!
//! # Architecture
//!
//! - [`store::CartStore`] owns the cart and is injected into consumers
//! - [`catalog::Catalog`] fetches product details and live stock
//! - [`storage::CartStorage`] is the string slot the cart is persisted to
//! - [`notify::Notifier`] shows localized notices for rejected operations
//!
//! # Example
//!
//! ```rust,ignore
//! use rocket_shoes_cart::{CartConfig, CartStore, FileStorage, HttpCatalog, TracingNotifier};
//!
//! let config = CartConfig::from_env()?;
//! let catalog = HttpCatalog::new(&config.catalog)?;
//! let storage = FileStorage::new(&config.storage_path);
//! let mut store = CartStore::load(catalog, storage, TracingNotifier::new(config.locale))?;
//!
//! store.add_product(ProductId::new(1)).await?;
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod catalog;
pub mod config;
pub mod error;
pub mod models;
pub mod notify;
pub mod shared;
pub mod storage;
pub mod store;
pub mod summary;

#[cfg(test)]
mod testing;

pub use catalog::{Catalog, CatalogError, HttpCatalog};
pub use config::{CartConfig, CatalogConfig, ConfigError};
pub use error::{CartError, Operation};
pub use models::{Product, ProductDetails, Stock};
pub use notify::{Notice, Notifier, RecordingNotifier, TracingNotifier};
pub use shared::SharedCart;
pub use storage::{CART_STORAGE_KEY, CartStorage, FileStorage, MemoryStorage, StorageError};
pub use store::{CartStore, UpdateProductAmount};
pub use summary::{CartSummary, LineSummary};
