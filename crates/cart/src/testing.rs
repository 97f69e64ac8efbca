//! In-memory collaborators for unit tests.

use std::collections::HashMap;
use std::io;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Mutex, PoisonError};

use rocket_shoes_core::ProductId;
use rust_decimal::Decimal;

use crate::catalog::{Catalog, CatalogError};
use crate::models::{Product, ProductDetails, Stock};
use crate::storage::{CartStorage, StorageError};

/// Catalog backed by a map of product id to available stock.
#[derive(Debug, Default)]
pub struct FakeCatalog {
    stock: Mutex<HashMap<i64, u32>>,
    failing: AtomicBool,
    product_calls: AtomicUsize,
    stock_calls: AtomicUsize,
}

impl FakeCatalog {
    /// Catalog with `(id, available)` pairs.
    pub fn with_products(entries: &[(i64, u32)]) -> Self {
        Self {
            stock: Mutex::new(entries.iter().copied().collect()),
            ..Self::default()
        }
    }

    /// Catalog record served for `id`.
    pub fn details(id: i64) -> ProductDetails {
        ProductDetails {
            id: ProductId::new(id),
            title: format!("Tênis {id}"),
            price: Decimal::new(100 + id, 0),
            image: format!("https://rocketshoes.test/img/{id}.jpg"),
        }
    }

    /// Cart entry the store builds for `id` at `amount`.
    pub fn product(id: i64, amount: u32) -> Product {
        Product::from_details(Self::details(id), amount)
    }

    pub fn restock(&self, id: i64, available: u32) {
        self.stock
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(id, available);
    }

    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    pub fn product_calls(&self) -> usize {
        self.product_calls.load(Ordering::SeqCst)
    }

    pub fn stock_calls(&self) -> usize {
        self.stock_calls.load(Ordering::SeqCst)
    }

    fn lookup(&self, id: ProductId) -> Result<u32, CatalogError> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(CatalogError::Api {
                status: 503,
                message: "unavailable".to_string(),
            });
        }
        self.stock
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&id.as_i64())
            .copied()
            .ok_or_else(|| CatalogError::NotFound(format!("products/{id}")))
    }
}

impl Catalog for FakeCatalog {
    async fn product(&self, id: ProductId) -> Result<ProductDetails, CatalogError> {
        self.product_calls.fetch_add(1, Ordering::SeqCst);
        self.lookup(id)?;
        Ok(Self::details(id.as_i64()))
    }

    async fn stock(&self, id: ProductId) -> Result<Stock, CatalogError> {
        self.stock_calls.fetch_add(1, Ordering::SeqCst);
        let amount = self.lookup(id)?;
        tokio::task::yield_now().await;
        Ok(Stock { id, amount })
    }
}

/// Storage that reads as empty and refuses every write.
#[derive(Debug, Default)]
pub struct FailingStorage;

impl CartStorage for FailingStorage {
    fn get(&self, _key: &str) -> Result<Option<String>, StorageError> {
        Ok(None)
    }

    fn set(&self, _key: &str, _value: &str) -> Result<(), StorageError> {
        Err(StorageError::Io {
            path: PathBuf::from("/dev/full"),
            source: io::Error::other("disk full"),
        })
    }
}
