//! Shared cart handle.

use std::sync::Arc;

use rocket_shoes_core::ProductId;
use tokio::sync::Mutex;

use crate::catalog::Catalog;
use crate::error::CartError;
use crate::models::Product;
use crate::notify::Notifier;
use crate::storage::CartStorage;
use crate::store::{CartStore, UpdateProductAmount};
use crate::summary::CartSummary;

/// Cart store shared between consumers.
///
/// This struct is cheaply cloneable via `Arc`. Every operation holds the
/// lock until it completes, catalog fetches included, so two overlapping
/// `add_product` calls for the same id run one after the other and the
/// second sees the first's result.
pub struct SharedCart<C, S, N> {
    inner: Arc<Mutex<CartStore<C, S, N>>>,
}

impl<C, S, N> Clone for SharedCart<C, S, N> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<C, S, N> SharedCart<C, S, N>
where
    C: Catalog,
    S: CartStorage,
    N: Notifier,
{
    /// Wrap a loaded store.
    #[must_use]
    pub fn new(store: CartStore<C, S, N>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(store)),
        }
    }

    /// Snapshot of the current cart entries.
    pub async fn cart(&self) -> Vec<Product> {
        self.inner.lock().await.cart().to_vec()
    }

    /// Snapshot of the cart totals.
    pub async fn summary(&self) -> CartSummary {
        self.inner.lock().await.summary()
    }

    /// See [`CartStore::add_product`].
    ///
    /// # Errors
    ///
    /// Propagates the store's error after the shopper has been notified.
    pub async fn add_product(&self, product_id: ProductId) -> Result<(), CartError> {
        self.inner.lock().await.add_product(product_id).await
    }

    /// See [`CartStore::remove_product`].
    ///
    /// # Errors
    ///
    /// Propagates the store's error after the shopper has been notified.
    pub async fn remove_product(&self, product_id: ProductId) -> Result<(), CartError> {
        self.inner.lock().await.remove_product(product_id)
    }

    /// See [`CartStore::update_product_amount`].
    ///
    /// # Errors
    ///
    /// Propagates the store's error after the shopper has been notified.
    pub async fn update_product_amount(
        &self,
        update: UpdateProductAmount,
    ) -> Result<(), CartError> {
        self.inner.lock().await.update_product_amount(update).await
    }
}
