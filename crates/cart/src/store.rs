//! Cart state container.
//!
//! [`CartStore`] owns the shopper's cart: it is loaded from the storage slot
//! once, read through [`CartStore::cart`], and changed only through the three
//! mutation operations. Each mutation either commits completely (memory and
//! storage both updated) or leaves the prior state untouched and shows a
//! notice.
//!
//! Mutations take `&mut self`, so a second mutation cannot start while one
//! is suspended on a catalog fetch. Wrap the store in a
//! [`SharedCart`](crate::shared::SharedCart) to share it between tasks.

use rocket_shoes_core::{CurrencyCode, ProductId};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};

use crate::catalog::Catalog;
use crate::error::{CartError, Operation};
use crate::models::Product;
use crate::notify::Notifier;
use crate::storage::{CART_STORAGE_KEY, CartStorage};
use crate::summary::CartSummary;

/// Arguments of [`CartStore::update_product_amount`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProductAmount {
    pub product_id: ProductId,
    pub amount: u32,
}

/// The shopper's cart, its persistence slot and its collaborators.
pub struct CartStore<C, S, N> {
    catalog: C,
    storage: S,
    notifier: N,
    key: String,
    items: Vec<Product>,
}

impl<C, S, N> std::fmt::Debug for CartStore<C, S, N> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CartStore")
            .field("key", &self.key)
            .field("items", &self.items)
            .finish_non_exhaustive()
    }
}

impl<C, S, N> CartStore<C, S, N>
where
    C: Catalog,
    S: CartStorage,
    N: Notifier,
{
    /// Load the cart from the default storage key.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage slot cannot be read.
    pub fn load(catalog: C, storage: S, notifier: N) -> Result<Self, CartError> {
        Self::load_with_key(catalog, storage, notifier, CART_STORAGE_KEY)
    }

    /// Load the cart from `key`.
    ///
    /// A missing or blank slot yields an empty cart. A slot that does not
    /// parse as a cart is logged and also yields an empty cart; it stays in
    /// storage until the next successful mutation overwrites it.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage slot cannot be read.
    pub fn load_with_key(
        catalog: C,
        storage: S,
        notifier: N,
        key: impl Into<String>,
    ) -> Result<Self, CartError> {
        let key = key.into();
        let items = storage
            .get(&key)?
            .map(|blob| parse_blob(&key, &blob))
            .unwrap_or_default();

        debug!(key = %key, items = items.len(), "Cart loaded");

        Ok(Self {
            catalog,
            storage,
            notifier,
            key,
            items,
        })
    }

    /// Current cart entries in insertion order.
    #[must_use]
    pub fn cart(&self) -> &[Product] {
        &self.items
    }

    /// Storage key the cart is persisted under.
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// The storage backend.
    #[must_use]
    pub const fn storage(&self) -> &S {
        &self.storage
    }

    /// The notifier.
    #[must_use]
    pub const fn notifier(&self) -> &N {
        &self.notifier
    }

    /// Totals and per-line subtotals of the current cart.
    #[must_use]
    pub fn summary(&self) -> CartSummary {
        CartSummary::from_items(&self.items, CurrencyCode::default())
    }

    /// Add one unit of a product.
    ///
    /// A product not yet in the cart is fetched from the catalog and appended
    /// with amount 1 if any stock exists. A product already in the cart has
    /// its amount incremented if stock allows.
    ///
    /// Product details come from the catalog, which may serve them from a
    /// cache. With [`HttpCatalog`](crate::catalog::HttpCatalog), re-adding a
    /// product removed within the last 5 minutes fetches only its stock.
    ///
    /// # Errors
    ///
    /// Returns `OutOfStock` when inventory does not cover one more unit, or
    /// the catalog/storage error that aborted the operation. The shopper is
    /// notified in every error case and the cart is left unchanged.
    #[instrument(skip(self), fields(product_id = %product_id))]
    pub async fn add_product(&mut self, product_id: ProductId) -> Result<(), CartError> {
        let result = self.try_add_product(product_id).await;
        self.report(Operation::Add, result)
    }

    /// Remove a product from the cart.
    ///
    /// # Errors
    ///
    /// Returns `NotInCart` if the product is absent, or the storage error
    /// that aborted the operation. The shopper is notified in every error case.
    #[instrument(skip(self), fields(product_id = %product_id))]
    pub fn remove_product(&mut self, product_id: ProductId) -> Result<(), CartError> {
        let result = self.try_remove_product(product_id);
        self.report(Operation::Remove, result)
    }

    /// Set a product's amount.
    ///
    /// Checks run in order: amount at least 1, stock covers the amount,
    /// product present in the cart.
    ///
    /// # Errors
    ///
    /// Returns `InvalidAmount`, `OutOfStock` or `NotInCart` for rejected
    /// requests, or the catalog/storage error that aborted the operation.
    /// The shopper is notified in every error case.
    #[instrument(skip(self), fields(product_id = %update.product_id, amount = update.amount))]
    pub async fn update_product_amount(
        &mut self,
        update: UpdateProductAmount,
    ) -> Result<(), CartError> {
        let result = self.try_update_product_amount(update).await;
        self.report(Operation::UpdateAmount, result)
    }

    async fn try_add_product(&mut self, product_id: ProductId) -> Result<(), CartError> {
        let items = if let Some(current) = self.amount_of(product_id) {
            let stock = self.catalog.stock(product_id).await?;
            if stock.amount <= current {
                return Err(CartError::OutOfStock {
                    product_id,
                    requested: current.saturating_add(1),
                    available: stock.amount,
                });
            }
            self.replace_amount(product_id, current + 1)
        } else {
            let details = self.catalog.product(product_id).await?;
            let stock = self.catalog.stock(product_id).await?;
            if stock.amount == 0 {
                return Err(CartError::OutOfStock {
                    product_id,
                    requested: 1,
                    available: 0,
                });
            }
            let mut items = self.items.clone();
            items.push(Product::from_details(details, 1));
            items
        };

        self.commit(items)
    }

    fn try_remove_product(&mut self, product_id: ProductId) -> Result<(), CartError> {
        if self.amount_of(product_id).is_none() {
            return Err(CartError::NotInCart(product_id));
        }

        let items = self
            .items
            .iter()
            .filter(|item| item.id != product_id)
            .cloned()
            .collect();

        self.commit(items)
    }

    async fn try_update_product_amount(
        &mut self,
        UpdateProductAmount { product_id, amount }: UpdateProductAmount,
    ) -> Result<(), CartError> {
        if amount < 1 {
            return Err(CartError::InvalidAmount(amount));
        }

        let stock = self.catalog.stock(product_id).await?;
        if !stock.covers(amount) {
            return Err(CartError::OutOfStock {
                product_id,
                requested: amount,
                available: stock.amount,
            });
        }

        if self.amount_of(product_id).is_none() {
            return Err(CartError::NotInCart(product_id));
        }

        let items = self.replace_amount(product_id, amount);
        self.commit(items)
    }

    fn amount_of(&self, product_id: ProductId) -> Option<u32> {
        self.items
            .iter()
            .find(|item| item.id == product_id)
            .map(|item| item.amount)
    }

    fn replace_amount(&self, product_id: ProductId, amount: u32) -> Vec<Product> {
        self.items
            .iter()
            .map(|item| {
                if item.id == product_id {
                    item.with_amount(amount)
                } else {
                    item.clone()
                }
            })
            .collect()
    }

    /// Persist `items` and make them the current cart.
    ///
    /// Memory is only replaced after the write succeeds.
    fn commit(&mut self, items: Vec<Product>) -> Result<(), CartError> {
        let blob = serde_json::to_string(&items)?;
        self.storage.set(&self.key, &blob)?;
        self.items = items;
        debug!(items = self.items.len(), "Cart committed");
        Ok(())
    }

    fn report(&self, operation: Operation, result: Result<(), CartError>) -> Result<(), CartError> {
        if let Err(err) = &result {
            if err.is_rejection() {
                info!(operation = ?operation, error = %err, "Cart operation rejected");
            } else {
                tracing::error!(operation = ?operation, error = %err, "Cart operation failed");
            }
            self.notifier.error(err.notice(operation));
        }
        result
    }
}

fn parse_blob(key: &str, blob: &str) -> Vec<Product> {
    if blob.trim().is_empty() {
        return Vec::new();
    }

    serde_json::from_str(blob).unwrap_or_else(|e| {
        warn!(key = %key, error = %e, "Persisted cart is unreadable, starting with an empty cart");
        Vec::new()
    })
}
