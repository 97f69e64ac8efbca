//! Catalog product and cart entry types.

use rocket_shoes_core::{CurrencyCode, Price, ProductId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Product record as served by the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductDetails {
    /// Catalog id, shared with the stock endpoint.
    pub id: ProductId,
    /// Display title.
    pub title: String,
    /// Unit price. Accepted as a JSON number or string.
    pub price: Decimal,
    /// Product image URL.
    pub image: String,
}

/// A cart entry: the catalog record plus the quantity the shopper selected.
///
/// This is also the persisted shape: the cart slot holds a JSON array of these.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub title: String,
    pub price: Decimal,
    pub image: String,
    /// Selected quantity, at least 1.
    pub amount: u32,
}

impl Product {
    /// Build a cart entry from a catalog record.
    #[must_use]
    pub fn from_details(details: ProductDetails, amount: u32) -> Self {
        Self {
            id: details.id,
            title: details.title,
            price: details.price,
            image: details.image,
            amount,
        }
    }

    /// Copy of this entry with a different amount.
    #[must_use]
    pub fn with_amount(&self, amount: u32) -> Self {
        Self {
            amount,
            ..self.clone()
        }
    }

    /// Unit price in the given currency.
    #[must_use]
    pub const fn unit_price(&self, currency_code: CurrencyCode) -> Price {
        Price::new(self.price, currency_code)
    }

    /// Unit price multiplied by the selected amount, or `None` on overflow.
    #[must_use]
    pub fn subtotal(&self, currency_code: CurrencyCode) -> Option<Price> {
        self.unit_price(currency_code).checked_times(self.amount)
    }
}
