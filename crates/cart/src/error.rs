//! Unified cart error type.
//!
//! Every cart operation returns `Result<(), CartError>`. Rejections (bad
//! amount, insufficient stock, unknown id) and failures (catalog, storage)
//! both map to a localized [`Notice`] for the shopper.

use rocket_shoes_core::ProductId;
use thiserror::Error;

use crate::catalog::CatalogError;
use crate::notify::Notice;
use crate::storage::StorageError;

/// The cart operation an error occurred in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    Add,
    Remove,
    UpdateAmount,
}

impl Operation {
    /// Generic notice shown when this operation fails.
    #[must_use]
    pub const fn failure_notice(self) -> Notice {
        match self {
            Self::Add => Notice::AddFailed,
            Self::Remove => Notice::RemoveFailed,
            Self::UpdateAmount => Notice::UpdateAmountFailed,
        }
    }
}

/// Cart operation error.
#[derive(Debug, Error)]
pub enum CartError {
    /// Requested amount is below 1.
    #[error("Invalid amount {0}: must be at least 1")]
    InvalidAmount(u32),

    /// Requested amount exceeds available stock.
    #[error("Product {product_id} out of stock: requested {requested}, available {available}")]
    OutOfStock {
        product_id: ProductId,
        requested: u32,
        available: u32,
    },

    /// Product is not in the cart.
    #[error("Product {0} is not in the cart")]
    NotInCart(ProductId),

    /// Catalog API operation failed.
    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),

    /// Storage slot operation failed.
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// Cart could not be serialized.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl CartError {
    /// Whether the operation was refused by validation rather than failing.
    #[must_use]
    pub const fn is_rejection(&self) -> bool {
        matches!(
            self,
            Self::InvalidAmount(_) | Self::OutOfStock { .. } | Self::NotInCart(_)
        )
    }

    /// Notice to show the shopper for this error.
    #[must_use]
    pub const fn notice(&self, operation: Operation) -> Notice {
        match self {
            Self::OutOfStock { .. } => Notice::OutOfStock,
            _ => operation.failure_notice(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cart_error_display() {
        let err = CartError::NotInCart(ProductId::new(4));
        assert_eq!(err.to_string(), "Product 4 is not in the cart");

        let err = CartError::OutOfStock {
            product_id: ProductId::new(1),
            requested: 3,
            available: 2,
        };
        assert_eq!(
            err.to_string(),
            "Product 1 out of stock: requested 3, available 2"
        );
    }

    #[test]
    fn test_rejections() {
        assert!(CartError::InvalidAmount(0).is_rejection());
        assert!(CartError::NotInCart(ProductId::new(1)).is_rejection());
        assert!(!CartError::Catalog(CatalogError::NotFound("x".to_string())).is_rejection());
    }

    #[test]
    fn test_out_of_stock_notice_is_shared() {
        let err = CartError::OutOfStock {
            product_id: ProductId::new(1),
            requested: 2,
            available: 1,
        };
        assert_eq!(err.notice(Operation::Add), Notice::OutOfStock);
        assert_eq!(err.notice(Operation::UpdateAmount), Notice::OutOfStock);
    }

    #[test]
    fn test_other_errors_use_operation_notice() {
        let err = CartError::NotInCart(ProductId::new(1));
        assert_eq!(err.notice(Operation::Remove), Notice::RemoveFailed);
        assert_eq!(err.notice(Operation::UpdateAmount), Notice::UpdateAmountFailed);

        let err = CartError::Catalog(CatalogError::RateLimited(5));
        assert_eq!(err.notice(Operation::Add), Notice::AddFailed);
    }
}
