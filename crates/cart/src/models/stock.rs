//! Inventory record.

use rocket_shoes_core::ProductId;
use serde::{Deserialize, Serialize};

/// Available inventory for a product.
///
/// Fetched on demand before every quantity change and never cached.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stock {
    /// Product the inventory belongs to.
    pub id: ProductId,
    /// Units available for sale.
    pub amount: u32,
}

impl Stock {
    /// Whether at least `requested` units can be sold.
    #[must_use]
    pub const fn covers(&self, requested: u32) -> bool {
        requested <= self.amount
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_covers() {
        let stock = Stock {
            id: ProductId::new(1),
            amount: 3,
        };
        assert!(stock.covers(0));
        assert!(stock.covers(3));
        assert!(!stock.covers(4));
    }

    #[test]
    fn test_deserialize_wire_shape() {
        let stock: Stock = serde_json::from_str(r#"{"id": 2, "amount": 5}"#).unwrap();
        assert_eq!(stock.id, ProductId::new(2));
        assert_eq!(stock.amount, 5);
    }

    #[test]
    fn test_negative_amount_is_rejected() {
        assert!(serde_json::from_str::<Stock>(r#"{"id": 2, "amount": -1}"#).is_err());
    }
}
