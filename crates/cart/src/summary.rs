//! Derived cart totals for display.

use rocket_shoes_core::{CurrencyCode, Locale, Price, ProductId};

use tracing::warn;

use crate::models::Product;

/// One cart line with its computed subtotal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineSummary {
    pub product_id: ProductId,
    pub title: String,
    pub amount: u32,
    pub unit_price: Price,
    pub subtotal: Price,
}

/// Totals for the whole cart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartSummary {
    pub lines: Vec<LineSummary>,
    /// Distinct products in the cart (the header badge count).
    pub item_count: usize,
    /// Sum of all amounts.
    pub total_units: u32,
    pub total: Price,
    /// A subtotal or the total exceeded the decimal range and was clamped.
    pub overflowed: bool,
}

impl CartSummary {
    /// Summarize cart entries in `currency_code`.
    ///
    /// Amounts that overflow the decimal range are clamped to [`Price::max`]
    /// and flagged in `overflowed`.
    #[must_use]
    pub fn from_items(items: &[Product], currency_code: CurrencyCode) -> Self {
        let mut overflowed = false;

        let lines: Vec<LineSummary> = items
            .iter()
            .map(|item| {
                let subtotal = item.subtotal(currency_code).unwrap_or_else(|| {
                    warn!(product_id = %item.id, amount = item.amount, "Line subtotal overflowed");
                    overflowed = true;
                    Price::max(currency_code)
                });
                LineSummary {
                    product_id: item.id,
                    title: item.title.clone(),
                    amount: item.amount,
                    unit_price: item.unit_price(currency_code),
                    subtotal,
                }
            })
            .collect();

        let total = lines
            .iter()
            .try_fold(Price::zero(currency_code), |sum, line| {
                sum.checked_plus(line.subtotal)
            })
            .unwrap_or_else(|| {
                warn!(lines = lines.len(), "Cart total overflowed");
                overflowed = true;
                Price::max(currency_code)
            });
        let total_units = lines
            .iter()
            .fold(0_u32, |sum, line| sum.saturating_add(line.amount));

        Self {
            item_count: lines.len(),
            total_units,
            total,
            overflowed,
            lines,
        }
    }

    /// Whether the cart has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Cart total formatted for `locale`.
    #[must_use]
    pub fn formatted_total(&self, locale: Locale) -> String {
        self.total.format(locale)
    }
}

#[cfg(test)]
#[allow(clippy::indexing_slicing)]
mod tests {
    use rust_decimal::Decimal;

    use super::*;
    use crate::models::ProductDetails;

    fn item(id: i64, price: Decimal, amount: u32) -> Product {
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

    #[test]
    fn test_empty_cart() {
        let summary = CartSummary::from_items(&[], CurrencyCode::BRL);
        assert!(summary.is_empty());
        assert_eq!(summary.item_count, 0);
        assert_eq!(summary.total_units, 0);
        assert_eq!(summary.formatted_total(Locale::PtBr), "R$ 0,00");
    }

    #[test]
    fn test_totals() {
        let items = [
            item(1, Decimal::new(17990, 2), 2),
            item(2, Decimal::new(13990, 2), 1),
        ];

        let summary = CartSummary::from_items(&items, CurrencyCode::BRL);

        assert_eq!(summary.item_count, 2);
        assert_eq!(summary.total_units, 3);
        assert!(!summary.overflowed);
        assert_eq!(summary.lines[0].subtotal.amount, Decimal::new(35980, 2));
        assert_eq!(summary.total.amount, Decimal::new(49970, 2));
        assert_eq!(summary.formatted_total(Locale::PtBr), "R$ 499,70");
        assert_eq!(summary.formatted_total(Locale::En), "R$499.70");
    }

    #[test]
    fn test_line_overflow_is_clamped() {
        let items = [item(1, Decimal::MAX, 2), item(2, Decimal::ONE, 1)];

        let summary = CartSummary::from_items(&items, CurrencyCode::BRL);

        assert!(summary.overflowed);
        assert_eq!(summary.lines[0].subtotal, Price::max(CurrencyCode::BRL));
        assert_eq!(summary.lines[1].subtotal.amount, Decimal::ONE);
        assert_eq!(summary.total, Price::max(CurrencyCode::BRL));
        assert_eq!(summary.total_units, 3);
    }

    #[test]
    fn test_total_overflow_is_clamped() {
        let items = [item(1, Decimal::MAX, 1), item(2, Decimal::MAX, 1)];

        let summary = CartSummary::from_items(&items, CurrencyCode::BRL);

        assert!(summary.overflowed);
        assert_eq!(summary.lines[1].subtotal.amount, Decimal::MAX);
        assert_eq!(summary.total, Price::max(CurrencyCode::BRL));
    }

    #[test]
    fn test_lines_follow_cart_order() {
        let items = [item(5, Decimal::ONE, 1), item(2, Decimal::ONE, 1)];
        let summary = CartSummary::from_items(&items, CurrencyCode::BRL);
        let ids: Vec<i64> = summary.lines.iter().map(|l| l.product_id.as_i64()).collect();
        assert_eq!(ids, vec![5, 2]);
    }
}
