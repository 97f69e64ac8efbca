//! Type-safe price representation using decimal arithmetic.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::types::locale::Locale;

/// A price with currency information.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Price {
    /// Amount in the currency's standard unit (e.g., reais, not centavos).
    pub amount: Decimal,
    /// ISO 4217 currency code.
    pub currency_code: CurrencyCode,
}

impl Price {
    /// Create a new price.
    #[must_use]
    pub const fn new(amount: Decimal, currency_code: CurrencyCode) -> Self {
        Self {
            amount,
            currency_code,
        }
    }

    /// A zero amount in the given currency.
    #[must_use]
    pub const fn zero(currency_code: CurrencyCode) -> Self {
        Self::new(Decimal::ZERO, currency_code)
    }

    /// Largest representable amount in the given currency.
    #[must_use]
    pub const fn max(currency_code: CurrencyCode) -> Self {
        Self::new(Decimal::MAX, currency_code)
    }

    /// Multiply the price by a quantity, or `None` on overflow.
    #[must_use]
    pub fn checked_times(self, quantity: u32) -> Option<Self> {
        self.amount
            .checked_mul(Decimal::from(quantity))
            .map(|amount| Self::new(amount, self.currency_code))
    }

    /// Add another price in the same currency, or `None` on overflow.
    ///
    /// The currency of `self` is kept; callers only sum prices of one cart.
    #[must_use]
    pub fn checked_plus(self, other: Self) -> Option<Self> {
        self.amount
            .checked_add(other.amount)
            .map(|amount| Self::new(amount, self.currency_code))
    }

    /// Format for display, e.g. `R$ 1.234,50` in `pt-BR` or `R$1,234.50` in `en`.
    #[must_use]
    pub fn format(&self, locale: Locale) -> String {
        let rounded = self.amount.round_dp(2);
        let negative = rounded.is_sign_negative() && !rounded.is_zero();
        let digits = format!("{:.2}", rounded.abs());
        let (whole, fraction) = digits.split_once('.').unwrap_or((digits.as_str(), "00"));

        let number = format!(
            "{}{}{}",
            group_thousands(whole, locale.group_separator()),
            locale.decimal_separator(),
            fraction
        );
        let sign = if negative { "-" } else { "" };
        let symbol = self.currency_code.symbol();

        match locale {
            Locale::PtBr => format!("{sign}{symbol} {number}"),
            Locale::En => format!("{sign}{symbol}{number}"),
        }
    }
}

/// Insert `separator` between every group of three digits, counting from the right.
fn group_thousands(digits: &str, separator: char) -> String {
    let len = digits.chars().count();
    let mut out = String::with_capacity(len + len / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(separator);
        }
        out.push(ch);
    }
    out
}

/// ISO 4217 currency codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum CurrencyCode {
    #[default]
    BRL,
    USD,
    EUR,
    GBP,
}

impl CurrencyCode {
    /// Currency symbol used when formatting prices.
    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::BRL => "R$",
            Self::USD => "$",
            Self::EUR => "€",
            Self::GBP => "£",
        }
    }

}
