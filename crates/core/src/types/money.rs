//! Monetary amounts using decimal arithmetic.
//!
//! The commerce API returns amounts as decimal strings (`"19.9"`) with an ISO
//! 4217 currency code. Amounts are parsed into [`Decimal`] so formatting never
//! goes through floating point.

use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A monetary amount with currency information.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Money {
    /// Amount in the currency's standard unit (e.g., dollars, not cents).
    pub amount: Decimal,
    /// ISO 4217 currency code (e.g., "USD").
    pub currency_code: String,
}

/// Error parsing a decimal amount string.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid money amount: {0}")]
pub struct MoneyParseError(pub String);

impl Money {
    /// Create a new amount.
    #[must_use]
    pub fn new(amount: Decimal, currency_code: impl Into<String>) -> Self {
        Self {
            amount,
            currency_code: currency_code.into(),
        }
    }

    /// Parse an amount string as returned by the API.
    ///
    /// # Errors
    ///
    /// Returns `MoneyParseError` if `amount` is not a decimal number.
    pub fn parse(amount: &str, currency_code: impl Into<String>) -> Result<Self, MoneyParseError> {
        let amount =
            Decimal::from_str(amount.trim()).map_err(|_| MoneyParseError(amount.to_string()))?;
        Ok(Self::new(amount, currency_code))
    }

    /// Whether the amount is zero.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.amount.is_zero()
    }

    /// Format with two decimal places (e.g., "$19.90").
    #[must_use]
    pub fn format(&self) -> String {
        self.format_amount(&format!("{:.2}", self.amount.round_dp(2)))
    }

    /// Format dropping a trailing ".00" (e.g., "$20" but "$19.90").
    #[must_use]
    pub fn format_without_trailing_zeros(&self) -> String {
        let rounded = self.amount.round_dp(2);
        if rounded.fract().is_zero() {
            self.format_amount(&rounded.trunc().to_string())
        } else {
            self.format()
        }
    }

    fn format_amount(&self, amount: &str) -> String {
        let (sign, digits) = amount
            .strip_prefix('-')
            .map_or(("", amount), |rest| ("-", rest));
        match currency_symbol(&self.currency_code) {
            Some(symbol) => format!("{sign}{symbol}{digits}"),
            None => format!("{sign}{digits} {}", self.currency_code),
        }
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.format())
    }
}

/// Symbol for the currencies the storefront sells in.
fn currency_symbol(code: &str) -> Option<&'static str> {
    match code {
        "USD" | "CAD" | "AUD" | "NZD" | "MXN" => Some("$"),
        "EUR" => Some("€"),
        "GBP" => Some("£"),
        "JPY" | "CNY" => Some("¥"),
        "INR" => Some("₹"),
        _ => None,
    }
}
