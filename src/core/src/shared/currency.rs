use serde::{Deserialize, Serialize};
use std::fmt;

/// Money is tracked in whole currency units.
pub type Money = i64;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Currency {
    #[default]
    Eur,
    Usd,
    Gbp,
}

impl Currency {
    /// Unknown codes fall back to EUR.
    pub fn from_code(code: &str) -> Self {
        match code.trim().to_ascii_uppercase().as_str() {
            "USD" => Currency::Usd,
            "GBP" => Currency::Gbp,
            _ => Currency::Eur,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            Currency::Eur => "EUR",
            Currency::Usd => "USD",
            Currency::Gbp => "GBP",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrencyValue {
    pub amount: Money,
    pub currency: Currency,
}

impl CurrencyValue {
    pub fn new(amount: Money, currency: Currency) -> Self {
        CurrencyValue { amount, currency }
    }
}

impl fmt::Display for CurrencyValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.currency.code(), self.amount)
    }
}

/// Integer percentage of an amount, truncated toward zero and saturated at
/// the `Money` range.
pub fn percent_of(amount: Money, percent: i64) -> Money {
    let scaled = amount as i128 * percent as i128 / 100;

    scaled.clamp(Money::MIN as i128, Money::MAX as i128) as Money
}
