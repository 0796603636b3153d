use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::{Error, Result, Table};

/// The nine currencies charted when no override is configured, in display order.
pub const DEFAULT_CURRENCIES: [&str; 9] = [
    "USD", "EUR", "GBP", "AUD", "NZD", "CAD", "CHF", "JPY", "CNY",
];

/// Suffix the price provider appends to FX pair symbols.
pub const PAIR_SUFFIX: &str = "=X";

/// A three-letter currency code, always stored upper-case.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Currency(String);

impl Currency {
    pub fn new(code: &str) -> Result<Self> {
        let code = code.trim();
        if code.len() != 3 || !code.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(Error::Config(format!(
                "currency code must be three ASCII letters, got '{code}'"
            )));
        }
        Ok(Self(code.to_ascii_uppercase()))
    }

    pub fn code(&self) -> &str {
        &self.0
    }

    /// The default nine-currency universe.
    pub fn defaults() -> Vec<Currency> {
        DEFAULT_CURRENCIES
            .iter()
            .map(|c| Currency(c.to_string()))
            .collect()
    }
}

impl TryFrom<String> for Currency {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        Currency::new(&value)
    }
}

impl From<Currency> for String {
    fn from(value: Currency) -> Self {
        value.0
    }
}

impl std::fmt::Display for Currency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// An ordered currency pair. Prices are quoted as `quote` units per one `base`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Pair {
    pub base: Currency,
    pub quote: Currency,
}

impl Pair {
    pub fn new(base: Currency, quote: Currency) -> Result<Self> {
        if base == quote {
            return Err(Error::Config(format!(
                "pair needs two distinct currencies, got {base}/{quote}"
            )));
        }
        Ok(Self { base, quote })
    }

    /// Provider instrument symbol, e.g. `EURUSD=X`.
    pub fn symbol(&self) -> String {
        format!("{}{}{}", self.base, self.quote, PAIR_SUFFIX)
    }

    /// Every ordered pair of distinct currencies, base-major in input order.
    /// Duplicate currencies in the input are paired once.
    pub fn universe(currencies: &[Currency]) -> Vec<Pair> {
        let mut unique: Vec<&Currency> = Vec::with_capacity(currencies.len());
        for c in currencies {
            if !unique.contains(&c) {
                unique.push(c);
            }
        }

        unique
            .iter()
            .flat_map(|&base| {
                unique
                    .iter()
                    .filter(move |&&quote| quote != base)
                    .map(move |&quote| Pair {
                        base: base.clone(),
                        quote: quote.clone(),
                    })
            })
            .collect()
    }
}

impl std::fmt::Display for Pair {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// One daily close as reported by a price source. `None` marks a day the
/// provider listed without a close.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Close {
    pub date: NaiveDate,
    pub close: Option<f64>,
}

impl Close {
    pub fn new(date: NaiveDate, close: f64) -> Self {
        Self { date, close: Some(close) }
    }
}

/// Aligned daily closes, one column per pair.
pub type PriceTable = Table<Pair>;

/// Day-over-day natural log returns, one column per pair.
pub type ReturnTable = Table<Pair>;

/// Per-currency strength (or its cumulative form), one column per currency.
pub type StrengthTable = Table<Currency>;
