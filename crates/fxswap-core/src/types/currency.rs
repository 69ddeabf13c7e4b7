//! Currency codes and currency pairs.
//!
//! Curve snapshots are keyed by pair and then by currency, and arrive as
//! plain strings. Codes are validated once here so the rest of the engine
//! never compares raw text.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{CoreError, CoreResult};

/// A three-letter ISO 4217 style currency code (e.g. `USD`).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CurrencyCode(String);

impl CurrencyCode {
    /// Creates a code, normalising to upper case.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::InvalidCurrency` unless the input is exactly three
    /// ASCII letters.
    pub fn new(code: &str) -> CoreResult<Self> {
        let code = code.trim();
        if code.len() == 3 && code.chars().all(|c| c.is_ascii_alphabetic()) {
            Ok(Self(code.to_ascii_uppercase()))
        } else {
            Err(CoreError::invalid_currency(code))
        }
    }

    /// Returns the code as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CurrencyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for CurrencyCode {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for CurrencyCode {
    type Error = CoreError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(&value)
    }
}

impl From<CurrencyCode> for String {
    fn from(code: CurrencyCode) -> Self {
        code.0
    }
}

/// A currency pair (e.g., USD/THB).
///
/// - `base`: the currency being priced; its curve is bootstrapped directly
/// - `quote`: the pricing currency; its curve is implied from the base curve
///   and the FX swap points
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CurrencyPair {
    /// Base currency
    pub base: CurrencyCode,
    /// Quote currency
    pub quote: CurrencyCode,
}

impl CurrencyPair {
    /// Creates a new currency pair.
    #[must_use]
    pub fn new(base: CurrencyCode, quote: CurrencyCode) -> Self {
        Self { base, quote }
    }

    /// Parses `USD/THB`, `USD-THB` or `USDTHB`.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::InvalidCurrency` if either leg is not a valid code.
    pub fn parse(s: &str) -> CoreResult<Self> {
        let s = s.trim();
        let (base, quote) = match s.find(|c: char| c == '/' || c == '-') {
            Some(idx) => (&s[..idx], &s[idx + 1..]),
            None if s.len() == 6 && s.is_ascii() => s.split_at(3),
            None => return Err(CoreError::invalid_currency(s)),
        };
        Ok(Self::new(CurrencyCode::new(base)?, CurrencyCode::new(quote)?))
    }

    /// Returns the inverse pair (swaps base and quote).
    #[must_use]
    pub fn inverse(&self) -> Self {
        Self::new(self.quote.clone(), self.base.clone())
    }

    /// Returns the compact ticker (e.g., "USDTHB").
    #[must_use]
    pub fn ticker(&self) -> String {
        format!("{}{}", self.base, self.quote)
    }
}

impl fmt::Display for CurrencyPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.base, self.quote)
    }
}

impl FromStr for CurrencyPair {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for CurrencyPair {
    type Error = CoreError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<CurrencyPair> for String {
    fn from(pair: CurrencyPair) -> Self {
        pair.to_string()
    }
}
