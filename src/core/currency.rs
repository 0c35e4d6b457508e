use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// The currencies offered by the converter, in selector order.
///
/// Each entry is `(code, display name)`.
pub static SUPPORTED_CURRENCIES: [(&str, &str); 13] = [
    ("DZD", "Algerian Dinar"),
    ("EUR", "Euro"),
    ("USD", "US Dollar"),
    ("GBP", "British Pound"),
    ("JPY", "Japanese Yen"),
    ("CNY", "Chinese Yuan"),
    ("CAD", "Canadian Dollar"),
    ("AUD", "Australian Dollar"),
    ("CHF", "Swiss Franc"),
    ("SAR", "Saudi Riyal"),
    ("AED", "UAE Dirham"),
    ("TND", "Tunisian Dinar"),
    ("MAD", "Moroccan Dirham"),
];

/// Separator between the two codes of a persisted pair key (`"DZD_GBP"`).
pub const PAIR_SEPARATOR: char = '_';

/// ISO 4217-style currency code.
///
/// Any code can be represented so that custom overrides may name currencies
/// outside [`SUPPORTED_CURRENCIES`]. Use [`CurrencyCode::normalized`] for
/// user-typed input.
///
/// # Examples
///
/// ```
/// use dzd_converter::core::currency::CurrencyCode;
///
/// let dzd = CurrencyCode::new("DZD");
/// assert!(dzd.is_supported());
/// assert_eq!(dzd.display_name(), Some("Algerian Dinar"));
/// assert_eq!(CurrencyCode::normalized(" gbp "), CurrencyCode::new("GBP"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CurrencyCode(String);

impl CurrencyCode {
    pub fn new(code: impl Into<String>) -> Self {
        Self(code.into())
    }

    /// Trim and uppercase free-text input.
    pub fn normalized(input: &str) -> Self {
        Self(input.trim().to_uppercase())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Human-readable name, if the code is one of the supported currencies.
    pub fn display_name(&self) -> Option<&'static str> {
        SUPPORTED_CURRENCIES
            .iter()
            .find(|(code, _)| *code == self.0)
            .map(|(_, name)| *name)
    }

    pub fn is_supported(&self) -> bool {
        self.display_name().is_some()
    }

    /// All supported codes in selector order.
    pub fn supported() -> impl Iterator<Item = CurrencyCode> {
        SUPPORTED_CURRENCIES.iter().map(|(code, _)| CurrencyCode::new(*code))
    }
}

impl fmt::Display for CurrencyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for CurrencyCode {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

/// Errors arising from rate lookups and rate edits.
#[derive(Debug, Error, PartialEq)]
pub enum RateError {
    #[error("invalid rate '{input}': expected a decimal number")]
    InvalidRate { input: String },
    #[error("invalid currency code '{input}'")]
    InvalidCurrency { input: String },
    #[error("invalid currency pair key '{key}': expected FROM_TO")]
    InvalidPairKey { key: String },
    #[error("no rate available for {code}: not in the EUR table")]
    UnknownCurrency { code: CurrencyCode },
}

/// Parse a user- or storage-supplied rate.
///
/// Only finite decimals are accepted.
pub fn parse_rate(input: &str) -> Result<f64, RateError> {
    input
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|rate| rate.is_finite())
        .ok_or_else(|| RateError::InvalidRate {
            input: input.to_string(),
        })
}

/// An ordered pair of currencies: 1 unit of `from` is worth `rate` units of `to`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CurrencyPair {
    pub from: CurrencyCode,
    pub to: CurrencyCode,
}

impl CurrencyPair {
    pub fn new(from: CurrencyCode, to: CurrencyCode) -> Self {
        Self { from, to }
    }

    /// The same pair read in the opposite direction.
    pub fn reversed(&self) -> Self {
        Self::new(self.to.clone(), self.from.clone())
    }

    /// The persisted key, `"FROM_TO"`.
    pub fn key(&self) -> String {
        format!("{}{}{}", self.from, PAIR_SEPARATOR, self.to)
    }
}

impl FromStr for CurrencyPair {
    type Err = RateError;

    fn from_str(key: &str) -> Result<Self, Self::Err> {
        let invalid = || RateError::InvalidPairKey {
            key: key.to_string(),
        };
        let (from, to) = key.split_once(PAIR_SEPARATOR).ok_or_else(invalid)?;
        if from.is_empty() || to.is_empty() || to.contains(PAIR_SEPARATOR) {
            return Err(invalid());
        }
        Ok(Self::new(CurrencyCode::new(from), CurrencyCode::new(to)))
    }
}

impl fmt::Display for CurrencyPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} → {}", self.from, self.to)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_currency_code_equality() {
        let a = CurrencyCode::new("DZD");
        let b = CurrencyCode::normalized("dzd");
        assert_eq!(a, b);
    }

    #[test]
    fn test_supported_table() {
        let codes: Vec<CurrencyCode> = CurrencyCode::supported().collect();
        assert_eq!(codes.len(), 13);
        assert_eq!(codes[0], CurrencyCode::new("DZD"));
        assert_eq!(codes[12], CurrencyCode::new("MAD"));
        assert_eq!(CurrencyCode::new("TND").display_name(), Some("Tunisian Dinar"));
    }

    #[test]
    fn test_unsupported_code_has_no_name() {
        let xof = CurrencyCode::new("XOF");
        assert!(!xof.is_supported());
        assert_eq!(xof.display_name(), None);
    }

    #[test]
    fn test_pair_key_roundtrip() {
        let pair: CurrencyPair = "DZD_GBP".parse().unwrap();
        assert_eq!(pair.from, CurrencyCode::new("DZD"));
        assert_eq!(pair.to, CurrencyCode::new("GBP"));
        assert_eq!(pair.key(), "DZD_GBP");
        assert_eq!(pair.reversed().key(), "GBP_DZD");
    }

    #[test]
    fn test_pair_display() {
        let pair = CurrencyPair::new("DZD".into(), "GBP".into());
        assert_eq!(format!("{}", pair), "DZD → GBP");
    }

    #[test]
    fn test_invalid_pair_keys() {
        for key in ["DZDGBP", "_GBP", "DZD_", "DZD_GBP_EUR", ""] {
            assert!(key.parse::<CurrencyPair>().is_err(), "{key} should be rejected");
        }
    }

    #[test]
    fn test_parse_rate() {
        assert_eq!(parse_rate("0.0059"), Ok(0.0059));
        assert_eq!(parse_rate(" 1.09 "), Ok(1.09));
        assert!(parse_rate("abc").is_err());
        assert!(parse_rate("").is_err());
        assert!(parse_rate("inf").is_err());
        assert!(parse_rate("NaN").is_err());
    }
}
