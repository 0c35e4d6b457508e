use crate::core::currency::CurrencyCode;
use crate::core::rate_config::RateConfig;

/// EUR value of 1 unit for currencies whose rate is not user-configurable.
///
/// DZD, EUR and USD are derived from [`RateConfig`] in [`eur_value`].
pub const STATIC_EUR_TABLE: [(&str, f64); 10] = [
    ("GBP", 1.17),
    ("JPY", 0.0062),
    ("CNY", 0.13),
    ("CAD", 0.68),
    ("AUD", 0.61),
    ("CHF", 1.06),
    ("SAR", 0.25),
    ("AED", 0.25),
    ("TND", 0.30),
    ("MAD", 0.092),
];

/// Value of 1 unit of `code` expressed in EUR, or `None` if the code has no
/// entry.
pub fn eur_value(code: &CurrencyCode, config: &RateConfig) -> Option<f64> {
    match code.as_str() {
        "DZD" => Some(config.dzd_eur_rate),
        "EUR" => Some(1.0),
        "USD" => Some(1.0 / config.eur_usd_rate),
        other => STATIC_EUR_TABLE
            .iter()
            .find(|(c, _)| *c == other)
            .map(|(_, value)| *value),
    }
}

/// Result of a triangulated lookup.
#[derive(Debug, Clone, PartialEq)]
pub struct Triangulation {
    pub rate: f64,
    /// Codes that had no EUR entry and were priced at 1 EUR.
    pub unknown: Vec<CurrencyCode>,
}

/// Convert `from → to` by expressing both in EUR and dividing.
///
/// A code missing from the table counts as worth 1 EUR.
pub fn triangulate(from: &CurrencyCode, to: &CurrencyCode, config: &RateConfig) -> Triangulation {
    let mut unknown = Vec::new();
    let mut value_of = |code: &CurrencyCode| {
        eur_value(code, config).unwrap_or_else(|| {
            if !unknown.contains(code) {
                unknown.push(code.clone());
            }
            1.0
        })
    };
    let from_eur = value_of(from);
    let to_eur = value_of(to);
    Triangulation {
        rate: from_eur / to_eur,
        unknown,
    }
}
