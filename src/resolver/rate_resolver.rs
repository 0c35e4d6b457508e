use crate::core::currency::{CurrencyCode, CurrencyPair, RateError};
use crate::core::rate_config::RateConfig;
use crate::resolver::triangulation::triangulate;
use serde::Serialize;
use std::fmt;

/// Where a resolved rate came from.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RateSource {
    /// Source and destination are the same currency.
    Identity,
    /// A custom override for exactly this pair.
    Custom { pair: String },
    /// The reciprocal of a custom override for the reverse pair.
    InverseCustom { pair: String },
    /// Both currencies priced through the EUR table.
    Triangulated,
    /// Triangulated, but at least one code had no EUR entry and counted as 1.
    Fallback { unknown: Vec<CurrencyCode> },
}

impl fmt::Display for RateSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RateSource::Identity => write!(f, "same currency"),
            RateSource::Custom { pair } => write!(f, "custom rate {}", pair),
            RateSource::InverseCustom { pair } => write!(f, "inverse of custom rate {}", pair),
            RateSource::Triangulated => write!(f, "triangulated via EUR"),
            RateSource::Fallback { unknown } => {
                let codes: Vec<&str> = unknown.iter().map(|c| c.as_str()).collect();
                write!(f, "triangulated via EUR, no rate for {}", codes.join(", "))
            }
        }
    }
}

/// A resolved conversion factor together with its provenance.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RateQuote {
    pub from: CurrencyCode,
    pub to: CurrencyCode,
    /// Units of `to` per 1 unit of `from`.
    pub rate: f64,
    pub source: RateSource,
}

impl RateQuote {
    pub fn is_fallback(&self) -> bool {
        matches!(self.source, RateSource::Fallback { .. })
    }
}

/// Resolves conversion factors against a borrowed [`RateConfig`].
///
/// Priority:
/// 1. identical codes resolve to 1;
/// 2. a custom override `FROM_TO`;
/// 3. the reciprocal of a custom override `TO_FROM`;
/// 4. triangulation through EUR.
///
/// Resolution never fails. Codes with no EUR entry are priced at 1 EUR;
/// [`RateResolver::quote`] reports that case and [`RateResolver::try_rate`]
/// turns it into an error.
///
/// # Examples
///
/// ```
/// use dzd_converter::core::rate_config::RateConfig;
/// use dzd_converter::resolver::rate_resolver::RateResolver;
///
/// let mut config = RateConfig::default();
/// config.add_custom_rate("DZD", "GBP", "0.0059").unwrap();
///
/// let resolver = RateResolver::new(&config);
/// assert_eq!(resolver.rate(&"DZD".into(), &"GBP".into()), 0.0059);
/// assert!((resolver.rate(&"GBP".into(), &"DZD".into()) - 169.49).abs() < 0.01);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct RateResolver<'a> {
    config: &'a RateConfig,
}

impl<'a> RateResolver<'a> {
    pub fn new(config: &'a RateConfig) -> Self {
        Self { config }
    }

    /// Resolve `from → to` and say which rule produced the rate.
    pub fn quote(&self, from: &CurrencyCode, to: &CurrencyCode) -> RateQuote {
        let (rate, source) = self.lookup(from, to);
        RateQuote {
            from: from.clone(),
            to: to.clone(),
            rate,
            source,
        }
    }

    /// Units of `to` per 1 unit of `from`.
    pub fn rate(&self, from: &CurrencyCode, to: &CurrencyCode) -> f64 {
        self.lookup(from, to).0
    }

    /// Like [`RateResolver::rate`], but a code with no EUR entry is an error.
    pub fn try_rate(&self, from: &CurrencyCode, to: &CurrencyCode) -> Result<f64, RateError> {
        match self.lookup(from, to) {
            (_, RateSource::Fallback { mut unknown }) => Err(RateError::UnknownCurrency {
                code: unknown.remove(0),
            }),
            (rate, _) => Ok(rate),
        }
    }

    /// Convert `amount` units of `from` into `to`.
    pub fn convert(&self, amount: f64, from: &CurrencyCode, to: &CurrencyCode) -> f64 {
        amount * self.rate(from, to)
    }

    fn lookup(&self, from: &CurrencyCode, to: &CurrencyCode) -> (f64, RateSource) {
        if from == to {
            return (1.0, RateSource::Identity);
        }

        let pair = CurrencyPair::new(from.clone(), to.clone());
        if let Some(rate) = self.config.custom_rates.get(&pair) {
            return (rate, RateSource::Custom { pair: pair.key() });
        }

        let reverse = pair.reversed();
        if let Some(rate) = self.config.custom_rates.get(&reverse) {
            return (
                1.0 / rate,
                RateSource::InverseCustom {
                    pair: reverse.key(),
                },
            );
        }

        let triangulation = triangulate(from, to, self.config);
        let source = if triangulation.unknown.is_empty() {
            RateSource::Triangulated
        } else {
            RateSource::Fallback {
                unknown: triangulation.unknown,
            }
        };
        (triangulation.rate, source)
    }
}

/// Units of `to` per 1 unit of `from` under `config`.
pub fn resolve(from: &CurrencyCode, to: &CurrencyCode, config: &RateConfig) -> f64 {
    RateResolver::new(config).rate(from, to)
}
