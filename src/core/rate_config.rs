use crate::core::currency::{parse_rate, CurrencyCode, CurrencyPair, RateError, PAIR_SEPARATOR};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Default EUR/USD base rate (USD per 1 EUR).
pub const DEFAULT_EUR_USD_RATE: f64 = 1.09;

/// Default DZD/EUR base rate (EUR per 1 DZD).
pub const DEFAULT_DZD_EUR_RATE: f64 = 0.0067;

/// User-defined overrides for specific ordered currency pairs.
///
/// Serialized as a map of `"FROM_TO"` keys to decimal strings, e.g.
/// `{"DZD_GBP":"0.0059"}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CustomRates(#[serde(with = "pairs_serde")] BTreeMap<CurrencyPair, f64>);

mod pairs_serde {
    use super::*;
    use serde::de::{self, MapAccess, Visitor};
    use serde::ser::SerializeMap;

    pub fn serialize<S: serde::Serializer>(
        rates: &BTreeMap<CurrencyPair, f64>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(rates.len()))?;
        for (pair, rate) in rates {
            map.serialize_entry(&pair.key(), &rate.to_string())?;
        }
        map.end()
    }

    pub fn deserialize<'de, D: serde::Deserializer<'de>>(
        deserializer: D,
    ) -> Result<BTreeMap<CurrencyPair, f64>, D::Error> {
        struct V;
        impl<'de> Visitor<'de> for V {
            type Value = BTreeMap<CurrencyPair, f64>;
            fn expecting(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
                f.write_str("a map with \"FROM_TO\" keys and decimal string values")
            }
            fn visit_map<M: MapAccess<'de>>(self, mut access: M) -> Result<Self::Value, M::Error> {
                let mut map = BTreeMap::new();
                while let Some((key, value)) = access.next_entry::<String, String>()? {
                    let pair: CurrencyPair = key.parse().map_err(de::Error::custom)?;
                    let rate = parse_rate(&value).map_err(de::Error::custom)?;
                    map.insert(pair, rate);
                }
                Ok(map)
            }
        }
        deserializer.deserialize_map(V)
    }
}

impl CustomRates {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or overwrite the override for `pair`.
    pub fn insert(&mut self, pair: CurrencyPair, rate: f64) -> Option<f64> {
        self.0.insert(pair, rate)
    }

    pub fn remove(&mut self, pair: &CurrencyPair) -> Option<f64> {
        self.0.remove(pair)
    }

    pub fn get(&self, pair: &CurrencyPair) -> Option<f64> {
        self.0.get(pair).copied()
    }

    /// Look up the override for `from → to` without building a pair.
    pub fn lookup(&self, from: &CurrencyCode, to: &CurrencyCode) -> Option<f64> {
        self.get(&CurrencyPair::new(from.clone(), to.clone()))
    }

    pub fn iter(&self) -> impl Iterator<Item = (&CurrencyPair, f64)> {
        self.0.iter().map(|(pair, rate)| (pair, *rate))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Encode as the persisted JSON text.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Decode from the persisted JSON text.
    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }
}

impl FromIterator<(CurrencyPair, f64)> for CustomRates {
    fn from_iter<I: IntoIterator<Item = (CurrencyPair, f64)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// The mutable state that drives conversion.
///
/// Owned by the calculator session and passed by reference to the resolver
/// and the store.
///
/// # Examples
///
/// ```
/// use dzd_converter::core::rate_config::RateConfig;
///
/// let mut config = RateConfig::default();
/// assert_eq!(config.eur_usd_rate, 1.09);
/// config.add_custom_rate("dzd", "gbp", "0.0059").unwrap();
/// assert_eq!(config.custom_rates.len(), 1);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RateConfig {
    /// USD per 1 EUR.
    pub eur_usd_rate: f64,
    /// EUR per 1 DZD.
    pub dzd_eur_rate: f64,
    pub custom_rates: CustomRates,
}

impl Default for RateConfig {
    fn default() -> Self {
        Self {
            eur_usd_rate: DEFAULT_EUR_USD_RATE,
            dzd_eur_rate: DEFAULT_DZD_EUR_RATE,
            custom_rates: CustomRates::new(),
        }
    }
}

impl RateConfig {
    /// Add a custom override from free-text input.
    ///
    /// Codes are trimmed and uppercased. The rate must parse as a finite
    /// float. An existing override for the same ordered pair is replaced.
    /// Codes outside the supported set and `from == to` are accepted.
    pub fn add_custom_rate(
        &mut self,
        from: &str,
        to: &str,
        rate: &str,
    ) -> Result<CurrencyPair, RateError> {
        let from = entry_code(from)?;
        let to = entry_code(to)?;
        let rate = parse_rate(rate)?;
        let pair = CurrencyPair::new(from, to);
        self.custom_rates.insert(pair.clone(), rate);
        Ok(pair)
    }

    pub fn remove_custom_rate(&mut self, pair: &CurrencyPair) -> Option<f64> {
        self.custom_rates.remove(pair)
    }
}

fn entry_code(input: &str) -> Result<CurrencyCode, RateError> {
    let code = CurrencyCode::normalized(input);
    if code.as_str().is_empty() || code.as_str().contains(PAIR_SEPARATOR) {
        return Err(RateError::InvalidCurrency {
            input: input.to_string(),
        });
    }
    Ok(code)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = RateConfig::default();
        assert_eq!(config.eur_usd_rate, 1.09);
        assert_eq!(config.dzd_eur_rate, 0.0067);
        assert!(config.custom_rates.is_empty());
    }

    #[test]
    fn test_add_custom_rate_uppercases() {
        let mut config = RateConfig::default();
        let pair = config.add_custom_rate("dzd", " gbp", "0.0059").unwrap();
        assert_eq!(pair.key(), "DZD_GBP");
        assert_eq!(config.custom_rates.get(&pair), Some(0.0059));
    }

    #[test]
    fn test_add_custom_rate_overwrites() {
        let mut config = RateConfig::default();
        config.add_custom_rate("DZD", "GBP", "0.0059").unwrap();
        config.add_custom_rate("DZD", "GBP", "0.006").unwrap();
        assert_eq!(config.custom_rates.len(), 1);
        assert_eq!(
            config.custom_rates.lookup(&"DZD".into(), &"GBP".into()),
            Some(0.006)
        );
    }

    #[test]
    fn test_add_custom_rate_accepts_unsupported_and_same_codes() {
        let mut config = RateConfig::default();
        assert!(config.add_custom_rate("XOF", "EUR", "0.0015").is_ok());
        assert!(config.add_custom_rate("EUR", "EUR", "2").is_ok());
        assert_eq!(config.custom_rates.len(), 2);
    }

    #[test]
    fn test_add_custom_rate_rejects_bad_input() {
        let mut config = RateConfig::default();
        assert!(matches!(
            config.add_custom_rate("DZD", "GBP", "abc"),
            Err(RateError::InvalidRate { .. })
        ));
        assert!(matches!(
            config.add_custom_rate("", "GBP", "1"),
            Err(RateError::InvalidCurrency { .. })
        ));
        assert!(matches!(
            config.add_custom_rate("DZD_X", "GBP", "1"),
            Err(RateError::InvalidCurrency { .. })
        ));
        assert!(config.custom_rates.is_empty());
    }

    #[test]
    fn test_remove_custom_rate() {
        let mut config = RateConfig::default();
        let pair = config.add_custom_rate("DZD", "GBP", "0.0059").unwrap();
        assert_eq!(config.remove_custom_rate(&pair), Some(0.0059));
        assert_eq!(config.remove_custom_rate(&pair), None);
    }

    #[test]
    fn test_custom_rates_json_layout() {
        let mut rates = CustomRates::new();
        rates.insert("DZD_GBP".parse().unwrap(), 0.0059);
        assert_eq!(rates.to_json().unwrap(), r#"{"DZD_GBP":"0.0059"}"#);

        let decoded = CustomRates::from_json(r#"{"DZD_GBP":"0.0059"}"#).unwrap();
        assert_eq!(decoded, rates);
    }

    #[test]
    fn test_custom_rates_json_rejects_malformed() {
        assert!(CustomRates::from_json("not json").is_err());
        assert!(CustomRates::from_json(r#"{"DZDGBP":"0.0059"}"#).is_err());
        assert!(CustomRates::from_json(r#"{"DZD_GBP":"abc"}"#).is_err());
        assert!(CustomRates::from_json(r#"{"DZD_GBP":0.0059}"#).is_err());
    }

    #[test]
    fn test_config_json_uses_persisted_names() {
        let json = serde_json::to_value(RateConfig::default()).unwrap();
        assert_eq!(json["eurUsdRate"], 1.09);
        assert_eq!(json["dzdEurRate"], 0.0067);
        assert!(json["customRates"].as_object().unwrap().is_empty());
    }
}
