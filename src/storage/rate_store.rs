use crate::core::currency::parse_rate;
use crate::core::rate_config::{CustomRates, RateConfig};
use crate::storage::kv::{KeyValueStore, StoreError};
use chrono::{DateTime, Utc};
use serde::Serialize;

pub const EUR_USD_RATE_KEY: &str = "eurUsdRate";
pub const DZD_EUR_RATE_KEY: &str = "dzdEurRate";
pub const CUSTOM_RATES_KEY: &str = "customRates";

/// Acknowledgment returned by a successful [`RateStore::save`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SaveReceipt {
    pub saved_at: DateTime<Utc>,
    pub custom_rates: usize,
}

/// Loads and saves a [`RateConfig`] under three string keys.
///
/// | Key | Value |
/// |---|---|
/// | `eurUsdRate` | decimal string |
/// | `dzdEurRate` | decimal string |
/// | `customRates` | JSON object, `"FROM_TO"` → decimal string |
///
/// Loading never fails: an absent key keeps its default, and a malformed
/// value or a failing backend read keeps the default and logs a warning.
///
/// # Examples
///
/// ```
/// use dzd_converter::core::rate_config::RateConfig;
/// use dzd_converter::storage::kv::MemoryStore;
/// use dzd_converter::storage::rate_store::RateStore;
///
/// let mut store = RateStore::new(MemoryStore::new());
/// let mut config = store.load();
/// assert_eq!(config, RateConfig::default());
///
/// config.dzd_eur_rate = 0.0071;
/// store.save(&config).unwrap();
/// assert_eq!(store.load(), config);
/// ```
#[derive(Debug, Clone)]
pub struct RateStore<S> {
    backend: S,
}

impl<S: KeyValueStore> RateStore<S> {
    pub fn new(backend: S) -> Self {
        Self { backend }
    }

    pub fn backend(&self) -> &S {
        &self.backend
    }

    pub fn into_inner(self) -> S {
        self.backend
    }

    /// Read the persisted configuration over the defaults.
    pub fn load(&self) -> RateConfig {
        let mut config = RateConfig::default();

        if let Some(raw) = self.read(EUR_USD_RATE_KEY) {
            match parse_rate(&raw) {
                Ok(rate) => config.eur_usd_rate = rate,
                Err(e) => log::warn!("ignoring stored {}: {}", EUR_USD_RATE_KEY, e),
            }
        }
        if let Some(raw) = self.read(DZD_EUR_RATE_KEY) {
            match parse_rate(&raw) {
                Ok(rate) => config.dzd_eur_rate = rate,
                Err(e) => log::warn!("ignoring stored {}: {}", DZD_EUR_RATE_KEY, e),
            }
        }
        if let Some(raw) = self.read(CUSTOM_RATES_KEY) {
            match CustomRates::from_json(&raw) {
                Ok(rates) => config.custom_rates = rates,
                Err(e) => log::warn!("ignoring stored {}: {}", CUSTOM_RATES_KEY, e),
            }
        }

        log::debug!(
            "loaded rates: EUR/USD {}, DZD/EUR {}, {} custom",
            config.eur_usd_rate,
            config.dzd_eur_rate,
            config.custom_rates.len()
        );
        config
    }

    /// Write all three keys, overwriting previous values.
    pub fn save(&mut self, config: &RateConfig) -> Result<SaveReceipt, StoreError> {
        let custom = config
            .custom_rates
            .to_json()
            .map_err(|source| StoreError::Encode {
                what: CUSTOM_RATES_KEY.to_string(),
                source,
            })?;

        self.backend
            .set(EUR_USD_RATE_KEY, &config.eur_usd_rate.to_string())?;
        self.backend
            .set(DZD_EUR_RATE_KEY, &config.dzd_eur_rate.to_string())?;
        self.backend.set(CUSTOM_RATES_KEY, &custom)?;

        log::info!("saved rates ({} custom)", config.custom_rates.len());
        Ok(SaveReceipt {
            saved_at: Utc::now(),
            custom_rates: config.custom_rates.len(),
        })
    }

    /// Present, non-empty value for `key`; read failures degrade to `None`.
    fn read(&self, key: &str) -> Option<String> {
        match self.backend.get(key) {
            Ok(value) => value.filter(|v| !v.trim().is_empty()),
            Err(e) => {
                log::warn!("could not read {} from storage: {}", key, e);
                None
            }
        }
    }
}
