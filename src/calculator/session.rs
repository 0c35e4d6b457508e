use crate::calculator::display::{format_fixed, parse_amount, RATE_DECIMALS};
use crate::calculator::keypad::{AmountEntry, ConversionResult, Key};
use crate::core::currency::{parse_rate, CurrencyCode, CurrencyPair, RateError};
use crate::core::rate_config::RateConfig;
use crate::resolver::rate_resolver::{RateQuote, RateResolver};
use crate::storage::kv::KeyValueStore;
use crate::storage::rate_store::RateStore;
use chrono::{DateTime, Utc};
use std::fmt;

/// Default source currency.
pub const DEFAULT_FROM: &str = "DZD";
/// Default destination currency.
pub const DEFAULT_TO: &str = "EUR";

/// The two screens of the calculator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tab {
    #[default]
    Converter,
    Rates,
}

/// Outcome of [`Calculator::save_rates`].
#[derive(Debug, Clone, PartialEq)]
pub enum SaveStatus {
    Saved { at: DateTime<Utc> },
    Failed { reason: String },
}

impl SaveStatus {
    pub fn is_saved(&self) -> bool {
        matches!(self, SaveStatus::Saved { .. })
    }
}

impl fmt::Display for SaveStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SaveStatus::Saved { .. } => write!(f, "Rates saved!"),
            SaveStatus::Failed { reason } => write!(f, "Rates not saved: {}", reason),
        }
    }
}

/// One converter session: the rate configuration, its store and the screen
/// state.
///
/// The configuration is loaded from the store when the session opens and
/// written back only on [`Calculator::save_rates`].
///
/// # Examples
///
/// ```
/// use dzd_converter::calculator::session::Calculator;
/// use dzd_converter::storage::kv::MemoryStore;
///
/// let mut calc = Calculator::open(MemoryStore::new());
/// calc.press_digit('0');
/// calc.press_digit('0');
/// calc.press_digit('0');
/// calc.convert();
/// assert_eq!(calc.result_line().as_deref(), Some("6.7000 EUR"));
/// ```
#[derive(Debug)]
pub struct Calculator<S> {
    config: RateConfig,
    store: RateStore<S>,
    tab: Tab,
    from: CurrencyCode,
    to: CurrencyCode,
    entry: AmountEntry,
}

impl<S: KeyValueStore> Calculator<S> {
    /// Start a session, loading persisted rates from `backend`.
    pub fn open(backend: S) -> Self {
        let store = RateStore::new(backend);
        let config = store.load();
        Self {
            config,
            store,
            tab: Tab::default(),
            from: CurrencyCode::new(DEFAULT_FROM),
            to: CurrencyCode::new(DEFAULT_TO),
            entry: AmountEntry::new(),
        }
    }

    pub fn config(&self) -> &RateConfig {
        &self.config
    }

    pub fn store(&self) -> &RateStore<S> {
        &self.store
    }

    pub fn tab(&self) -> Tab {
        self.tab
    }

    pub fn select_tab(&mut self, tab: Tab) {
        self.tab = tab;
    }

    pub fn from_currency(&self) -> &CurrencyCode {
        &self.from
    }

    pub fn to_currency(&self) -> &CurrencyCode {
        &self.to
    }

    pub fn set_from(&mut self, code: CurrencyCode) {
        self.from = code;
    }

    pub fn set_to(&mut self, code: CurrencyCode) {
        self.to = code;
    }

    pub fn amount(&self) -> &str {
        self.entry.amount()
    }

    pub fn result(&self) -> Option<ConversionResult> {
        self.entry.result()
    }

    /// Replace the typed amount with arbitrary text.
    pub fn enter_amount(&mut self, text: &str) {
        self.entry.set_amount(text);
    }

    // --- Converter tab ---

    pub fn press(&mut self, key: Key) {
        match key {
            Key::Digit(d) => self.press_digit(d),
            Key::Decimal => self.entry.decimal(),
            Key::Backspace => self.entry.backspace(),
            Key::Clear => self.entry.clear(),
            Key::Convert => {
                self.convert();
            }
            Key::Swap => self.swap(),
        }
    }

    pub fn press_digit(&mut self, d: char) {
        self.entry.digit(d);
    }

    pub fn press_decimal(&mut self) {
        self.entry.decimal();
    }

    pub fn backspace(&mut self) {
        self.entry.backspace();
    }

    pub fn clear(&mut self) {
        self.entry.clear();
    }

    /// Exchange source and destination. A displayed numeric result becomes
    /// the new amount.
    pub fn swap(&mut self) {
        std::mem::swap(&mut self.from, &mut self.to);
        self.entry.carry_result();
    }

    /// Convert the typed amount with the current rates.
    pub fn convert(&mut self) -> ConversionResult {
        let result = match parse_amount(self.entry.amount()) {
            Some(amount) => ConversionResult::Converted(
                RateResolver::new(&self.config).convert(amount, &self.from, &self.to),
            ),
            None => ConversionResult::InvalidAmount,
        };
        self.entry.set_result(result);
        result
    }

    /// `"{result} {to}"`, while a result is displayed.
    pub fn result_line(&self) -> Option<String> {
        self.entry
            .result()
            .map(|result| format!("{} {}", result, self.to))
    }

    // --- Rates tab ---

    pub fn quote(&self) -> RateQuote {
        RateResolver::new(&self.config).quote(&self.from, &self.to)
    }

    /// `"1 DZD = 0.006700 EUR"`.
    pub fn current_rate_line(&self) -> String {
        format!(
            "1 {} = {} {}",
            self.from,
            format_fixed(self.quote().rate, RATE_DECIMALS),
            self.to
        )
    }

    pub fn set_eur_usd_rate(&mut self, text: &str) -> Result<(), RateError> {
        self.config.eur_usd_rate = parse_rate(text)?;
        Ok(())
    }

    pub fn set_dzd_eur_rate(&mut self, text: &str) -> Result<(), RateError> {
        self.config.dzd_eur_rate = parse_rate(text)?;
        Ok(())
    }

    pub fn add_custom_rate(
        &mut self,
        from: &str,
        to: &str,
        rate: &str,
    ) -> Result<CurrencyPair, RateError> {
        self.config.add_custom_rate(from, to, rate)
    }

    pub fn remove_custom_rate(&mut self, pair: &CurrencyPair) -> Option<f64> {
        self.config.remove_custom_rate(pair)
    }

    /// `"DZD → GBP: 0.0059"` for each custom rate, in key order.
    pub fn custom_rate_lines(&self) -> Vec<String> {
        self.config
            .custom_rates
            .iter()
            .map(|(pair, rate)| format!("{}: {}", pair, rate))
            .collect()
    }

    /// Persist the current rates. Failures are reported, not propagated.
    pub fn save_rates(&mut self) -> SaveStatus {
        match self.store.save(&self.config) {
            Ok(receipt) => SaveStatus::Saved {
                at: receipt.saved_at,
            },
            Err(e) => {
                log::warn!("saving rates failed: {}", e);
                SaveStatus::Failed {
                    reason: e.to_string(),
                }
            }
        }
    }
}
