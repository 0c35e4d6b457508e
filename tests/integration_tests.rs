use approx::assert_relative_eq;
use dzd_converter::calculator::keypad::{ConversionResult, Key};
use dzd_converter::calculator::session::{Calculator, SaveStatus, Tab};
use dzd_converter::core::currency::CurrencyCode;
use dzd_converter::core::rate_config::RateConfig;
use dzd_converter::resolver::rate_resolver::{resolve, RateResolver, RateSource};
use dzd_converter::storage::kv::{FileStore, KeyValueStore, MemoryStore};
use dzd_converter::storage::rate_store::RateStore;

fn code(s: &str) -> CurrencyCode {
    CurrencyCode::new(s)
}

/// Default rates: DZD → EUR is the configured DZD/EUR rate and EUR → USD is
/// the EUR/USD rate.
#[test]
fn test_default_rate_scenarios() {
    let config = RateConfig::default();
    assert_relative_eq!(resolve(&code("DZD"), &code("EUR"), &config), 0.0067, epsilon = 1e-12);
    assert_relative_eq!(resolve(&code("EUR"), &code("USD"), &config), 1.09, epsilon = 1e-12);
}

/// A single DZD → GBP override also answers GBP → DZD by reciprocal.
#[test]
fn test_custom_override_scenario() {
    let mut config = RateConfig::default();
    config.add_custom_rate("DZD", "GBP", "0.0059").unwrap();

    assert_eq!(resolve(&code("DZD"), &code("GBP"), &config), 0.0059);
    let reverse = resolve(&code("GBP"), &code("DZD"), &config);
    assert_relative_eq!(reverse, 169.49, epsilon = 0.01);
}

#[test]
fn test_invalid_amount_scenario() {
    let mut calc = Calculator::open(MemoryStore::new());
    calc.enter_amount("abc");
    assert_eq!(calc.convert(), ConversionResult::InvalidAmount);
    assert_eq!(calc.result().unwrap().to_string(), "Invalid amount");
}

#[test]
fn test_unknown_currency_is_reported_by_quote() {
    let config = RateConfig::default();
    let resolver = RateResolver::new(&config);

    assert_eq!(resolver.rate(&code("XOF"), &code("EUR")), 1.0);
    let quote = resolver.quote(&code("EUR"), &code("XOF"));
    assert_eq!(
        quote.source,
        RateSource::Fallback {
            unknown: vec![code("XOF")]
        }
    );
    assert!(resolver.try_rate(&code("EUR"), &code("XOF")).is_err());
}

/// A full session against a file store: edit rates, save, reopen, convert.
#[test]
fn test_file_backed_session_roundtrip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("rates.json");

    {
        let mut calc = Calculator::open(FileStore::open(&path).unwrap());
        calc.select_tab(Tab::Rates);
        calc.set_dzd_eur_rate("0.0068").unwrap();
        calc.add_custom_rate("eur", "tnd", "3.35").unwrap();
        assert!(matches!(calc.save_rates(), SaveStatus::Saved { .. }));
    }

    let raw = std::fs::read_to_string(&path).unwrap();
    let stored: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(stored["eurUsdRate"], "1.09");
    assert_eq!(stored["dzdEurRate"], "0.0068");
    assert_eq!(stored["customRates"], r#"{"EUR_TND":"3.35"}"#);

    let mut calc = Calculator::open(FileStore::open(&path).unwrap());
    assert_eq!(calc.config().dzd_eur_rate, 0.0068);

    calc.set_from(code("TND"));
    calc.set_to(code("EUR"));
    for c in "c<335=".chars() {
        calc.press(Key::from_char(c).unwrap());
    }
    assert_eq!(calc.result_line().as_deref(), Some("100.0000 EUR"));
}

/// Malformed stored values never stop a session from opening.
#[test]
fn test_malformed_store_falls_back_to_defaults() {
    let backend: MemoryStore = [
        ("eurUsdRate", "1.1"),
        ("dzdEurRate", "not-a-number"),
        ("customRates", r#"{"DZD_GBP": 0.0059}"#),
    ]
    .into_iter()
    .collect();

    let calc = Calculator::open(backend);
    let config = calc.config();
    assert_eq!(config.eur_usd_rate, 1.1);
    assert_eq!(config.dzd_eur_rate, 0.0067);
    assert!(config.custom_rates.is_empty());
}

#[test]
fn test_removed_custom_rate_restores_triangulation() {
    let mut store = RateStore::new(MemoryStore::new());
    let mut config = store.load();
    let pair = config.add_custom_rate("GBP", "EUR", "1.2").unwrap();
    store.save(&config).unwrap();

    config.remove_custom_rate(&pair);
    store.save(&config).unwrap();

    let reloaded = store.load();
    assert!(reloaded.custom_rates.is_empty());
    assert_relative_eq!(resolve(&code("GBP"), &code("EUR"), &reloaded), 1.17, epsilon = 1e-12);
    assert_eq!(
        store.backend().get("customRates").unwrap().as_deref(),
        Some("{}")
    );
}

/// Converting, swapping, and converting back returns the original amount.
#[test]
fn test_swap_and_convert_back() {
    let mut calc = Calculator::open(MemoryStore::new());
    calc.set_from(code("USD"));
    calc.set_to(code("DZD"));
    calc.enter_amount("100");
    calc.convert();
    calc.swap();
    match calc.convert() {
        ConversionResult::Converted(value) => assert_relative_eq!(value, 100.0, epsilon = 1e-3),
        other => panic!("expected a conversion, got {:?}", other),
    }
}
