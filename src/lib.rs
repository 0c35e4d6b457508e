//! # dzd-converter
//!
//! Keypad currency converter centred on the Algerian dinar.
//!
//! Rates come from two editable base rates (EUR/USD and DZD/EUR), a fixed
//! EUR table for the other supported currencies, and user-defined overrides
//! for specific currency pairs. The configuration is persisted to a local
//! key/value store.
//!
//! ## Architecture
//!
//! - **core** — Currency codes, pairs and the rate configuration
//! - **resolver** — Override lookup and triangulation through EUR
//! - **storage** — Key/value backends and the rate store
//! - **calculator** — Headless converter session: keypad, rates panel, display

pub mod calculator;
pub mod core;
pub mod resolver;
pub mod storage;

/// Convenience re-exports for common usage.
pub mod prelude {
    pub use crate::calculator::keypad::{ConversionResult, Key};
    pub use crate::calculator::session::{Calculator, SaveStatus, Tab};
    pub use crate::core::currency::{CurrencyCode, CurrencyPair, RateError};
    pub use crate::core::rate_config::{CustomRates, RateConfig};
    pub use crate::resolver::rate_resolver::{resolve, RateQuote, RateResolver, RateSource};
    pub use crate::storage::kv::{FileStore, KeyValueStore, MemoryStore, StoreError};
    pub use crate::storage::rate_store::RateStore;
}
