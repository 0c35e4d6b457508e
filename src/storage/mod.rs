//! Persistence of the rate configuration over a string key/value store.

pub mod kv;
pub mod rate_store;
