//! Foundational types: currency codes, pairs and the rate configuration.

pub mod currency;
pub mod rate_config;
