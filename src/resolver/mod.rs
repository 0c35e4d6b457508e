//! Rate resolution: custom overrides first, then triangulation through EUR.

pub mod rate_resolver;
pub mod triangulation;
