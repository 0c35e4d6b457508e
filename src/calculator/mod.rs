//! Headless model of the converter screen: keypad entry, currency selection,
//! the rates panel and display formatting.

pub mod display;
pub mod keypad;
pub mod session;
