use crate::calculator::display::{format_fixed, AMOUNT_DECIMALS, INVALID_AMOUNT};
use std::fmt;

/// Amount shown when the calculator starts or is cleared.
pub const INITIAL_AMOUNT: &str = "1";

/// A keypad button.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Digit(char),
    Decimal,
    Backspace,
    Clear,
    Convert,
    Swap,
}

impl Key {
    /// Map a typed character to a key: `0-9`, `.`, `<` (backspace), `c`,
    /// `=` (convert) and `s` (swap).
    pub fn from_char(c: char) -> Option<Key> {
        match c {
            '0'..='9' => Some(Key::Digit(c)),
            '.' => Some(Key::Decimal),
            '<' => Some(Key::Backspace),
            'c' | 'C' => Some(Key::Clear),
            '=' => Some(Key::Convert),
            's' | 'S' => Some(Key::Swap),
            _ => None,
        }
    }
}

/// Outcome of the last conversion.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ConversionResult {
    Converted(f64),
    InvalidAmount,
}

impl fmt::Display for ConversionResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConversionResult::Converted(value) => {
                write!(f, "{}", format_fixed(*value, AMOUNT_DECIMALS))
            }
            ConversionResult::InvalidAmount => write!(f, "{}", INVALID_AMOUNT),
        }
    }
}

/// The amount being typed and the result currently on display.
#[derive(Debug, Clone, PartialEq)]
pub struct AmountEntry {
    amount: String,
    result: Option<ConversionResult>,
}

impl Default for AmountEntry {
    fn default() -> Self {
        Self {
            amount: INITIAL_AMOUNT.to_string(),
            result: None,
        }
    }
}

impl AmountEntry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn amount(&self) -> &str {
        &self.amount
    }

    pub fn result(&self) -> Option<ConversionResult> {
        self.result
    }

    /// A digit replaces a `"0"` or empty amount, or any amount while a result
    /// is displayed (clearing the result). Otherwise it is appended.
    pub fn digit(&mut self, d: char) {
        debug_assert!(d.is_ascii_digit());
        if self.amount == "0" || self.amount.is_empty() || self.result.is_some() {
            self.amount = d.to_string();
            self.result = None;
        } else {
            self.amount.push(d);
        }
    }

    /// At most one decimal point.
    pub fn decimal(&mut self) {
        if !self.amount.contains('.') {
            self.amount.push('.');
        }
    }

    pub fn backspace(&mut self) {
        if self.amount.chars().count() > 1 {
            self.amount.pop();
        } else {
            self.amount = "0".to_string();
        }
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn set_result(&mut self, result: ConversionResult) {
        self.result = Some(result);
    }

    /// Replace the typed amount, clearing any displayed result.
    pub fn set_amount(&mut self, amount: impl Into<String>) {
        self.amount = amount.into();
        self.result = None;
    }

    /// Move a displayed numeric result into the amount, as the swap control
    /// does. An `Invalid amount` result is dropped and the amount kept.
    pub fn carry_result(&mut self) {
        match self.result.take() {
            Some(converted @ ConversionResult::Converted(_)) => {
                self.amount = converted.to_string();
            }
            Some(ConversionResult::InvalidAmount) | None => {}
        }
    }
}
