//! Fixed-point rendering for the converter display.

/// Decimal places shown for a converted amount.
pub const AMOUNT_DECIMALS: usize = 4;

/// Decimal places shown for the current-rate line.
pub const RATE_DECIMALS: usize = 6;

/// Result text shown when the entered amount is not a number.
pub const INVALID_AMOUNT: &str = "Invalid amount";

/// Render `value` with exactly `decimals` places.
///
/// Non-finite values render as `Infinity`, `-Infinity` or `NaN`.
pub fn format_fixed(value: f64, decimals: usize) -> String {
    if value.is_nan() {
        "NaN".to_string()
    } else if value.is_infinite() {
        if value > 0.0 { "Infinity" } else { "-Infinity" }.to_string()
    } else {
        format!("{:.*}", decimals, value)
    }
}

/// Parse an entered amount; anything that is not a finite number is rejected.
pub fn parse_amount(text: &str) -> Option<f64> {
    text.trim()
        .parse::<f64>()
        .ok()
        .filter(|amount| amount.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_fixed() {
        assert_eq!(format_fixed(1.09, AMOUNT_DECIMALS), "1.0900");
        assert_eq!(format_fixed(0.0067, RATE_DECIMALS), "0.006700");
        assert_eq!(format_fixed(169.4915254, 2), "169.49");
        assert_eq!(format_fixed(-2.5, 1), "-2.5");
    }

    #[test]
    fn test_format_non_finite() {
        assert_eq!(format_fixed(f64::INFINITY, 4), "Infinity");
        assert_eq!(format_fixed(f64::NEG_INFINITY, 4), "-Infinity");
        assert_eq!(format_fixed(f64::NAN, 4), "NaN");
    }

    #[test]
    fn test_parse_amount() {
        assert_eq!(parse_amount("1500"), Some(1500.0));
        assert_eq!(parse_amount("12."), Some(12.0));
        assert_eq!(parse_amount("0.25"), Some(0.25));
        assert_eq!(parse_amount("abc"), None);
        assert_eq!(parse_amount(""), None);
        assert_eq!(parse_amount("inf"), None);
    }
}
