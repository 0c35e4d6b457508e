//! Basic conversion example.
//!
//! Converts an amount from DZD into every supported currency using the
//! default base rates, then shows how editing a base rate moves the result.

use dzd_converter::calculator::display::{format_fixed, AMOUNT_DECIMALS};
use dzd_converter::core::currency::CurrencyCode;
use dzd_converter::core::rate_config::RateConfig;
use dzd_converter::resolver::rate_resolver::RateResolver;

fn main() {
    println!("╔═════════════════════════════════════════╗");
    println!("║  dzd-converter: Basic Conversion Demo   ║");
    println!("╚═════════════════════════════════════════╝\n");

    let amount = 10_000.0;
    let dzd = CurrencyCode::new("DZD");

    println!("━━━ {} DZD at default rates ━━━\n", amount);
    let config = RateConfig::default();
    let resolver = RateResolver::new(&config);
    for code in CurrencyCode::supported() {
        let converted = resolver.convert(amount, &dzd, &code);
        println!(
            "  {:>14} {}  ({})",
            format_fixed(converted, AMOUNT_DECIMALS),
            code,
            code.display_name().unwrap_or("?")
        );
    }

    println!("\n━━━ After moving DZD/EUR to 0.0062 ━━━\n");
    let config = RateConfig {
        dzd_eur_rate: 0.0062,
        ..RateConfig::default()
    };
    let resolver = RateResolver::new(&config);
    for code in ["EUR", "USD", "GBP"].map(CurrencyCode::new) {
        let converted = resolver.convert(amount, &dzd, &code);
        println!("  {:>14} {}", format_fixed(converted, AMOUNT_DECIMALS), code);
    }
}
