//! Custom rate example.
//!
//! Pins the DZD → GBP rate, shows the override answering both directions,
//! and persists the configuration through the rate store.

use dzd_converter::calculator::session::Calculator;
use dzd_converter::storage::kv::{KeyValueStore, MemoryStore};

fn main() {
    println!("╔═════════════════════════════════════════╗");
    println!("║  dzd-converter: Custom Rates Demo       ║");
    println!("╚═════════════════════════════════════════╝\n");

    let mut calc = Calculator::open(MemoryStore::new());
    calc.set_from("GBP".into());
    calc.set_to("DZD".into());

    println!("━━━ Triangulated via EUR ━━━\n");
    println!("  {}", calc.current_rate_line());
    println!("  source: {}\n", calc.quote().source);

    if let Err(e) = calc.add_custom_rate("dzd", "gbp", "0.0059") {
        eprintln!("could not add rate: {}", e);
        return;
    }

    println!("━━━ With DZD → GBP pinned at 0.0059 ━━━\n");
    for line in calc.custom_rate_lines() {
        println!("  custom: {}", line);
    }
    println!("  {}", calc.current_rate_line());
    println!("  source: {}\n", calc.quote().source);

    println!("━━━ Saving ━━━\n");
    println!("  {}", calc.save_rates());
    let backend = calc.store().backend();
    for key in ["eurUsdRate", "dzdEurRate", "customRates"] {
        if let Ok(Some(value)) = backend.get(key) {
            println!("  {} = {}", key, value);
        }
    }
}
