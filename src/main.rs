//! dzd-converter CLI
//!
//! Convert amounts and manage exchange rates from the command line. Rates are
//! persisted in a JSON key/value file (`rates.json` by default).
//!
//! # Usage
//!
//! ```bash
//! # Convert 1500 DZD to EUR
//! dzd-converter convert 1500
//!
//! # Convert between any two currencies
//! dzd-converter convert 250 --from GBP --to DZD
//!
//! # Show the current rate and where it comes from
//! dzd-converter rate GBP DZD --format json
//!
//! # Pin a pair and edit the base rates
//! dzd-converter add-rate DZD GBP 0.0059
//! dzd-converter set-base --eur-usd 1.08 --dzd-eur 0.0068
//!
//! # Drive the keypad: digits, '.', '<' backspace, 'c' clear, 's' swap, '=' convert
//! dzd-converter keys "2500="
//! ```

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use dzd_converter::calculator::display::{format_fixed, RATE_DECIMALS};
use dzd_converter::calculator::keypad::Key;
use dzd_converter::calculator::session::{Calculator, SaveStatus, DEFAULT_FROM, DEFAULT_TO};
use dzd_converter::core::currency::{CurrencyCode, CurrencyPair, SUPPORTED_CURRENCIES};
use dzd_converter::storage::kv::FileStore;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "dzd-converter", version, about = "Keypad currency converter with editable rates")]
struct Cli {
    /// Path to the JSON rate store.
    #[arg(long, global = true, default_value = "rates.json")]
    store: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Convert an amount between two currencies
    Convert {
        amount: String,
        #[arg(long, default_value = DEFAULT_FROM)]
        from: String,
        #[arg(long, default_value = DEFAULT_TO)]
        to: String,
    },
    /// Replay keypad presses and print the display
    Keys {
        keys: String,
        #[arg(long, default_value = DEFAULT_FROM)]
        from: String,
        #[arg(long, default_value = DEFAULT_TO)]
        to: String,
    },
    /// Show the rate for one pair
    Rate {
        from: String,
        to: String,
        #[arg(long, value_enum, default_value_t = Format::Text)]
        format: Format,
    },
    /// List base rates and custom rates
    Rates {
        #[arg(long, value_enum, default_value_t = Format::Text)]
        format: Format,
    },
    /// Set the EUR/USD and/or DZD/EUR base rates and save
    SetBase {
        #[arg(long)]
        eur_usd: Option<String>,
        #[arg(long)]
        dzd_eur: Option<String>,
    },
    /// Add or replace a custom rate for FROM → TO and save
    AddRate { from: String, to: String, rate: String },
    /// Remove the custom rate for FROM → TO and save
    RemoveRate { from: String, to: String },
    /// List supported currencies
    Currencies,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    Text,
    Json,
}

/// JSON output for `rate`.
#[derive(serde::Serialize)]
struct RateOutput {
    from: String,
    to: String,
    rate: f64,
    display: String,
    source: dzd_converter::resolver::rate_resolver::RateSource,
}

/// JSON output for `rates`.
#[derive(serde::Serialize)]
struct RatesOutput<'a> {
    store: String,
    #[serde(flatten)]
    config: &'a dzd_converter::core::rate_config::RateConfig,
}

type Session = Calculator<FileStore>;

fn open_session(path: &Path) -> Result<Session> {
    let backend = FileStore::open(path)
        .with_context(|| format!("cannot open rate store '{}'", path.display()))?;
    Ok(Calculator::open(backend))
}

fn select_pair(session: &mut Session, from: &str, to: &str) {
    let from = CurrencyCode::normalized(from);
    let to = CurrencyCode::normalized(to);
    for code in [&from, &to] {
        if !code.is_supported() {
            log::warn!("{} is not a supported currency", code);
        }
    }
    session.set_from(from);
    session.set_to(to);
}

fn save(session: &mut Session) -> Result<()> {
    match session.save_rates() {
        status @ SaveStatus::Saved { .. } => {
            eprintln!("{}", status);
            Ok(())
        }
        status @ SaveStatus::Failed { .. } => bail!("{}", status),
    }
}

fn cmd_convert(mut session: Session, amount: &str, from: &str, to: &str) -> Result<()> {
    select_pair(&mut session, from, to);
    session.enter_amount(amount);
    session.convert();
    if let Some(line) = session.result_line() {
        println!("{}", line);
    }
    Ok(())
}

fn cmd_keys(mut session: Session, keys: &str, from: &str, to: &str) -> Result<()> {
    select_pair(&mut session, from, to);
    for c in keys.chars().filter(|c| !c.is_whitespace()) {
        let key = Key::from_char(c).with_context(|| format!("unknown key '{}'", c))?;
        session.press(key);
    }
    println!(
        "{} {} → {}",
        session.amount(),
        session.from_currency(),
        session.to_currency()
    );
    if let Some(line) = session.result_line() {
        println!("{}", line);
    }
    Ok(())
}

fn cmd_rate(mut session: Session, from: &str, to: &str, format: Format) -> Result<()> {
    select_pair(&mut session, from, to);
    let quote = session.quote();
    if quote.is_fallback() {
        log::warn!("{}; the rate is not meaningful", quote.source);
    }

    if format == Format::Json {
        let output = RateOutput {
            from: quote.from.to_string(),
            to: quote.to.to_string(),
            rate: quote.rate,
            display: format_fixed(quote.rate, RATE_DECIMALS),
            source: quote.source,
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        println!("{}", session.current_rate_line());
        println!("  source: {}", quote.source);
    }
    Ok(())
}

fn cmd_rates(session: Session, store: &Path, format: Format) -> Result<()> {
    if format == Format::Json {
        let output = RatesOutput {
            store: store.display().to_string(),
            config: session.config(),
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    let config = session.config();
    println!("Base Rates");
    println!("  EUR/USD Rate: {}", config.eur_usd_rate);
    println!("  DZD/EUR Rate: {}", config.dzd_eur_rate);
    println!("Custom Rates");
    let lines = session.custom_rate_lines();
    if lines.is_empty() {
        println!("  (none)");
    }
    for line in lines {
        println!("  {}", line);
    }
    Ok(())
}

fn cmd_set_base(mut session: Session, eur_usd: Option<&str>, dzd_eur: Option<&str>) -> Result<()> {
    if eur_usd.is_none() && dzd_eur.is_none() {
        bail!("nothing to set: pass --eur-usd and/or --dzd-eur");
    }
    if let Some(rate) = eur_usd {
        session.set_eur_usd_rate(rate)?;
    }
    if let Some(rate) = dzd_eur {
        session.set_dzd_eur_rate(rate)?;
    }
    save(&mut session)
}

fn cmd_add_rate(mut session: Session, from: &str, to: &str, rate: &str) -> Result<()> {
    let pair = session.add_custom_rate(from, to, rate)?;
    println!("{}: {}", pair, rate.trim());
    save(&mut session)
}

fn cmd_remove_rate(mut session: Session, from: &str, to: &str) -> Result<()> {
    let pair = CurrencyPair::new(CurrencyCode::normalized(from), CurrencyCode::normalized(to));
    if session.remove_custom_rate(&pair).is_none() {
        bail!("no custom rate for {}", pair);
    }
    save(&mut session)
}

fn cmd_currencies() {
    for (code, name) in SUPPORTED_CURRENCIES {
        println!("{}  {}", code, name);
    }
}

fn run(cli: Cli) -> Result<()> {
    if let Command::Currencies = cli.command {
        cmd_currencies();
        return Ok(());
    }

    let session = open_session(&cli.store)?;
    match cli.command {
        Command::Convert { amount, from, to } => cmd_convert(session, &amount, &from, &to),
        Command::Keys { keys, from, to } => cmd_keys(session, &keys, &from, &to),
        Command::Rate { from, to, format } => cmd_rate(session, &from, &to, format),
        Command::Rates { format } => cmd_rates(session, &cli.store, format),
        Command::SetBase { eur_usd, dzd_eur } => {
            cmd_set_base(session, eur_usd.as_deref(), dzd_eur.as_deref())
        }
        Command::AddRate { from, to, rate } => cmd_add_rate(session, &from, &to, &rate),
        Command::RemoveRate { from, to } => cmd_remove_rate(session, &from, &to),
        Command::Currencies => Ok(()),
    }
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    if let Err(e) = run(Cli::parse()) {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}
