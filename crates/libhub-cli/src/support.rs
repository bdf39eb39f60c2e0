use chrono::{NaiveDate, Utc};
use libhub_ledger::{Ledger, LedgerConfig};
use serde::Serialize;
use tracing_subscriber::EnvFilter;

/// Route ledger tracing to stderr. `RUST_LOG` wins over `-v`.
pub fn init_tracing(verbose: u8) {
    let fallback = match verbose {
        0 => "error",
        1 => "libhub_ledger=debug,warn",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));
    // A subscriber may already be installed; keep it.
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init()
        .ok();
}

pub fn load_config_or_exit(path: Option<&str>) -> LedgerConfig {
    let Some(path) = path else {
        return LedgerConfig::default();
    };
    LedgerConfig::load(path).unwrap_or_else(|e| {
        eprintln!("error: {e}");
        std::process::exit(1);
    })
}

pub fn demo_ledger_or_exit(config: &LedgerConfig) -> Ledger {
    Ledger::demo(config.clone()).unwrap_or_else(|e| {
        eprintln!("error: failed to load demo dataset: {e}");
        std::process::exit(1);
    })
}

/// The injected business date, or the system's UTC date.
pub fn today_or_default(today: Option<NaiveDate>) -> NaiveDate {
    today.unwrap_or_else(|| Utc::now().date_naive())
}

pub fn print_json<T: Serialize>(payload: &T) {
    let rendered = serde_json::to_string_pretty(payload).unwrap_or_else(|e| {
        eprintln!("error: failed to render json payload: {e}");
        std::process::exit(2);
    });
    println!("{rendered}");
}
