//! Rebuild a ledger from a persisted snapshot and check its roots.
//!
//! ```text
//! xane-replay <snapshot.json> [ledger-config.json]
//! ```
//!
//! With a config, the snapshot's tree heights must also match it. Exits
//! non-zero if the snapshot cannot be read or does not rebuild to the roots
//! it records. Log level via `RUST_LOG` (default `info`); set
//! `XANE_LOG_FORMAT=json` for JSON lines.

use std::process::ExitCode;

use tracing_subscriber::EnvFilter;
use xane_ledger::{BookSnapshot, OrderBookLedger};
use xane_types::{LedgerConfig, Result, Side, XaneError, constants};

fn replay(snapshot_path: &str, config_path: Option<&str>) -> Result<OrderBookLedger> {
    let raw = std::fs::read_to_string(snapshot_path)?;
    let snapshot: BookSnapshot = serde_json::from_str(&raw)?;

    if let Some(path) = config_path {
        let expected = LedgerConfig::load(path)?;
        if expected != snapshot.config {
            return Err(XaneError::SnapshotMismatch {
                reason: format!(
                    "snapshot heights {:?} differ from configured {:?}",
                    snapshot.config, expected
                ),
            });
        }
    }

    OrderBookLedger::restore(&snapshot)
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    if std::env::var("XANE_LOG_FORMAT").is_ok_and(|format| format == "json") {
        builder.json().init();
    } else {
        builder.init();
    }
}

fn main() -> ExitCode {
    init_logging();
    tracing::info!(version = constants::VERSION, "{} snapshot replay", constants::LEDGER_NAME);

    let args: Vec<String> = std::env::args().skip(1).collect();
    let Some(snapshot_path) = args.first() else {
        eprintln!("usage: xane-replay <snapshot.json> [ledger-config.json]");
        return ExitCode::from(2);
    };

    match replay(snapshot_path, args.get(1).map(String::as_str)) {
        Ok(ledger) => {
            for (pair_index, pair) in ledger.registry().pairs() {
                tracing::info!(
                    pair_index,
                    base = %pair.base(),
                    quote = %pair.quote(),
                    buy_root = %pair.buy_root(),
                    sell_root = %pair.sell_root(),
                    buy_orders = pair.orders(Side::Buy).order_count(),
                    sell_orders = pair.orders(Side::Sell).order_count(),
                    "Pair verified"
                );
            }
            tracing::info!(
                pairs = ledger.pair_count(),
                pairs_capacity = ledger.config().pairs_capacity(),
                orders_capacity = ledger.config().orders_capacity(),
                pairs_root = %ledger.pairs_root(),
                "Snapshot replay OK"
            );
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!(path = %snapshot_path, error = %e, "Snapshot replay failed");
            ExitCode::FAILURE
        }
    }
}
