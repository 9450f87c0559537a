//! Ledger Transfer Engine CLI
//!
//! Seeds a ledger, unleashes concurrent workers performing random
//! transfers, and audits that the total balance was conserved.
//!
//! # Usage
//!
//! ```bash
//! cargo run --release
//! cargo run --release -- --workers 10 --transfers 1000 --accounts 100
//! cargo run --release -- --store serialized --runner tasks
//! cargo run --release -- --rng-seed 42 --output balances.csv
//! ```
//!
//! # Exit Codes
//!
//! - 0: no fatal worker outcomes and the total was conserved
//! - 1: a worker aborted, conservation was violated, or setup/output failed

use ledger_transfer_engine::cli::{self, CliArgs, StoreKind};
use ledger_transfer_engine::engine::{InvariantAuditor, RunSummary};
use ledger_transfer_engine::io::write_balances_csv;
use ledger_transfer_engine::runner;
use ledger_transfer_engine::store::{seed, LedgerStore, MemoryStore, SerializedStore};
use ledger_transfer_engine::types::EngineError;
use std::fs::File;
use std::process;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = cli::parse_args();

    let result = match args.store {
        StoreKind::Memory => run(&args, MemoryStore::new()),
        StoreKind::Serialized => run(&args, SerializedStore::new()),
    };

    match result {
        Ok(summary) => {
            println!("{}", summary);
            if summary.succeeded() {
                process::exit(0);
            }
            if let Some(failure) = summary.first_failure() {
                eprintln!("Error: {}", failure);
            }
            process::exit(1);
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    }
}

/// Seed, run the concurrent phase, audit, and optionally dump balances
fn run<S: LedgerStore + 'static>(args: &CliArgs, store: S) -> Result<RunSummary, EngineError> {
    let store = Arc::new(store);

    seed(store.as_ref(), args.accounts, args.initial_balance)?;
    let auditor = InvariantAuditor::baseline(store.as_ref())?;
    tracing::info!(
        accounts = args.accounts,
        initial_balance = args.initial_balance,
        baseline = auditor.baseline_total(),
        "ledger seeded"
    );

    let reports = runner::run_workers(args.runner, &store, args.workers, &args.worker_config())?;
    let verdict = auditor.conclude(store.as_ref())?;
    let summary = RunSummary {
        verdict,
        workers: reports,
    };

    if let Some(path) = &args.output {
        let accounts = store.snapshot_accounts()?;
        write_balances_csv(&accounts, File::create(path)?)?;
        tracing::info!(path = %path.display(), "final balances written");
    }

    Ok(summary)
}
