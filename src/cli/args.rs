use crate::engine::{BackoffPolicy, WorkerConfig};
use clap::{Parser, ValueEnum};
use std::path::PathBuf;
use std::time::Duration;

/// Stress a shared ledger with concurrent transfers and audit conservation
#[derive(Parser, Debug)]
#[command(name = "ledger-transfer-engine")]
#[command(
    about = "Run concurrent random transfers against a seeded ledger and verify the total balance is conserved",
    long_about = None
)]
pub struct CliArgs {
    /// Number of accounts to seed before the concurrent phase
    #[arg(
        long,
        value_name = "COUNT",
        default_value_t = 100,
        value_parser = clap::value_parser!(u64).range(2..)
    )]
    pub accounts: u64,

    /// Starting balance for every seeded account
    #[arg(long = "initial-balance", value_name = "UNITS", default_value_t = 10_000)]
    pub initial_balance: u64,

    /// Number of parallel workers
    #[arg(
        long,
        value_name = "COUNT",
        default_value_t = 10,
        value_parser = clap::builder::RangedU64ValueParser::<usize>::new().range(1..)
    )]
    pub workers: usize,

    /// Transfers each worker issues
    #[arg(long, value_name = "COUNT", default_value_t = 1000)]
    pub transfers: u32,

    /// Fixed amount moved per transfer
    #[arg(
        long,
        value_name = "UNITS",
        default_value_t = 1,
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    pub amount: u64,

    /// Store implementation: fine-grained conflicts or one global lock
    #[arg(long, value_enum, value_name = "STORE", default_value = "memory")]
    pub store: StoreKind,

    /// Execution strategy driving the workers
    #[arg(long, value_enum, value_name = "RUNNER", default_value = "threads")]
    pub runner: RunnerKind,

    /// Delay before the first conflict retry, in milliseconds
    #[arg(long = "base-delay-ms", value_name = "MS", default_value_t = 10)]
    pub base_delay_ms: u64,

    /// Delay added per further conflict retry, in milliseconds
    #[arg(long = "retry-increment-ms", value_name = "MS", default_value_t = 50)]
    pub retry_increment_ms: u64,

    /// Pause between a worker's independent transfers, in milliseconds
    #[arg(long = "pacing-ms", value_name = "MS", default_value_t = 5)]
    pub pacing_ms: u64,

    /// Seed for reproducible pair selection (workers derive their own)
    #[arg(long = "rng-seed", value_name = "SEED")]
    pub rng_seed: Option<u64>,

    /// Write final account balances as CSV to this path
    #[arg(long, value_name = "PATH")]
    pub output: Option<PathBuf>,
}

/// Available ledger store implementations
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum StoreKind {
    /// Fine-grained optimistic store; conflicts surface at commit (default)
    Memory,
    /// Degraded mode: one process-wide lock serializing all workers
    Serialized,
}

/// Available worker execution strategies
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum RunnerKind {
    /// One scoped OS thread per worker
    Threads,
    /// Tokio blocking pool
    Tasks,
}

impl CliArgs {
    /// Backoff policy assembled from the delay flags
    pub fn backoff_policy(&self) -> BackoffPolicy {
        BackoffPolicy::new(
            Duration::from_millis(self.base_delay_ms),
            Duration::from_millis(self.retry_increment_ms),
            Duration::from_millis(self.pacing_ms),
        )
    }

    /// Per-worker configuration shared by the whole pool
    pub fn worker_config(&self) -> WorkerConfig {
        WorkerConfig {
            transfers: self.transfers,
            amount: self.amount,
            account_count: self.accounts,
            backoff: self.backoff_policy(),
            rng_seed: self.rng_seed,
        }
    }
}
