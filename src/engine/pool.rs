//! Worker pool primitives
//!
//! A worker is handed an explicit index at spawn time (never an ambient
//! global counter), draws random distinct account pairs, and drives each
//! transfer through the executor wrapped by the backoff policy. Fatal
//! outcomes stop the worker; `InsufficientFunds` is tallied and the worker
//! moves on. The spawning side (thread or task runner) joins every worker
//! and collects the reports.

use crate::engine::backoff::{execute_with_backoff, BackoffPolicy};
use crate::store::LedgerStore;
use crate::types::{AccountId, Balance, TransferOutcome, TransferRequest};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::thread;

/// Per-worker run parameters, shared by all workers of a pool
#[derive(Debug, Clone)]
pub struct WorkerConfig {
    /// Number of transfers each worker issues
    pub transfers: u32,

    /// Fixed amount per transfer
    pub amount: Balance,

    /// Number of seeded accounts; pairs are drawn from `1..=account_count`
    pub account_count: u64,

    /// Conflict retry and pacing policy
    pub backoff: BackoffPolicy,

    /// Base seed for reproducible pair selection; each worker derives its
    /// own stream by offsetting with its index. `None` seeds from entropy.
    pub rng_seed: Option<u64>,
}

/// What one worker did, reported after it finishes or aborts
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkerReport {
    /// Index assigned at spawn time (diagnostics only)
    pub worker: usize,

    /// Transfers that committed
    pub committed: u64,

    /// Transfers rejected for insufficient funds (business outcome)
    pub insufficient_funds: u64,

    /// Executor attempts across all transfers, including retries
    pub attempts: u64,

    /// Conflicted attempts that were retried
    pub retries: u64,

    /// Fatal outcome that stopped the worker early, if any
    pub fatal: Option<TransferOutcome>,
}

impl WorkerReport {
    fn new(worker: usize) -> Self {
        WorkerReport {
            worker,
            committed: 0,
            insufficient_funds: 0,
            attempts: 0,
            retries: 0,
            fatal: None,
        }
    }

    /// Report for a worker whose thread or task panicked
    pub fn panicked(worker: usize) -> Self {
        WorkerReport {
            fatal: Some(TransferOutcome::StoreUnavailable {
                message: "worker panicked".to_string(),
            }),
            ..WorkerReport::new(worker)
        }
    }

    /// Whether the worker stopped on a fatal outcome
    pub fn is_fatal(&self) -> bool {
        self.fatal.is_some()
    }
}

/// Draw two distinct account ids uniformly from `1..=account_count`
///
/// Rejection sampling: redraw the second id while it equals the first.
/// With account_count >= 2 the expected number of redraws is below one.
pub fn pick_distinct_pair<R: Rng>(rng: &mut R, account_count: u64) -> (AccountId, AccountId) {
    debug_assert!(account_count >= 2, "need at least two accounts for a pair");
    let origin = rng.gen_range(1..=account_count);
    let mut destination = rng.gen_range(1..=account_count);
    while destination == origin {
        destination = rng.gen_range(1..=account_count);
    }
    (origin, destination)
}

/// Run one worker's full transfer quota
///
/// Issues `config.transfers` transfers (or fewer if a fatal outcome stops
/// the worker) and returns the tally. The worker index is diagnostic only
/// and creates no ordering dependency between workers.
pub fn run_worker<S: LedgerStore>(store: &S, worker: usize, config: &WorkerConfig) -> WorkerReport {
    let mut rng = match config.rng_seed {
        Some(seed) => StdRng::seed_from_u64(seed.wrapping_add(worker as u64)),
        None => StdRng::from_entropy(),
    };
    let mut report = WorkerReport::new(worker);

    for _ in 0..config.transfers {
        let (origin, destination) = pick_distinct_pair(&mut rng, config.account_count);
        let request = TransferRequest::new(origin, destination, config.amount);
        let (outcome, record) = execute_with_backoff(store, &request, &config.backoff);

        report.attempts += u64::from(record.attempts);
        report.retries += u64::from(record.retries);

        match outcome {
            TransferOutcome::Committed => report.committed += 1,
            TransferOutcome::InsufficientFunds { .. } => report.insufficient_funds += 1,
            fatal => {
                tracing::error!(worker, outcome = %fatal, "worker stopping on fatal outcome");
                report.fatal = Some(fatal);
                return report;
            }
        }

        if !config.backoff.pacing_delay.is_zero() {
            thread::sleep(config.backoff.pacing_delay);
        }
    }

    tracing::info!(
        worker,
        committed = report.committed,
        insufficient_funds = report.insufficient_funds,
        retries = report.retries,
        "worker finished"
    );
    report
}
