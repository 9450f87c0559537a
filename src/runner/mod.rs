//! Execution strategies for the worker pool
//!
//! Two interchangeable ways to drive `W` workers against the store,
//! selected at runtime:
//!
//! - [`threads`] - scoped OS threads, one per worker (default; matches the
//!   original exercise's thread-per-worker shape)
//! - [`tasks`] - a tokio runtime fanning the synchronous workers out on its
//!   blocking pool
//!
//! Both produce the same per-worker reports; a panicked worker is converted
//! into a fatal report instead of tearing the run down.

use crate::cli::RunnerKind;
use crate::engine::pool::{WorkerConfig, WorkerReport};
use crate::store::LedgerStore;
use crate::types::EngineError;
use std::sync::Arc;

pub mod tasks;
pub mod threads;

/// Run `workers` workers with the selected strategy and collect reports
///
/// # Errors
///
/// Returns an error only for strategy-level failures (e.g. the tokio
/// runtime failing to build); per-worker failures are reported inside the
/// returned [`WorkerReport`]s.
pub fn run_workers<S>(
    kind: RunnerKind,
    store: &Arc<S>,
    workers: usize,
    config: &WorkerConfig,
) -> Result<Vec<WorkerReport>, EngineError>
where
    S: LedgerStore + 'static,
{
    match kind {
        RunnerKind::Threads => threads::run(store, workers, config),
        RunnerKind::Tasks => tasks::run(store, workers, config),
    }
}
