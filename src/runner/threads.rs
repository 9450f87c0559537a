//! Thread-per-worker execution
//!
//! Spawns one scoped OS thread per worker and joins them all before
//! returning, so the final audit never races a straggler. Worker indexes
//! are handed out by the spawn loop; the workers share nothing but the
//! store reference.

use crate::engine::pool::{run_worker, WorkerConfig, WorkerReport};
use crate::store::LedgerStore;
use crate::types::EngineError;
use std::sync::Arc;
use std::thread;

/// Run all workers on dedicated OS threads
pub fn run<S: LedgerStore>(
    store: &Arc<S>,
    workers: usize,
    config: &WorkerConfig,
) -> Result<Vec<WorkerReport>, EngineError> {
    let store = store.as_ref();
    let reports = thread::scope(|scope| {
        let handles: Vec<_> = (0..workers)
            .map(|worker| scope.spawn(move || run_worker(store, worker, config)))
            .collect();

        handles
            .into_iter()
            .enumerate()
            .map(|(worker, handle)| {
                handle.join().unwrap_or_else(|_| {
                    tracing::error!(worker, "worker thread panicked");
                    WorkerReport::panicked(worker)
                })
            })
            .collect()
    });
    Ok(reports)
}
