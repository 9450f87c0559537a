//! Tokio-based execution
//!
//! Builds a multi-threaded runtime sized to the host and fans the workers
//! out on its blocking pool. The workers themselves stay synchronous (the
//! store is synchronous); the runtime only provides the spawning and join
//! machinery, mirroring a thread pool with a bounded blocking budget.

use crate::engine::pool::{run_worker, WorkerConfig, WorkerReport};
use crate::store::LedgerStore;
use crate::types::EngineError;
use std::sync::Arc;

/// Run all workers as blocking tasks on a tokio runtime
pub fn run<S: LedgerStore + 'static>(
    store: &Arc<S>,
    workers: usize,
    config: &WorkerConfig,
) -> Result<Vec<WorkerReport>, EngineError> {
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(num_cpus::get().max(1))
        .max_blocking_threads(workers.max(1))
        .build()?;

    let handles: Vec<_> = (0..workers)
        .map(|worker| {
            let store = Arc::clone(store);
            let config = config.clone();
            runtime
                .spawn_blocking(move || run_worker(store.as_ref(), worker, &config))
        })
        .collect();

    let joined = runtime.block_on(futures::future::join_all(handles));

    Ok(joined
        .into_iter()
        .enumerate()
        .map(|(worker, result)| {
            result.unwrap_or_else(|_| {
                tracing::error!(worker, "worker task panicked");
                WorkerReport::panicked(worker)
            })
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::BackoffPolicy;
    use crate::store::{seed, MemoryStore};

    #[test]
    fn blocking_pool_produces_same_reports_as_threads() {
        let store = Arc::new(MemoryStore::new());
        seed(store.as_ref(), 10, 50).unwrap();

        let config = WorkerConfig {
            transfers: 50,
            amount: 1,
            account_count: 10,
            backoff: BackoffPolicy::immediate(),
            rng_seed: Some(3),
        };
        let reports = run(&store, 3, &config).unwrap();

        assert_eq!(reports.len(), 3);
        for report in &reports {
            assert!(!report.is_fatal());
            assert_eq!(report.committed + report.insufficient_funds, 50);
        }
        assert_eq!(store.sum_balances().unwrap(), 500);
    }
}
