//! Benchmark suite for store contention
//!
//! Compares the fine-grained optimistic store against the globally
//! serialized degraded mode while a fixed transfer workload runs on
//! varying worker counts.
//!
//! # Running Benchmarks
//!
//! ```bash
//! cargo bench
//! ```

use ledger_transfer_engine::engine::{BackoffPolicy, WorkerConfig};
use ledger_transfer_engine::runner::threads;
use ledger_transfer_engine::store::{seed, MemoryStore, SerializedStore};
use std::sync::Arc;

const ACCOUNTS: u64 = 64;
const TRANSFERS_PER_WORKER: u32 = 200;

fn main() {
    divan::main();
}

fn workload() -> WorkerConfig {
    WorkerConfig {
        transfers: TRANSFERS_PER_WORKER,
        amount: 1,
        account_count: ACCOUNTS,
        backoff: BackoffPolicy::immediate(),
        rng_seed: Some(1),
    }
}

/// Fine-grained optimistic store under increasing worker counts
#[divan::bench(args = [1, 2, 4, 8])]
fn memory_store(bencher: divan::Bencher, workers: usize) {
    bencher
        .with_inputs(|| {
            let store = MemoryStore::new();
            seed(&store, ACCOUNTS, 1_000).expect("seeding failed");
            Arc::new(store)
        })
        .bench_values(|store| {
            threads::run(&store, workers, &workload()).expect("run failed");
        });
}

/// Globally serialized store under the same workload
#[divan::bench(args = [1, 2, 4, 8])]
fn serialized_store(bencher: divan::Bencher, workers: usize) {
    bencher
        .with_inputs(|| {
            let store = SerializedStore::new();
            seed(&store, ACCOUNTS, 1_000).expect("seeding failed");
            Arc::new(store)
        })
        .bench_values(|store| {
            threads::run(&store, workers, &workload()).expect("run failed");
        });
}
