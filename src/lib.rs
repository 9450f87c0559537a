//! Ledger Transfer Engine Library
//! # Overview
//!
//! This library stresses a shared ledger of accounts with many concurrent
//! funds transfers and verifies conservation: the sum of all balances must
//! be invariant across any interleaving of committed transfers.
//!
//! # Architecture
//!
//! - [`types`] - Core data types (Account, TransferRequest, outcomes, errors)
//! - [`cli`] - CLI argument parsing
//! - [`store`] - Ledger store seam plus two implementations:
//!   - [`store::memory`] - fine-grained optimistic store (first committer wins)
//!   - [`store::serialized`] - degraded mode behind one process-wide lock
//! - [`engine`] - The concurrent-transfer core:
//!   - [`engine::executor`] - one atomic transfer attempt
//!   - [`engine::backoff`] - linear conflict retry and pacing
//!   - [`engine::pool`] - per-worker transfer loop and reporting
//!   - [`engine::auditor`] - conservation check (baseline vs final total)
//! - [`runner`] - Worker execution strategies (OS threads or tokio)
//! - [`io`] - Final balance dump as CSV
//!
//! # Outcome taxonomy
//!
//! A transfer attempt ends in exactly one of:
//!
//! - **Committed**: both balances updated atomically
//! - **InsufficientFunds**: expected business outcome, counted and skipped
//! - **Conflict**: transient contention, absorbed by the backoff policy
//! - **NotFound / Invalid / StoreUnavailable**: fatal, stops the worker

// Module declarations
pub mod cli;
pub mod engine;
pub mod io;
pub mod runner;
pub mod store;
pub mod types;

pub use engine::{
    AuditVerdict, BackoffPolicy, InvariantAuditor, RunSummary, WorkerConfig, WorkerReport,
};
pub use store::{seed, LedgerScope, LedgerStore, MemoryStore, SerializedStore};
pub use types::{
    Account, AccountId, AttemptRecord, Balance, EngineError, StoreError, TransferOutcome,
    TransferRequest,
};
