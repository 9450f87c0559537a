//! Error types for the ledger transfer engine
//!
//! Two layers of errors exist:
//!
//! - [`StoreError`] — returned by the ledger store. `Conflict` is transient
//!   and always retried by the backoff policy; `Unavailable` is fatal.
//! - [`EngineError`] — top-level failures surfaced by the run driver:
//!   an aborted worker, a conservation violation, or an I/O problem while
//!   writing the final balance dump.

use super::account::Balance;
use super::transfer::TransferOutcome;
use thiserror::Error;

/// Error returned by ledger store operations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// The scope could not proceed because of a concurrent writer
    ///
    /// Always retryable; the backoff policy absorbs this entirely.
    #[error("scope conflicts with a concurrent writer")]
    Conflict,

    /// The store failed for a reason other than contention
    ///
    /// Fatal: the affected worker stops and reports the failure.
    #[error("store unavailable: {message}")]
    Unavailable {
        /// Description of the underlying failure
        message: String,
    },
}

impl StoreError {
    /// Create an Unavailable error
    pub fn unavailable(message: impl Into<String>) -> Self {
        StoreError::Unavailable {
            message: message.into(),
        }
    }
}

/// Top-level error for a complete engine run
#[derive(Debug, Error)]
pub enum EngineError {
    /// A worker hit a fatal transfer outcome and stopped early
    #[error("worker {worker} aborted: {outcome}")]
    WorkerAborted {
        /// Index of the worker that stopped
        worker: usize,
        /// The fatal outcome it observed
        outcome: TransferOutcome,
    },

    /// The final balance sum differs from the baseline
    #[error("conservation violated: baseline {baseline}, final {actual}")]
    ConservationViolated {
        /// Total before the concurrent phase
        baseline: Balance,
        /// Total after the concurrent phase
        actual: Balance,
    },

    /// A store operation outside the worker loop failed (seed or audit)
    #[error(transparent)]
    Store(#[from] StoreError),

    /// I/O error while writing output
    #[error("I/O error: {message}")]
    Io {
        /// Description of the I/O error
        message: String,
    },

    /// CSV serialization error while writing the balance dump
    #[error("CSV error: {message}")]
    Csv {
        /// Description of the CSV error
        message: String,
    },
}

impl From<std::io::Error> for EngineError {
    fn from(error: std::io::Error) -> Self {
        EngineError::Io {
            message: error.to_string(),
        }
    }
}

impl From<csv::Error> for EngineError {
    fn from(error: csv::Error) -> Self {
        EngineError::Csv {
            message: error.to_string(),
        }
    }
}
