//! Transfer engine core
//!
//! The four cooperating parts of the concurrent-transfer exercise:
//!
//! - [`executor`] - one atomic transfer attempt against the store
//! - [`backoff`] - the conflict retry/pacing policy around the executor
//! - [`pool`] - the per-worker transfer loop and its report
//! - [`auditor`] - the balance-conservation check framing the run

use crate::types::EngineError;
use std::fmt;

pub mod auditor;
pub mod backoff;
pub mod executor;
pub mod pool;

pub use auditor::{AuditVerdict, InvariantAuditor};
pub use backoff::{execute_with_backoff, BackoffPolicy};
pub use pool::{run_worker, WorkerConfig, WorkerReport};

/// Aggregated result of one complete run
///
/// Distinguishes the three failure classes the report must keep apart:
/// contention-heavy but conserved (retries > 0, verdict conserved),
/// correctness violated (surplus/deficit), and fatal error (a worker
/// aborted early).
#[derive(Debug, Clone)]
pub struct RunSummary {
    /// Conservation verdict from the invariant auditor
    pub verdict: AuditVerdict,

    /// One report per worker, in worker-index order
    pub workers: Vec<WorkerReport>,
}

impl RunSummary {
    /// Whether the run as a whole succeeded
    ///
    /// True only if no worker reported a fatal outcome and the auditor
    /// reports the total conserved.
    pub fn succeeded(&self) -> bool {
        self.verdict.is_conserved() && !self.workers.iter().any(WorkerReport::is_fatal)
    }

    /// Total committed transfers across all workers
    pub fn total_committed(&self) -> u64 {
        self.workers.iter().map(|w| w.committed).sum()
    }

    /// Total insufficient-funds rejections across all workers
    pub fn total_insufficient_funds(&self) -> u64 {
        self.workers.iter().map(|w| w.insufficient_funds).sum()
    }

    /// Total conflict retries across all workers
    pub fn total_retries(&self) -> u64 {
        self.workers.iter().map(|w| w.retries).sum()
    }

    /// The error to surface for a failed run, if any
    ///
    /// A fatal worker takes precedence over a conservation violation,
    /// since an aborted worker already explains an incomplete run.
    pub fn first_failure(&self) -> Option<EngineError> {
        if let Some(report) = self.workers.iter().find(|w| w.is_fatal()) {
            let outcome = report.fatal.clone()?;
            return Some(EngineError::WorkerAborted {
                worker: report.worker,
                outcome,
            });
        }
        match self.verdict {
            AuditVerdict::Conserved { .. } => None,
            AuditVerdict::Surplus { baseline, actual }
            | AuditVerdict::Deficit { baseline, actual } => {
                Some(EngineError::ConservationViolated { baseline, actual })
            }
        }
    }
}

impl fmt::Display for RunSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for report in &self.workers {
            write!(
                f,
                "worker {:>3}: committed {:>6}, insufficient {:>5}, retries {:>5}",
                report.worker, report.committed, report.insufficient_funds, report.retries
            )?;
            match &report.fatal {
                Some(outcome) => writeln!(f, ", aborted: {}", outcome)?,
                None => writeln!(f)?,
            }
        }
        writeln!(
            f,
            "totals: committed {}, insufficient {}, retries {}",
            self.total_committed(),
            self.total_insufficient_funds(),
            self.total_retries()
        )?;
        write!(f, "audit: {}", self.verdict)
    }
}
