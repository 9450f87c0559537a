//! Invariant auditor
//!
//! Captures the ledger-wide balance sum before the concurrent phase and
//! compares it with the sum afterwards. Conservation of the total is the
//! acceptance criterion for the whole exercise: a surplus means money was
//! fabricated, a deficit means money was lost.

use crate::store::LedgerStore;
use crate::types::{Balance, StoreError};
use std::cmp::Ordering;
use std::fmt;

/// Result of the conservation check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuditVerdict {
    /// Final total equals the baseline
    Conserved {
        /// The unchanged total
        total: Balance,
    },

    /// Final total exceeds the baseline — money was fabricated
    Surplus {
        /// Total before the concurrent phase
        baseline: Balance,
        /// Total after the concurrent phase
        actual: Balance,
    },

    /// Final total is below the baseline — money was lost
    Deficit {
        /// Total before the concurrent phase
        baseline: Balance,
        /// Total after the concurrent phase
        actual: Balance,
    },
}

impl AuditVerdict {
    /// Whether the ledger total was conserved
    pub fn is_conserved(&self) -> bool {
        matches!(self, AuditVerdict::Conserved { .. })
    }
}

impl fmt::Display for AuditVerdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AuditVerdict::Conserved { total } => write!(f, "conserved (total {})", total),
            AuditVerdict::Surplus { baseline, actual } => {
                write!(f, "surplus: baseline {}, final {}", baseline, actual)
            }
            AuditVerdict::Deficit { baseline, actual } => {
                write!(f, "deficit: baseline {}, final {}", baseline, actual)
            }
        }
    }
}

/// Conservation auditor holding the pre-run baseline
#[derive(Debug, Clone, Copy)]
pub struct InvariantAuditor {
    baseline: Balance,
}

impl InvariantAuditor {
    /// Capture the baseline total in its own read scope
    ///
    /// # Errors
    ///
    /// Returns any store error from the aggregate read.
    pub fn baseline<S: LedgerStore>(store: &S) -> Result<Self, StoreError> {
        Ok(InvariantAuditor {
            baseline: store.sum_balances()?,
        })
    }

    /// The total captured before the concurrent phase
    pub fn baseline_total(&self) -> Balance {
        self.baseline
    }

    /// Compare the current total against the baseline
    pub fn conclude<S: LedgerStore>(&self, store: &S) -> Result<AuditVerdict, StoreError> {
        let actual = store.sum_balances()?;
        Ok(self.verdict(actual))
    }

    /// Classify a final total against the baseline
    pub fn verdict(&self, actual: Balance) -> AuditVerdict {
        match actual.cmp(&self.baseline) {
            Ordering::Equal => AuditVerdict::Conserved { total: actual },
            Ordering::Greater => AuditVerdict::Surplus {
                baseline: self.baseline,
                actual,
            },
            Ordering::Less => AuditVerdict::Deficit {
                baseline: self.baseline,
                actual,
            },
        }
    }
}
