//! Transfer types for the ledger transfer engine
//!
//! This module defines the request/outcome pair that flows through the
//! transaction executor, the validation errors rejected before the store is
//! touched, and the per-request attempt bookkeeping used for diagnostics.

use super::account::{AccountId, Balance};
use std::fmt;
use thiserror::Error;

/// A request to move funds between two accounts
///
/// A request is only well-formed when `origin != destination` and
/// `amount > 0`; [`TransferRequest::validate`] enforces both before any
/// store scope is opened.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransferRequest {
    /// Account the funds are taken from
    pub origin: AccountId,

    /// Account the funds are credited to (must differ from origin)
    pub destination: AccountId,

    /// Amount to move (must be positive)
    pub amount: Balance,
}

impl TransferRequest {
    /// Create a new transfer request
    pub fn new(origin: AccountId, destination: AccountId, amount: Balance) -> Self {
        TransferRequest {
            origin,
            destination,
            amount,
        }
    }

    /// Validate the request shape
    ///
    /// # Errors
    ///
    /// Returns an error if origin and destination are the same account or
    /// the amount is not positive. Validation never touches the store.
    pub fn validate(&self) -> Result<(), InvalidRequest> {
        if self.origin == self.destination {
            return Err(InvalidRequest::SameAccount {
                account: self.origin,
            });
        }
        if self.amount == 0 {
            return Err(InvalidRequest::NonPositiveAmount);
        }
        Ok(())
    }
}

/// Validation error for a malformed transfer request
///
/// These are caller errors, rejected before any store scope is opened.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum InvalidRequest {
    /// Origin and destination are the same account
    #[error("origin and destination are both account {account}")]
    SameAccount {
        /// The duplicated account id
        account: AccountId,
    },

    /// Amount is zero (amounts are unsigned, so negative cannot occur)
    #[error("transfer amount must be positive")]
    NonPositiveAmount,
}

/// Outcome of a single transfer attempt
///
/// `Conflict` is the only retryable outcome; the backoff policy absorbs it.
/// `InsufficientFunds` is an expected business outcome. `NotFound`,
/// `Invalid`, and `StoreUnavailable` are fatal to the issuing worker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransferOutcome {
    /// Both balances were updated and the scope committed
    Committed,

    /// The origin balance could not cover the amount; nothing was written
    InsufficientFunds {
        /// Origin balance observed inside the scope
        available: Balance,
        /// Amount the request asked for
        requested: Balance,
    },

    /// The scope lost to a concurrent writer; retry after backoff
    Conflict,

    /// An account row was absent — seed data does not match expectations
    NotFound {
        /// The missing account id
        account: AccountId,
    },

    /// The request was malformed; the store was never touched
    Invalid {
        /// Why validation rejected the request
        reason: InvalidRequest,
    },

    /// The store failed for a reason other than contention
    StoreUnavailable {
        /// Description of the underlying failure
        message: String,
    },
}

impl TransferOutcome {
    /// Whether this outcome aborts the issuing worker
    ///
    /// `Conflict` is retried and `InsufficientFunds` is merely counted;
    /// everything else except `Committed` stops the worker.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            TransferOutcome::NotFound { .. }
                | TransferOutcome::Invalid { .. }
                | TransferOutcome::StoreUnavailable { .. }
        )
    }
}

impl fmt::Display for TransferOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransferOutcome::Committed => write!(f, "committed"),
            TransferOutcome::InsufficientFunds {
                available,
                requested,
            } => write!(
                f,
                "insufficient funds: available {}, requested {}",
                available, requested
            ),
            TransferOutcome::Conflict => write!(f, "conflict"),
            TransferOutcome::NotFound { account } => {
                write!(f, "account {} not found", account)
            }
            TransferOutcome::Invalid { reason } => write!(f, "invalid request: {}", reason),
            TransferOutcome::StoreUnavailable { message } => {
                write!(f, "store unavailable: {}", message)
            }
        }
    }
}

/// Attempt bookkeeping for one transfer request
///
/// Purely diagnostic: the counters feed the per-worker report and never
/// influence control flow beyond what the outcome already decides.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AttemptRecord {
    /// Total executor attempts, including the final terminal one
    pub attempts: u32,

    /// Conflicted attempts that were retried (attempts - 1 on success)
    pub retries: u32,
}
