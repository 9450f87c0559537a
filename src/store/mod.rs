//! Ledger store abstraction and implementations
//!
//! The engine never implements storage itself; it only requires that a store
//! expose atomic scopes with serializable isolation and surface a
//! distinguished conflict condition when two scopes cannot both proceed.
//! This module defines that seam and provides two implementations:
//!
//! - [`MemoryStore`] — fine-grained optimistic store with per-account
//!   versions and first-committer-wins validation (the primary target).
//! - [`SerializedStore`] — degraded mode that holds one process-wide lock
//!   for the whole scope, serializing all workers.
//!
//! A scope aborts when dropped without committing, so every exit path
//! (early return, fatal error, panic unwind) releases its resources.

use crate::types::{Account, AccountId, Balance, StoreError};

pub mod memory;
pub mod seed;
pub mod serialized;

pub use memory::MemoryStore;
pub use seed::seed;
pub use serialized::SerializedStore;

/// A transactional store of accounts keyed by id
///
/// Implementations must guarantee that committed scopes are linearizable
/// with respect to each other: no two concurrent commits may both observe
/// and act on stale balances for the same account.
pub trait LedgerStore: Send + Sync {
    /// The scope type handed out by [`LedgerStore::begin`]
    type Scope<'a>: LedgerScope
    where
        Self: 'a;

    /// Open an atomic scope
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Conflict`] if the scope cannot be opened
    /// because of a concurrent writer, or [`StoreError::Unavailable`] for
    /// any other store failure.
    fn begin(&self) -> Result<Self::Scope<'_>, StoreError>;

    /// Sum all balances in a single consistent read scope
    fn sum_balances(&self) -> Result<Balance, StoreError>;

    /// Consistent copy of every account, sorted by id
    ///
    /// Used for the final balance dump and for test assertions; never
    /// called while a transfer scope of the caller is open.
    fn snapshot_accounts(&self) -> Result<Vec<Account>, StoreError>;
}

/// One atomic unit of work against a [`LedgerStore`]
///
/// Dropping a scope without calling [`LedgerScope::commit`] aborts it and
/// leaves the store untouched.
pub trait LedgerScope {
    /// Read an account balance, or `None` if the account row is absent
    fn balance(&mut self, id: AccountId) -> Result<Option<Balance>, StoreError>;

    /// Stage a new balance for an account (creating it if absent)
    ///
    /// The write only becomes visible to other scopes after a successful
    /// [`LedgerScope::commit`].
    fn set_balance(&mut self, id: AccountId, balance: Balance) -> Result<(), StoreError>;

    /// Commit the scope, publishing all staged writes atomically
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Conflict`] if a concurrent writer invalidated
    /// this scope, or [`StoreError::Unavailable`] for any other failure.
    /// On error nothing is published.
    fn commit(self) -> Result<(), StoreError>;
}
