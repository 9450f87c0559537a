//! Globally serialized store (degraded mode)
//!
//! Wraps the whole account map in a single process-wide lock that is held
//! for the duration of every scope. This serializes all workers and defeats
//! fine-grained conflict detection — scopes never conflict because only one
//! can exist at a time. It exists to test the degraded variant observed in
//! the original exercise, not as the primary target; selecting it keeps the
//! executor semantics identical while driving retries to zero.

use crate::store::{LedgerScope, LedgerStore};
use crate::types::{Account, AccountId, Balance, StoreError};
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

/// Ledger store serialized by one process-wide lock
pub struct SerializedStore {
    accounts: Mutex<HashMap<AccountId, Balance>>,
}

impl SerializedStore {
    /// Create an empty store
    pub fn new() -> Self {
        SerializedStore {
            accounts: Mutex::new(HashMap::new()),
        }
    }

    fn lock(&self) -> Result<MutexGuard<'_, HashMap<AccountId, Balance>>, StoreError> {
        self.accounts
            .lock()
            .map_err(|_| StoreError::unavailable("account lock poisoned"))
    }
}

impl Default for SerializedStore {
    fn default() -> Self {
        Self::new()
    }
}

impl LedgerStore for SerializedStore {
    type Scope<'a> = SerializedScope<'a>;

    /// Open a scope, blocking until the process-wide lock is free
    fn begin(&self) -> Result<SerializedScope<'_>, StoreError> {
        Ok(SerializedScope {
            guard: self.lock()?,
            writes: HashMap::new(),
        })
    }

    fn sum_balances(&self) -> Result<Balance, StoreError> {
        Ok(self.lock()?.values().sum())
    }

    fn snapshot_accounts(&self) -> Result<Vec<Account>, StoreError> {
        let mut accounts: Vec<Account> = self
            .lock()?
            .iter()
            .map(|(id, balance)| Account::new(*id, *balance))
            .collect();
        accounts.sort_by_key(|account| account.id);
        Ok(accounts)
    }
}

/// Scope holding the store-wide lock until commit or drop
///
/// Writes are staged locally and only applied on commit, so an aborted
/// scope leaves the map untouched even though it held the lock.
pub struct SerializedScope<'a> {
    guard: MutexGuard<'a, HashMap<AccountId, Balance>>,
    writes: HashMap<AccountId, Balance>,
}

impl LedgerScope for SerializedScope<'_> {
    fn balance(&mut self, id: AccountId) -> Result<Option<Balance>, StoreError> {
        if let Some(balance) = self.writes.get(&id) {
            return Ok(Some(*balance));
        }
        Ok(self.guard.get(&id).copied())
    }

    fn set_balance(&mut self, id: AccountId, balance: Balance) -> Result<(), StoreError> {
        self.writes.insert(id, balance);
        Ok(())
    }

    fn commit(mut self) -> Result<(), StoreError> {
        for (id, balance) in self.writes.drain() {
            self.guard.insert(id, balance);
        }
        Ok(())
    }
}
