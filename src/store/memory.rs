//! Fine-grained optimistic in-memory store
//!
//! Accounts live in a concurrent map as versioned slots. A scope records
//! the version (or absence) of every account it reads and stages its writes
//! locally; at commit time the whole read set is validated under a short
//! apply lock — first committer wins. A scope whose read set was
//! invalidated by a concurrent committer fails with
//! [`StoreError::Conflict`] and publishes nothing, which is exactly the
//! retryable condition the backoff policy absorbs.
//!
//! The apply lock only covers validation and publication of a commit; it is
//! not held while scopes read or compute, so workers proceed concurrently
//! and conflicts stay account-granular.

use crate::store::{LedgerScope, LedgerStore};
use crate::types::{Account, AccountId, Balance, StoreError};
use dashmap::DashMap;
use std::collections::HashMap;
use std::sync::Mutex;

/// One versioned account slot
#[derive(Debug, Clone, Copy)]
struct Slot {
    balance: Balance,
    version: u64,
}

/// Optimistic concurrent ledger store
///
/// Opening a scope never blocks or conflicts; contention surfaces at commit
/// time when the read set is validated.
pub struct MemoryStore {
    accounts: DashMap<AccountId, Slot>,
    /// Serializes commit validation + publication, and consistent reads
    /// of the whole map (sum, snapshot).
    apply_gate: Mutex<()>,
}

impl MemoryStore {
    /// Create an empty store
    pub fn new() -> Self {
        MemoryStore {
            accounts: DashMap::new(),
            apply_gate: Mutex::new(()),
        }
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl LedgerStore for MemoryStore {
    type Scope<'a> = MemoryScope<'a>;

    fn begin(&self) -> Result<MemoryScope<'_>, StoreError> {
        Ok(MemoryScope {
            store: self,
            reads: HashMap::new(),
            writes: HashMap::new(),
        })
    }

    fn sum_balances(&self) -> Result<Balance, StoreError> {
        let _gate = self
            .apply_gate
            .lock()
            .map_err(|_| StoreError::unavailable("apply gate poisoned"))?;
        Ok(self.accounts.iter().map(|entry| entry.balance).sum())
    }

    fn snapshot_accounts(&self) -> Result<Vec<Account>, StoreError> {
        let _gate = self
            .apply_gate
            .lock()
            .map_err(|_| StoreError::unavailable("apply gate poisoned"))?;
        let mut accounts: Vec<Account> = self
            .accounts
            .iter()
            .map(|entry| Account::new(*entry.key(), entry.balance))
            .collect();
        accounts.sort_by_key(|account| account.id);
        Ok(accounts)
    }
}

/// Scope over a [`MemoryStore`]
///
/// Tracks the first observed version of every account read (absence
/// counts as an observation) and stages writes locally. Reads see the
/// scope's own staged writes.
pub struct MemoryScope<'a> {
    store: &'a MemoryStore,
    /// First observed version per account; `None` means observed absent
    reads: HashMap<AccountId, Option<u64>>,
    /// Staged writes, published only on commit
    writes: HashMap<AccountId, Balance>,
}

impl LedgerScope for MemoryScope<'_> {
    fn balance(&mut self, id: AccountId) -> Result<Option<Balance>, StoreError> {
        if let Some(balance) = self.writes.get(&id) {
            return Ok(Some(*balance));
        }
        match self.store.accounts.get(&id) {
            Some(slot) => {
                self.reads.entry(id).or_insert(Some(slot.version));
                Ok(Some(slot.balance))
            }
            None => {
                self.reads.entry(id).or_insert(None);
                Ok(None)
            }
        }
    }

    fn set_balance(&mut self, id: AccountId, balance: Balance) -> Result<(), StoreError> {
        self.writes.insert(id, balance);
        Ok(())
    }

    fn commit(self) -> Result<(), StoreError> {
        let _gate = self
            .store
            .apply_gate
            .lock()
            .map_err(|_| StoreError::unavailable("apply gate poisoned"))?;

        // First-committer-wins: every account this scope observed must
        // still be at the observed version (or still absent).
        for (id, observed) in &self.reads {
            let current = self.store.accounts.get(id).map(|slot| slot.version);
            if current != *observed {
                return Err(StoreError::Conflict);
            }
        }

        for (id, balance) in &self.writes {
            self.store
                .accounts
                .entry(*id)
                .and_modify(|slot| {
                    slot.balance = *balance;
                    slot.version += 1;
                })
                .or_insert(Slot {
                    balance: *balance,
                    version: 1,
                });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seeded_store() -> MemoryStore {
        let store = MemoryStore::new();
        let mut scope = store.begin().unwrap();
        scope.set_balance(1, 100).unwrap();
        scope.set_balance(2, 200).unwrap();
        scope.commit().unwrap();
        store
    }

    #[test]
    fn committed_writes_become_visible() {
        let store = seeded_store();
        let mut scope = store.begin().unwrap();
        assert_eq!(scope.balance(1).unwrap(), Some(100));
        assert_eq!(scope.balance(2).unwrap(), Some(200));
        assert_eq!(scope.balance(3).unwrap(), None);
    }

    #[test]
    fn scope_reads_its_own_staged_writes() {
        let store = seeded_store();
        let mut scope = store.begin().unwrap();
        scope.set_balance(1, 50).unwrap();
        assert_eq!(scope.balance(1).unwrap(), Some(50));
        // Not yet published to other scopes
        let mut other = store.begin().unwrap();
        assert_eq!(other.balance(1).unwrap(), Some(100));
    }

    #[test]
    fn dropped_scope_publishes_nothing() {
        let store = seeded_store();
        {
            let mut scope = store.begin().unwrap();
            scope.set_balance(1, 0).unwrap();
            scope.set_balance(2, 0).unwrap();
            // dropped without commit
        }
        assert_eq!(store.sum_balances().unwrap(), 300);
    }

    #[test]
    fn losing_scope_conflicts_and_publishes_nothing() {
        let store = seeded_store();

        let mut loser = store.begin().unwrap();
        assert_eq!(loser.balance(1).unwrap(), Some(100));

        // A concurrent scope commits a write to the same account first.
        let mut winner = store.begin().unwrap();
        assert_eq!(winner.balance(1).unwrap(), Some(100));
        winner.set_balance(1, 150).unwrap();
        winner.commit().unwrap();

        loser.set_balance(1, 99).unwrap();
        assert_eq!(loser.commit(), Err(StoreError::Conflict));
        assert_eq!(store.begin().unwrap().balance(1).unwrap(), Some(150));
    }

    #[test]
    fn read_only_observation_is_validated_too() {
        // A scope that read account 2 but only wrote account 1 must still
        // lose if account 2 changed underneath it.
        let store = seeded_store();

        let mut loser = store.begin().unwrap();
        assert_eq!(loser.balance(1).unwrap(), Some(100));
        assert_eq!(loser.balance(2).unwrap(), Some(200));

        let mut winner = store.begin().unwrap();
        assert_eq!(winner.balance(2).unwrap(), Some(200));
        winner.set_balance(2, 0).unwrap();
        winner.commit().unwrap();

        loser.set_balance(1, 0).unwrap();
        assert_eq!(loser.commit(), Err(StoreError::Conflict));
    }

    #[test]
    fn observed_absence_is_validated() {
        let store = seeded_store();

        let mut loser = store.begin().unwrap();
        assert_eq!(loser.balance(7).unwrap(), None);

        let mut winner = store.begin().unwrap();
        winner.set_balance(7, 1).unwrap();
        winner.commit().unwrap();

        loser.set_balance(1, 0).unwrap();
        assert_eq!(loser.commit(), Err(StoreError::Conflict));
    }

    #[test]
    fn disjoint_scopes_both_commit() {
        let store = seeded_store();

        let mut first = store.begin().unwrap();
        assert_eq!(first.balance(1).unwrap(), Some(100));
        first.set_balance(1, 90).unwrap();

        let mut second = store.begin().unwrap();
        assert_eq!(second.balance(2).unwrap(), Some(200));
        second.set_balance(2, 210).unwrap();

        first.commit().unwrap();
        second.commit().unwrap();
        assert_eq!(store.sum_balances().unwrap(), 300);
    }
}
