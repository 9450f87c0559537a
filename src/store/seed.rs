//! Account seeding
//!
//! Populates the ledger before the concurrent phase begins: one atomic
//! scope, `account_count` inserts, one commit. A failure on any insert
//! drops the scope, rolling the whole seed back.

use crate::store::{LedgerScope, LedgerStore};
use crate::types::{Balance, StoreError};

/// Create accounts `1..=account_count`, each with `initial_balance`
///
/// # Errors
///
/// Returns the first store error encountered; the scope is aborted and no
/// partial seed is published.
pub fn seed<S: LedgerStore>(
    store: &S,
    account_count: u64,
    initial_balance: Balance,
) -> Result<(), StoreError> {
    let mut scope = store.begin()?;
    for id in 1..=account_count {
        scope.set_balance(id, initial_balance)?;
    }
    scope.commit()
}
