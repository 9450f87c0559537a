//! Account types for the ledger transfer engine

use serde::Serialize;

/// Account identifier
///
/// Accounts are seeded with ids `1..=account_count`; id 0 is never used.
pub type AccountId = u64;

/// Account balance in indivisible units
///
/// Balances are unsigned by construction: a committed transfer can never
/// drive a balance negative because the executor rejects transfers that
/// exceed the origin's balance before writing anything.
pub type Balance = u64;

/// A single ledger account
///
/// Accounts are created once by the seeder and never created or deleted
/// afterwards; only the balance mutates, and only inside a store scope.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Account {
    /// Unique account id (positive)
    pub id: AccountId,

    /// Current balance
    pub balance: Balance,
}

impl Account {
    /// Create an account with the given id and balance
    pub fn new(id: AccountId, balance: Balance) -> Self {
        Account { id, balance }
    }
}
