//! Transaction executor
//!
//! Performs exactly one transfer attempt and maps every failure mode onto a
//! [`TransferOutcome`]. The protocol for a single attempt:
//!
//! 1. Validate the request shape; a malformed request never touches the
//!    store.
//! 2. Open an atomic scope.
//! 3. Read the origin balance; an absent row is fatal (`NotFound`) because
//!    it means the seed does not match what the engine assumes.
//! 4. Reject the transfer if the origin cannot cover the amount — a
//!    business outcome, not an error.
//! 5. Read the destination balance (same absence check).
//! 6. Stage both new balances and commit.
//!
//! Both reads and both writes happen inside the same scope so the account
//! pair is observed and mutated as one atomic unit; splitting them would
//! reintroduce a lost-update race. Every early return drops the scope,
//! which aborts it.

use crate::store::{LedgerScope, LedgerStore};
use crate::types::{StoreError, TransferOutcome, TransferRequest};

/// Perform one transfer attempt
///
/// Returns a [`TransferOutcome`]; never panics and never retries —
/// retrying on `Conflict` is the backoff policy's job.
pub fn attempt<S: LedgerStore>(store: &S, request: &TransferRequest) -> TransferOutcome {
    if let Err(reason) = request.validate() {
        return TransferOutcome::Invalid { reason };
    }

    let mut scope = match store.begin() {
        Ok(scope) => scope,
        Err(error) => return store_failure(error),
    };

    let origin_balance = match scope.balance(request.origin) {
        Ok(Some(balance)) => balance,
        Ok(None) => {
            return TransferOutcome::NotFound {
                account: request.origin,
            }
        }
        Err(error) => return store_failure(error),
    };

    if origin_balance < request.amount {
        return TransferOutcome::InsufficientFunds {
            available: origin_balance,
            requested: request.amount,
        };
    }

    let destination_balance = match scope.balance(request.destination) {
        Ok(Some(balance)) => balance,
        Ok(None) => {
            return TransferOutcome::NotFound {
                account: request.destination,
            }
        }
        Err(error) => return store_failure(error),
    };

    // Cannot underflow: checked against the amount above.
    let new_origin = origin_balance - request.amount;
    let new_destination = match destination_balance.checked_add(request.amount) {
        Some(balance) => balance,
        // Unreachable with a conserved total within u64; treat as a
        // corrupted-balance store failure rather than a business outcome.
        None => {
            return TransferOutcome::StoreUnavailable {
                message: format!("balance overflow on account {}", request.destination),
            }
        }
    };

    if let Err(error) = scope.set_balance(request.origin, new_origin) {
        return store_failure(error);
    }
    if let Err(error) = scope.set_balance(request.destination, new_destination) {
        return store_failure(error);
    }

    match scope.commit() {
        Ok(()) => TransferOutcome::Committed,
        Err(error) => store_failure(error),
    }
}

/// Map a store error onto the matching transfer outcome
fn store_failure(error: StoreError) -> TransferOutcome {
    match error {
        StoreError::Conflict => TransferOutcome::Conflict,
        StoreError::Unavailable { message } => TransferOutcome::StoreUnavailable { message },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{seed, MemoryStore};
    use crate::types::InvalidRequest;
    use rstest::rstest;

    fn seeded_store() -> MemoryStore {
        let store = MemoryStore::new();
        seed(&store, 4, 100).unwrap();
        store
    }

    fn balance_of(store: &MemoryStore, id: u64) -> Option<u64> {
        let mut scope = store.begin().unwrap();
        scope.balance(id).unwrap()
    }

    #[test]
    fn committed_transfer_moves_funds() {
        let store = seeded_store();
        let outcome = attempt(&store, &TransferRequest::new(1, 2, 30));
        assert_eq!(outcome, TransferOutcome::Committed);
        assert_eq!(balance_of(&store, 1), Some(70));
        assert_eq!(balance_of(&store, 2), Some(130));
        assert_eq!(store.sum_balances().unwrap(), 400);
    }

    #[rstest]
    #[case::same_account(
        TransferRequest::new(2, 2, 10),
        InvalidRequest::SameAccount { account: 2 }
    )]
    #[case::zero_amount(TransferRequest::new(1, 2, 0), InvalidRequest::NonPositiveAmount)]
    fn invalid_request_rejected_without_store_access(
        #[case] request: TransferRequest,
        #[case] reason: InvalidRequest,
    ) {
        let store = seeded_store();
        let outcome = attempt(&store, &request);
        assert_eq!(outcome, TransferOutcome::Invalid { reason });
        // No mutation happened
        assert_eq!(store.sum_balances().unwrap(), 400);
        assert_eq!(balance_of(&store, 1), Some(100));
        assert_eq!(balance_of(&store, 2), Some(100));
    }

    #[test]
    fn insufficient_funds_leaves_balances_untouched() {
        let store = seeded_store();
        let outcome = attempt(&store, &TransferRequest::new(1, 2, 101));
        assert_eq!(
            outcome,
            TransferOutcome::InsufficientFunds {
                available: 100,
                requested: 101,
            }
        );
        assert_eq!(balance_of(&store, 1), Some(100));
        assert_eq!(balance_of(&store, 2), Some(100));
    }

    #[rstest]
    #[case::missing_origin(TransferRequest::new(9, 2, 10), 9)]
    #[case::missing_destination(TransferRequest::new(1, 9, 10), 9)]
    fn absent_account_is_fatal(#[case] request: TransferRequest, #[case] missing: u64) {
        let store = seeded_store();
        let outcome = attempt(&store, &request);
        assert_eq!(outcome, TransferOutcome::NotFound { account: missing });
        assert_eq!(store.sum_balances().unwrap(), 400);
    }

    #[test]
    fn destination_overflow_is_store_failure() {
        let store = MemoryStore::new();
        let mut scope = store.begin().unwrap();
        scope.set_balance(1, 10).unwrap();
        scope.set_balance(2, u64::MAX).unwrap();
        scope.commit().unwrap();

        let outcome = attempt(&store, &TransferRequest::new(1, 2, 10));
        assert!(matches!(outcome, TransferOutcome::StoreUnavailable { .. }));
        assert_eq!(balance_of(&store, 1), Some(10));
        assert_eq!(balance_of(&store, 2), Some(u64::MAX));
    }

    #[test]
    fn drains_origin_exactly_to_zero() {
        let store = seeded_store();
        let outcome = attempt(&store, &TransferRequest::new(3, 4, 100));
        assert_eq!(outcome, TransferOutcome::Committed);
        assert_eq!(balance_of(&store, 3), Some(0));
        assert_eq!(balance_of(&store, 4), Some(200));
    }
}
