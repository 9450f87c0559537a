//! Conflict backoff policy
//!
//! Models the optimistic-concurrency loop: a conflicted attempt sleeps and
//! retries the same request, with the delay growing linearly per retry.
//! Retries are unbounded while the outcome stays `Conflict` — contention is
//! expected to clear as other writers commit, and the store's commit gate
//! guarantees some committer wins every round. Any other outcome is
//! terminal and returned together with the attempt counters.
//!
//! The delay schedule is a pure function of the retry ordinal so the
//! progression can be asserted without sleeping.

use crate::engine::executor;
use crate::store::LedgerStore;
use crate::types::{AttemptRecord, TransferOutcome, TransferRequest};
use std::thread;
use std::time::Duration;

/// Linear backoff configuration
///
/// The first retry waits `base_delay`; each further retry waits an
/// additional `retry_increment`. `pacing_delay` is the fixed pause a worker
/// takes between independent transfers to reduce contention pressure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BackoffPolicy {
    /// Delay before the first retry
    pub base_delay: Duration,

    /// Added to the delay after every conflicted attempt
    pub retry_increment: Duration,

    /// Pause between a worker's independent transfers
    pub pacing_delay: Duration,
}

impl Default for BackoffPolicy {
    fn default() -> Self {
        BackoffPolicy {
            base_delay: Duration::from_millis(10),
            retry_increment: Duration::from_millis(50),
            pacing_delay: Duration::from_millis(5),
        }
    }
}

impl BackoffPolicy {
    /// Create a policy from explicit delays
    pub fn new(base_delay: Duration, retry_increment: Duration, pacing_delay: Duration) -> Self {
        BackoffPolicy {
            base_delay,
            retry_increment,
            pacing_delay,
        }
    }

    /// Policy with zero delays, for tests and benchmarks
    pub fn immediate() -> Self {
        BackoffPolicy::new(Duration::ZERO, Duration::ZERO, Duration::ZERO)
    }

    /// Delay before retry number `retry` (0-based)
    pub fn delay_for(&self, retry: u32) -> Duration {
        self.base_delay + self.retry_increment * retry
    }
}

/// Run one transfer request to a terminal outcome
///
/// Calls the executor, sleeping and retrying for as long as the outcome is
/// `Conflict`. Returns the first non-conflict outcome together with the
/// attempt/retry counts for diagnostics.
pub fn execute_with_backoff<S: LedgerStore>(
    store: &S,
    request: &TransferRequest,
    policy: &BackoffPolicy,
) -> (TransferOutcome, AttemptRecord) {
    let mut record = AttemptRecord::default();
    loop {
        record.attempts += 1;
        let outcome = executor::attempt(store, request);
        if outcome != TransferOutcome::Conflict {
            return (outcome, record);
        }
        tracing::debug!(
            origin = request.origin,
            destination = request.destination,
            retry = record.retries,
            "transfer conflicted, backing off"
        );
        thread::sleep(policy.delay_for(record.retries));
        record.retries += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::memory::MemoryScope;
    use crate::store::{seed, LedgerStore, MemoryStore};
    use crate::types::{Account, Balance, StoreError};
    use rstest::rstest;
    use std::sync::atomic::{AtomicU32, Ordering};

    /// Store that refuses the first `remaining` scope opens with a
    /// conflict, then behaves like the wrapped memory store.
    struct ConflictingStore {
        inner: MemoryStore,
        remaining: AtomicU32,
    }

    impl ConflictingStore {
        fn new(conflicts: u32) -> Self {
            let inner = MemoryStore::new();
            seed(&inner, 4, 100).unwrap();
            ConflictingStore {
                inner,
                remaining: AtomicU32::new(conflicts),
            }
        }
    }

    impl LedgerStore for ConflictingStore {
        type Scope<'a> = MemoryScope<'a>;

        fn begin(&self) -> Result<MemoryScope<'_>, StoreError> {
            let refused = self
                .remaining
                .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |left| {
                    left.checked_sub(1)
                })
                .is_ok();
            if refused {
                return Err(StoreError::Conflict);
            }
            self.inner.begin()
        }

        fn sum_balances(&self) -> Result<Balance, StoreError> {
            self.inner.sum_balances()
        }

        fn snapshot_accounts(&self) -> Result<Vec<Account>, StoreError> {
            self.inner.snapshot_accounts()
        }
    }

    #[rstest]
    #[case::no_conflicts(0)]
    #[case::one_conflict(1)]
    #[case::several_conflicts(5)]
    fn retries_exactly_until_store_yields(#[case] conflicts: u32) {
        let store = ConflictingStore::new(conflicts);
        let policy = BackoffPolicy::immediate();

        let (outcome, record) =
            execute_with_backoff(&store, &TransferRequest::new(1, 2, 10), &policy);

        assert_eq!(outcome, TransferOutcome::Committed);
        assert_eq!(record.attempts, conflicts + 1);
        assert_eq!(record.retries, conflicts);
        assert_eq!(store.sum_balances().unwrap(), 400);
    }

    #[test]
    fn terminal_outcome_passes_through_after_conflicts() {
        let store = ConflictingStore::new(3);
        let policy = BackoffPolicy::immediate();

        // Origin cannot cover the amount once the store finally yields.
        let (outcome, record) =
            execute_with_backoff(&store, &TransferRequest::new(1, 2, 500), &policy);

        assert_eq!(
            outcome,
            TransferOutcome::InsufficientFunds {
                available: 100,
                requested: 500,
            }
        );
        assert_eq!(record.attempts, 4);
    }

    #[test]
    fn delay_progression_is_linear_and_non_decreasing() {
        let policy = BackoffPolicy::new(
            Duration::from_millis(10),
            Duration::from_millis(50),
            Duration::from_millis(5),
        );

        assert_eq!(policy.delay_for(0), Duration::from_millis(10));
        assert_eq!(policy.delay_for(1), Duration::from_millis(60));
        assert_eq!(policy.delay_for(2), Duration::from_millis(110));

        let mut previous = Duration::ZERO;
        for retry in 0..32 {
            let delay = policy.delay_for(retry);
            assert!(delay >= previous);
            previous = delay;
        }
    }

    #[test]
    fn default_policy_matches_documented_constants() {
        let policy = BackoffPolicy::default();
        assert_eq!(policy.base_delay, Duration::from_millis(10));
        assert_eq!(policy.retry_increment, Duration::from_millis(50));
        assert_eq!(policy.pacing_delay, Duration::from_millis(5));
    }
}
