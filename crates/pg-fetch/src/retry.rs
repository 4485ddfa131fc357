//! Bounded retry with linear backoff.

use std::thread;
use std::time::Duration;

use pg_core::Record;

use crate::CatalogSource;
use crate::error::{FetchError, FetchResult};

/// How many times to try a fetch and how long to wait in between.
///
/// The wait before attempt `n + 1` is `delay * n`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    attempts: u32,
    delay: Duration,
}

impl RetryPolicy {
    /// A policy making `attempts` tries (at least one) with base `delay`.
    pub fn new(attempts: u32, delay: Duration) -> Self {
        Self {
            attempts: attempts.max(1),
            delay,
        }
    }

    /// Total attempts, including the first.
    pub fn attempts(&self) -> u32 {
        self.attempts
    }

    /// The pause after failed attempt number `attempt` (1-based).
    pub fn delay_after(&self, attempt: u32) -> Duration {
        self.delay.saturating_mul(attempt)
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new(3, Duration::from_secs(2))
    }
}

/// Fetch `id` from `source`, retrying transient failures per `policy`.
///
/// Non-transient failures are returned immediately. When every attempt
/// fails the result is [`FetchError::Exhausted`] wrapping the final error.
pub fn fetch_with_retry<S: CatalogSource + ?Sized>(
    source: &S,
    id: u32,
    policy: &RetryPolicy,
) -> FetchResult<Record> {
    let attempts = policy.attempts();
    let mut attempt = 1;
    loop {
        match source.fetch(id) {
            Ok(record) => {
                tracing::info!(id, attempt, name = %record.name, "fetched record");
                return Ok(record);
            }
            Err(e) if !e.is_transient() => {
                tracing::error!(id, attempt, "fetch failed permanently: {e}");
                return Err(e);
            }
            Err(e) if attempt >= attempts => {
                tracing::error!(id, attempt, "fetch failed, retry budget spent: {e}");
                return Err(FetchError::Exhausted {
                    id,
                    attempts,
                    last: Box::new(e),
                });
            }
            Err(e) => {
                let wait = policy.delay_after(attempt);
                tracing::warn!(
                    id,
                    attempt,
                    of = attempts,
                    ?wait,
                    "fetch failed, retrying: {e}"
                );
                thread::sleep(wait);
                attempt += 1;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use super::*;

    /// Fails with a 503 until `failures` attempts have been made.
    struct Flaky {
        failures: u32,
        calls: Cell<u32>,
    }

    impl Flaky {
        fn new(failures: u32) -> Self {
            Self {
                failures,
                calls: Cell::new(0),
            }
        }
    }

    impl CatalogSource for Flaky {
        fn fetch(&self, id: u32) -> FetchResult<Record> {
            let n = self.calls.get() + 1;
            self.calls.set(n);
            if n <= self.failures {
                Err(FetchError::Status { id, status: 503 })
            } else {
                Ok(Record::new(id, "Pikachu"))
            }
        }
    }

    struct Garbled;

    impl CatalogSource for Garbled {
        fn fetch(&self, id: u32) -> FetchResult<Record> {
            Err(FetchError::Decode {
                id,
                message: "expected value".into(),
            })
        }
    }

    fn instant(attempts: u32) -> RetryPolicy {
        RetryPolicy::new(attempts, Duration::ZERO)
    }

    #[test]
    fn first_try_success() {
        let source = Flaky::new(0);
        let record = fetch_with_retry(&source, 25, &instant(3)).unwrap();
        assert_eq!(record.id, 25);
        assert_eq!(source.calls.get(), 1);
    }

    #[test]
    fn recovers_within_budget() {
        let source = Flaky::new(2);
        assert!(fetch_with_retry(&source, 25, &instant(3)).is_ok());
        assert_eq!(source.calls.get(), 3);
    }

    #[test]
    fn exhausts_budget() {
        let source = Flaky::new(10);
        let err = fetch_with_retry(&source, 25, &instant(3)).unwrap_err();
        assert_eq!(source.calls.get(), 3);
        match err {
            FetchError::Exhausted { id, attempts, last } => {
                assert_eq!(id, 25);
                assert_eq!(attempts, 3);
                assert!(matches!(*last, FetchError::Status { status: 503, .. }));
            }
            other => panic!("expected Exhausted, got {other:?}"),
        }
    }

    #[test]
    fn decode_errors_are_not_retried() {
        let err = fetch_with_retry(&Garbled, 25, &instant(5)).unwrap_err();
        assert!(matches!(err, FetchError::Decode { .. }));
    }

    #[test]
    fn zero_attempts_means_one() {
        let policy = instant(0);
        assert_eq!(policy.attempts(), 1);
        let source = Flaky::new(1);
        assert!(fetch_with_retry(&source, 1, &policy).is_err());
        assert_eq!(source.calls.get(), 1);
    }

    #[test]
    fn linear_delay() {
        let policy = RetryPolicy::new(3, Duration::from_millis(500));
        assert_eq!(policy.delay_after(1), Duration::from_millis(500));
        assert_eq!(policy.delay_after(2), Duration::from_millis(1000));
    }
}
