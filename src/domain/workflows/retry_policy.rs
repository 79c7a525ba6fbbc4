use std::fmt;
use std::future::Future;
use std::time::Duration;
use tracing::warn;

/// Bounded retry with a fixed pause between attempts (no backoff, no jitter).
///
/// `retry_if` decides which failures are worth another attempt; anything it
/// rejects ends the run immediately.
pub struct RetryPolicy<E> {
    pub max_attempts: u32,
    pub delay: Duration,
    pub retry_if: fn(&E) -> bool,
}

impl<E> Clone for RetryPolicy<E> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<E> Copy for RetryPolicy<E> {}

impl<E> fmt::Debug for RetryPolicy<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RetryPolicy")
            .field("max_attempts", &self.max_attempts)
            .field("delay", &self.delay)
            .finish_non_exhaustive()
    }
}

/// The error that ended a retry run and how many attempts were spent.
#[derive(Debug, PartialEq, Eq)]
pub struct RetryFailure<E> {
    pub attempts: u32,
    pub error: E,
}

impl<E> RetryPolicy<E> {
    /// Build a policy. At least one attempt is always made.
    pub fn new(max_attempts: u32, delay: Duration, retry_if: fn(&E) -> bool) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            delay,
            retry_if,
        }
    }

    /// Returns `true` when `error`, raised by attempt number `attempt`
    /// (starting at 1), allows another attempt.
    pub fn can_retry(&self, attempt: u32, error: &E) -> bool {
        attempt < self.max_attempts && (self.retry_if)(error)
    }

    /// Run `op` until it succeeds, raises a non-retryable error, or the
    /// attempt budget is spent. `op` receives the 1-based attempt number.
    pub async fn run<T, F, Fut>(&self, mut op: F) -> Result<T, RetryFailure<E>>
    where
        F: FnMut(u32) -> Fut,
        Fut: Future<Output = Result<T, E>>,
        E: fmt::Display,
    {
        let mut attempt = 1;
        loop {
            match op(attempt).await {
                Ok(value) => return Ok(value),
                Err(error) if self.can_retry(attempt, &error) => {
                    warn!(
                        attempt,
                        max_attempts = self.max_attempts,
                        delay_ms = self.delay.as_millis() as u64,
                        error = %error,
                        "attempt_failed_retrying"
                    );
                    tokio::time::sleep(self.delay).await;
                    attempt += 1;
                }
                Err(error) => {
                    return Err(RetryFailure {
                        attempts: attempt,
                        error,
                    });
                }
            }
        }
    }
}
