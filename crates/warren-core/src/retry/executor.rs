//! Retry execution logic

use std::future::Future;
use std::time::Instant;

use tracing::{debug, warn};

use crate::types::RetryPolicy;

use super::error::RetryError;
use super::strategies::{calculate_delay, AlwaysRetry, RetryPredicate};

/// Execute an async operation with retry logic based on a policy
///
/// Every error is considered retryable; use [`retry_with_predicate`] to
/// short-circuit known non-recoverable errors.
///
/// # Arguments
///
/// * `policy` - The retry policy to use
/// * `op` - A closure that returns a future representing the operation
///
/// # Returns
///
/// The result of the operation, or a `RetryError` if all attempts fail.
pub async fn retry_with_policy<F, Fut, T, E>(
    policy: &RetryPolicy,
    op: F,
) -> Result<T, RetryError<E>>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: std::fmt::Display + Send + 'static,
{
    retry_with_predicate(policy, AlwaysRetry, op).await
}

/// Execute an async operation with retry logic and a retryability predicate
///
/// # Arguments
///
/// * `policy` - The retry policy to use
/// * `predicate` - Decides whether a given error is worth another attempt
/// * `op` - A closure that returns a future representing the operation
pub async fn retry_with_predicate<P, F, Fut, T, E>(
    policy: &RetryPolicy,
    predicate: P,
    mut op: F,
) -> Result<T, RetryError<E>>
where
    P: RetryPredicate<E>,
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: std::fmt::Display + Send + 'static,
{
    let start = Instant::now();
    // A zero-attempt policy would never run the operation; clamp to one.
    let max_attempts = policy.max_attempts.max(1);

    let mut attempt = 1;
    loop {
        debug!("attempt {}/{}", attempt, max_attempts);

        match op().await {
            Ok(result) => {
                if attempt > 1 {
                    debug!("succeeded on attempt {}", attempt);
                }
                return Ok(result);
            }
            Err(err) => {
                if !predicate.should_retry(&err) {
                    return Err(RetryError::non_retryable(err));
                }

                if attempt >= max_attempts {
                    warn!("giving up after {} attempts: {}", attempt, err);
                    return Err(RetryError::exhausted(attempt, err, start.elapsed()));
                }

                let delay = calculate_delay(policy, attempt, true);
                warn!(
                    "attempt {}/{} failed: {} (retrying in {}ms)",
                    attempt,
                    max_attempts,
                    err,
                    delay.as_millis()
                );

                if !delay.is_zero() {
                    tokio::time::sleep(delay).await;
                }
            }
        }

        attempt += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::retry::strategies::ClosurePredicate;
    use crate::types::RetryStrategy;
    use std::io;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::sync::Arc;

    fn test_policy() -> RetryPolicy {
        RetryPolicy {
            max_attempts: 3,
            strategy: RetryStrategy::FixedDelay,
            backoff_multiplier: 2.0,
            initial_delay_ms: 1, // Short delays for tests
            max_delay_ms: 10,
        }
    }

    #[tokio::test]
    async fn test_immediate_success() {
        let result: Result<&str, RetryError<io::Error>> =
            retry_with_policy(&test_policy(), || async { Ok("success") }).await;

        assert!(result.is_ok());
        assert_eq!(result.unwrap(), "success");
    }

    #[tokio::test]
    async fn test_success_after_two_failures() {
        let attempts = Arc::new(AtomicU32::new(0));
        let attempts_clone = attempts.clone();

        let result = retry_with_policy(&test_policy(), || {
            let attempts = attempts_clone.clone();
            async move {
                let attempt = attempts.fetch_add(1, Ordering::SeqCst) + 1;
                if attempt < 3 {
                    Err(io::Error::new(io::ErrorKind::TimedOut, "timeout"))
                } else {
                    Ok("success")
                }
            }
        })
        .await;

        assert!(result.is_ok());
        assert_eq!(result.unwrap(), "success");
        assert_eq!(attempts.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_all_attempts_exhausted() {
        let attempts = Arc::new(AtomicU32::new(0));
        let attempts_clone = attempts.clone();

        let result: Result<&str, RetryError<io::Error>> =
            retry_with_policy(&test_policy(), || {
                let attempts = attempts_clone.clone();
                async move {
                    attempts.fetch_add(1, Ordering::SeqCst);
                    Err(io::Error::new(io::ErrorKind::TimedOut, "always fails"))
                }
            })
            .await;

        let err = result.unwrap_err();
        assert!(err.is_exhausted());
        assert_eq!(err.attempts(), 3);
        assert_eq!(attempts.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_non_retryable_stops_immediately() {
        let attempts = Arc::new(AtomicU32::new(0));
        let attempts_clone = attempts.clone();

        let predicate = ClosurePredicate::new(|err: &io::Error| {
            // Don't retry NotFound errors
            err.kind() != io::ErrorKind::NotFound
        });

        let result: Result<&str, RetryError<io::Error>> =
            retry_with_predicate(&test_policy(), predicate, || {
                let attempts = attempts_clone.clone();
                async move {
                    attempts.fetch_add(1, Ordering::SeqCst);
                    Err(io::Error::new(io::ErrorKind::NotFound, "not found"))
                }
            })
            .await;

        let err = result.unwrap_err();
        assert!(err.is_non_retryable());
        assert_eq!(attempts.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_zero_max_attempts_runs_once() {
        let policy = RetryPolicy {
            max_attempts: 0,
            ..test_policy()
        };
        let attempts = Arc::new(AtomicU32::new(0));
        let attempts_clone = attempts.clone();

        let result: Result<&str, RetryError<io::Error>> = retry_with_policy(&policy, || {
            let attempts = attempts_clone.clone();
            async move {
                attempts.fetch_add(1, Ordering::SeqCst);
                Err(io::Error::other("error"))
            }
        })
        .await;

        assert!(result.is_err());
        assert_eq!(attempts.load(Ordering::SeqCst), 1);
    }
}
