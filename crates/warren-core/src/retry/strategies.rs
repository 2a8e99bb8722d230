//! Retry delay strategies and predicates

use crate::types::{RetryPolicy, RetryStrategy};
use rand::Rng;
use std::time::Duration;

/// Calculate the delay before the next retry attempt
///
/// # Arguments
///
/// * `policy` - The retry policy containing strategy and timing parameters
/// * `attempt` - The current attempt number (1-indexed)
/// * `jitter` - Whether to apply random jitter to the delay
///
/// # Example
///
/// ```rust
/// use warren_core::retry::calculate_delay;
/// use warren_core::types::{RetryPolicy, RetryStrategy};
///
/// let policy = RetryPolicy {
///     max_attempts: 3,
///     strategy: RetryStrategy::LinearBackoff,
///     backoff_multiplier: 2.0,
///     initial_delay_ms: 1000,
///     max_delay_ms: 30000,
/// };
///
/// let delay = calculate_delay(&policy, 1, false);
/// assert_eq!(delay.as_millis(), 1000);
///
/// let delay = calculate_delay(&policy, 2, false);
/// assert_eq!(delay.as_millis(), 2000);
/// ```
pub fn calculate_delay(policy: &RetryPolicy, attempt: u32, jitter: bool) -> Duration {
    // Attempt is 1-indexed, but we want 0-indexed for calculations
    let attempt_index = attempt.saturating_sub(1);

    let base_delay_ms = match policy.strategy {
        RetryStrategy::None => 0,

        RetryStrategy::FixedDelay => policy.initial_delay_ms,

        RetryStrategy::ExponentialBackoff => {
            let multiplier = policy.backoff_multiplier.powf(attempt_index as f64);
            (policy.initial_delay_ms as f64 * multiplier) as u64
        }

        RetryStrategy::LinearBackoff => policy.initial_delay_ms * (attempt_index as u64 + 1),
    };

    // Apply max delay cap
    let capped_delay_ms = base_delay_ms.min(policy.max_delay_ms);

    // Apply jitter if requested (adds up to 25% random variation)
    let final_delay_ms = if jitter && capped_delay_ms > 0 {
        let jitter_range = capped_delay_ms / 4;
        let jitter_value = rand::rng().random_range(0..=jitter_range);
        capped_delay_ms + jitter_value
    } else {
        capped_delay_ms
    };

    Duration::from_millis(final_delay_ms)
}

/// A predicate that determines whether an error should be retried
///
/// Implement this trait to customize which errors are retryable. By default,
/// all errors are considered retryable; the broker read path uses that
/// default because any non-zero CLI exit is treated identically.
pub trait RetryPredicate<E: ?Sized>: Send + Sync {
    /// Determine whether the given error should be retried
    fn should_retry(&self, error: &E) -> bool;
}

/// A predicate that always returns true (all errors are retryable)
#[derive(Debug, Clone, Copy, Default)]
pub struct AlwaysRetry;

impl<E: ?Sized> RetryPredicate<E> for AlwaysRetry {
    fn should_retry(&self, _error: &E) -> bool {
        true
    }
}

/// A predicate that never retries (no errors are retryable)
#[derive(Debug, Clone, Copy)]
pub struct NeverRetry;

impl<E: ?Sized> RetryPredicate<E> for NeverRetry {
    fn should_retry(&self, _error: &E) -> bool {
        false
    }
}

/// A predicate that uses a closure to determine retryability
pub struct ClosurePredicate<F> {
    predicate: F,
}

impl<F> ClosurePredicate<F> {
    /// Create a new closure-based predicate
    pub fn new(predicate: F) -> Self {
        Self { predicate }
    }
}

impl<E, F> RetryPredicate<E> for ClosurePredicate<F>
where
    F: Fn(&E) -> bool + Send + Sync,
{
    fn should_retry(&self, error: &E) -> bool {
        (self.predicate)(error)
    }
}
