//! Retry policy configuration

use serde::{Deserialize, Serialize};

/// Retry policy for read-path CLI calls
///
/// The broker's management interface can be transiently unready (e.g. just
/// after a node restart), so discovery reads get a small bounded retry
/// budget. Mutations are never covered by this policy.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct RetryPolicy {
    /// Maximum number of attempts (including the first)
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,

    /// Retry strategy
    #[serde(default)]
    pub strategy: RetryStrategy,

    /// Backoff multiplier for the exponential strategy
    #[serde(default = "default_backoff_multiplier")]
    pub backoff_multiplier: f64,

    /// Initial delay in milliseconds
    #[serde(default = "default_initial_delay")]
    pub initial_delay_ms: u64,

    /// Maximum delay in milliseconds
    #[serde(default = "default_max_delay")]
    pub max_delay_ms: u64,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: default_max_attempts(),
            strategy: RetryStrategy::default(),
            backoff_multiplier: default_backoff_multiplier(),
            initial_delay_ms: default_initial_delay(),
            max_delay_ms: default_max_delay(),
        }
    }
}

fn default_max_attempts() -> u32 {
    3
}
fn default_backoff_multiplier() -> f64 {
    2.0
}
fn default_initial_delay() -> u64 {
    1000
}
fn default_max_delay() -> u64 {
    30000
}

/// Retry strategy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum RetryStrategy {
    /// No delay between attempts
    None,

    /// Fixed delay between attempts
    FixedDelay,

    /// Exponential backoff
    ExponentialBackoff,

    /// Linear backoff (default)
    #[default]
    LinearBackoff,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let policy = RetryPolicy::default();
        assert_eq!(policy.max_attempts, 3);
        assert_eq!(policy.strategy, RetryStrategy::LinearBackoff);
        assert_eq!(policy.initial_delay_ms, 1000);
    }

    #[test]
    fn test_yaml_round_trip() {
        let yaml = "max-attempts: 5\nstrategy: exponential-backoff\n";
        let policy: RetryPolicy = serde_yaml_ng::from_str(yaml).unwrap();
        assert_eq!(policy.max_attempts, 5);
        assert_eq!(policy.strategy, RetryStrategy::ExponentialBackoff);
        // Unspecified fields fall back to defaults
        assert_eq!(policy.initial_delay_ms, 1000);
    }
}
