//! Retry execution engine with policy-based configuration
//!
//! This module provides a reusable, policy-based retry execution engine for
//! the read-path broker CLI calls. Mutation calls never route through it;
//! that asymmetry lives in the callers, not here.
//!
//! # Features
//!
//! - Multiple retry strategies: None, Fixed, Exponential, Linear backoff
//! - Configurable jitter for backoff delays
//! - Retry predicates for short-circuiting non-recoverable errors
//!
//! # Example
//!
//! ```rust,no_run
//! use warren_core::retry::{retry_with_policy, RetryError};
//! use warren_core::types::RetryPolicy;
//!
//! async fn example() -> Result<String, RetryError<std::io::Error>> {
//!     let policy = RetryPolicy::default();
//!
//!     retry_with_policy(&policy, || async {
//!         // Your fallible operation here
//!         Ok("success".to_string())
//!     }).await
//! }
//! ```

mod error;
mod executor;
mod strategies;

pub use error::RetryError;
pub use executor::{retry_with_policy, retry_with_predicate};
pub use strategies::{calculate_delay, AlwaysRetry, ClosurePredicate, NeverRetry, RetryPredicate};
