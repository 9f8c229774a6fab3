//! The seam between the invoker and a concrete backoff policy.

use crate::error::StatusError;
use std::time::Duration;

/// A strategy deciding which failures are retried and how long to wait.
///
/// The [`Invoker`](super::Invoker) owns the loop; implementations only
/// answer questions about a single failed attempt. Attempt numbers are
/// 0-indexed: attempt 0 is the initial call, so `next_delay(err, 0)` is the
/// wait before the first retry.
///
/// # Examples
///
/// ```rust
/// use rota_core::error::{ApiError, StatusError};
/// use rota_core::retry::BackoffStrategy;
/// use std::time::Duration;
///
/// /// Retries only 503s, once, after a fixed second.
/// struct UnavailableOnce;
///
/// impl BackoffStrategy for UnavailableOnce {
///     fn should_retry(&self, error: &dyn StatusError, _attempt: u32) -> bool {
///         error.status() == Some(503)
///     }
///
///     fn next_delay(&self, _error: &dyn StatusError, _attempt: u32) -> Option<Duration> {
///         Some(Duration::from_secs(1))
///     }
///
///     fn max_retries(&self) -> u32 {
///         1
///     }
/// }
///
/// let strategy = UnavailableOnce;
/// assert!(strategy.should_retry(&ApiError::new(503, "down"), 0));
/// assert!(!strategy.should_retry(&ApiError::new(404, "missing"), 0));
/// ```
pub trait BackoffStrategy: Send + Sync {
    /// Determine if a failed attempt may be retried.
    ///
    /// Called before the retry budget is checked, so a `false` here always
    /// means the error is propagated as-is.
    fn should_retry(&self, error: &dyn StatusError, attempt: u32) -> bool;

    /// Calculate the delay before the next attempt.
    ///
    /// # Returns
    /// - `Some(Duration)`: Wait this long before retrying
    /// - `None`: Give up and propagate the error
    fn next_delay(&self, error: &dyn StatusError, attempt: u32) -> Option<Duration>;

    /// Maximum number of retries after the initial attempt.
    ///
    /// `max_retries() == 3` allows up to 4 invocations in total.
    fn max_retries(&self) -> u32;
}
