//! Fixed-schedule retry policy for platform calls.

use super::strategy::BackoffStrategy;
use crate::error::StatusError;
use std::time::Duration;

/// Retries allowed after the initial attempt.
pub const DEFAULT_MAX_RETRIES: u32 = 3;

/// Backoff before retry 1, 2 and 3. Later attempts reuse the last entry.
pub const DEFAULT_SCHEDULE: [Duration; 3] = [
    Duration::from_secs(3),
    Duration::from_secs(9),
    Duration::from_secs(27),
];

/// Status codes treated as transient.
pub const RETRYABLE_STATUSES: [u16; 4] = [429, 502, 503, 504];

/// Upper bound applied to a server-supplied `retry-after` value.
pub const DEFAULT_MAX_RETRY_AFTER: Duration = Duration::from_secs(120);

const TOO_MANY_REQUESTS: u16 = 429;

/// Retry policy with a fixed, attempt-indexed backoff schedule.
///
/// A 429 response carrying `retry-after` waits for the server-supplied
/// number of seconds instead of the scheduled delay. That value is clamped
/// to `[0, max_retry_after]`; everything else follows the schedule.
///
/// # Examples
///
/// ```rust
/// use rota_core::error::ApiError;
/// use rota_core::retry::{BackoffStrategy, RetryPolicy};
/// use std::time::Duration;
///
/// let policy = RetryPolicy::default();
/// let unavailable = ApiError::new(503, "unavailable");
///
/// assert_eq!(policy.next_delay(&unavailable, 0), Some(Duration::from_secs(3)));
/// assert_eq!(policy.next_delay(&unavailable, 1), Some(Duration::from_secs(9)));
/// assert_eq!(policy.next_delay(&unavailable, 2), Some(Duration::from_secs(27)));
///
/// let limited = ApiError::new(429, "slow down").with_retry_after(5);
/// assert_eq!(policy.next_delay(&limited, 2), Some(Duration::from_secs(5)));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryPolicy {
    max_retries: u32,
    schedule: Vec<Duration>,
    retryable_statuses: Vec<u16>,
    max_retry_after: Duration,
}

impl Default for RetryPolicy {
    /// The platform policy: 3 retries after 3 s, 9 s and 27 s on
    /// 429/502/503/504, `retry-after` capped at 120 s.
    fn default() -> Self {
        Self {
            max_retries: DEFAULT_MAX_RETRIES,
            schedule: DEFAULT_SCHEDULE.to_vec(),
            retryable_statuses: RETRYABLE_STATUSES.to_vec(),
            max_retry_after: DEFAULT_MAX_RETRY_AFTER,
        }
    }
}

impl RetryPolicy {
    /// Create a new builder starting from the platform defaults.
    pub fn builder() -> RetryPolicyBuilder {
        RetryPolicyBuilder::default()
    }

    /// Whether a status code is considered transient.
    pub fn is_retryable_status(&self, status: u16) -> bool {
        self.retryable_statuses.contains(&status)
    }

    /// Scheduled delay for a 0-indexed attempt.
    pub fn scheduled_delay(&self, attempt: u32) -> Duration {
        let index = attempt as usize;
        self.schedule
            .get(index)
            .or_else(|| self.schedule.last())
            .copied()
            .unwrap_or(Duration::ZERO)
    }

    /// Clamp a raw `retry-after` value to `[0, max_retry_after]`.
    pub fn clamp_retry_after(&self, secs: i64) -> Duration {
        let secs = u64::try_from(secs).unwrap_or(0);
        Duration::from_secs(secs).min(self.max_retry_after)
    }

    /// Upper bound for server-supplied waits.
    pub fn max_retry_after(&self) -> Duration {
        self.max_retry_after
    }

    /// The backoff schedule.
    pub fn schedule(&self) -> &[Duration] {
        &self.schedule
    }
}

impl BackoffStrategy for RetryPolicy {
    fn should_retry(&self, error: &dyn StatusError, _attempt: u32) -> bool {
        error
            .status()
            .is_some_and(|status| self.is_retryable_status(status))
    }

    fn next_delay(&self, error: &dyn StatusError, attempt: u32) -> Option<Duration> {
        if error.status() == Some(TOO_MANY_REQUESTS)
            && let Some(secs) = error.retry_after_secs()
        {
            return Some(self.clamp_retry_after(secs));
        }
        Some(self.scheduled_delay(attempt))
    }

    fn max_retries(&self) -> u32 {
        self.max_retries
    }
}

/// Builder for configuring [`RetryPolicy`].
///
/// Unset fields keep the platform defaults.
///
/// ```rust
/// use rota_core::retry::RetryPolicy;
/// use std::time::Duration;
///
/// let policy = RetryPolicy::builder()
///     .schedule([Duration::from_millis(10), Duration::from_millis(20)])
///     .max_retry_after(Duration::from_secs(30))
///     .build();
///
/// assert_eq!(policy.scheduled_delay(5), Duration::from_millis(20));
/// ```
#[derive(Debug, Default)]
pub struct RetryPolicyBuilder {
    max_retries: Option<u32>,
    schedule: Option<Vec<Duration>>,
    retryable_statuses: Option<Vec<u16>>,
    max_retry_after: Option<Duration>,
}

impl RetryPolicyBuilder {
    /// Set the maximum number of retries after the initial attempt.
    pub fn max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = Some(max_retries);
        self
    }

    /// Set the attempt-indexed backoff schedule.
    ///
    /// An empty schedule retries immediately.
    pub fn schedule(mut self, schedule: impl IntoIterator<Item = Duration>) -> Self {
        self.schedule = Some(schedule.into_iter().collect());
        self
    }

    /// Set the status codes treated as transient.
    pub fn retryable_statuses(mut self, statuses: impl IntoIterator<Item = u16>) -> Self {
        self.retryable_statuses = Some(statuses.into_iter().collect());
        self
    }

    /// Set the cap applied to `retry-after` values.
    pub fn max_retry_after(mut self, max: Duration) -> Self {
        self.max_retry_after = Some(max);
        self
    }

    /// Build the `RetryPolicy` instance.
    pub fn build(self) -> RetryPolicy {
        let defaults = RetryPolicy::default();
        RetryPolicy {
            max_retries: self.max_retries.unwrap_or(defaults.max_retries),
            schedule: self.schedule.unwrap_or(defaults.schedule),
            retryable_statuses: self
                .retryable_statuses
                .unwrap_or(defaults.retryable_statuses),
            max_retry_after: self.max_retry_after.unwrap_or(defaults.max_retry_after),
        }
    }
}
