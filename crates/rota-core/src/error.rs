//! Tagged remote-call error and the classification seam used by the invoker.

use thiserror::Error;

/// A failed remote call as reported by the platform.
///
/// Produced by the API-client adapter from an HTTP response. The invoker
/// never looks at transport-specific error shapes; it only reads the
/// status code and the optional `retry-after` value carried here.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("API error (status {status}): {message}")]
pub struct ApiError {
    /// HTTP status code returned by the platform.
    pub status: u16,
    /// Raw `retry-after` value in seconds, when the response carried one.
    ///
    /// Kept signed and unvalidated; the retry policy decides how to clamp it.
    pub retry_after_secs: Option<i64>,
    /// Response body or a short description of the failure.
    pub message: String,
}

impl ApiError {
    /// Create an error for a status code with no `retry-after` value.
    pub fn new(status: u16, message: impl Into<String>) -> Self {
        Self {
            status,
            retry_after_secs: None,
            message: message.into(),
        }
    }

    /// Attach a `retry-after` value in seconds.
    pub fn with_retry_after(mut self, secs: i64) -> Self {
        self.retry_after_secs = Some(secs);
        self
    }

    /// Parse a `retry-after` header value as a whole number of seconds.
    ///
    /// Surrounding whitespace is ignored. HTTP-date forms and anything else
    /// that is not an integer yield `None`.
    pub fn parse_retry_after(value: &str) -> Option<i64> {
        value.trim().parse::<i64>().ok()
    }
}

/// An error the invoker can classify.
///
/// Errors without a status code are never retried.
pub trait StatusError: std::error::Error + Send + Sync + 'static {
    /// HTTP status code, if the failure came from a remote response.
    fn status(&self) -> Option<u16>;

    /// Raw `retry-after` value in seconds, if the response carried one.
    fn retry_after_secs(&self) -> Option<i64> {
        None
    }
}

impl StatusError for ApiError {
    fn status(&self) -> Option<u16> {
        Some(self.status)
    }

    fn retry_after_secs(&self) -> Option<i64> {
        self.retry_after_secs
    }
}
