//! Transport error types

use rota_core::{ApiError, StatusError};
use std::fmt;

/// Result type for transport operations
pub type Result<T> = std::result::Result<T, TransportError>;

/// Errors that can occur in transport operations
///
/// Only [`TransportError::Status`] carries a status code; everything else
/// failed before a response arrived and is never retried by the invoker.
#[derive(Debug)]
pub enum TransportError {
    /// The server answered with an error status
    Status(ApiError),

    /// HTTP request/response error
    Http(String),

    /// Connection error
    Connection(String),

    /// Timeout error
    Timeout,

    /// Serialization error
    Serialization(String),

    /// Generic transport error
    Other(String),
}

impl fmt::Display for TransportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Status(err) => write!(f, "{}", err),
            Self::Http(msg) => write!(f, "HTTP error: {}", msg),
            Self::Connection(msg) => write!(f, "Connection error: {}", msg),
            Self::Timeout => write!(f, "Timeout"),
            Self::Serialization(msg) => write!(f, "Serialization error: {}", msg),
            Self::Other(msg) => write!(f, "{}", msg),
        }
    }
}

impl std::error::Error for TransportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Status(err) => Some(err),
            _ => None,
        }
    }
}

impl StatusError for TransportError {
    fn status(&self) -> Option<u16> {
        match self {
            Self::Status(err) => Some(err.status),
            _ => None,
        }
    }

    fn retry_after_secs(&self) -> Option<i64> {
        match self {
            Self::Status(err) => err.retry_after_secs,
            _ => None,
        }
    }
}

impl From<ApiError> for TransportError {
    fn from(err: ApiError) -> Self {
        Self::Status(err)
    }
}

impl From<reqwest::Error> for TransportError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout
        } else if err.is_connect() {
            Self::Connection(err.to_string())
        } else {
            Self::Http(err.to_string())
        }
    }
}

impl From<serde_json::Error> for TransportError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}
