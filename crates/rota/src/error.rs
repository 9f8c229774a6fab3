//! Error types for the ROTA client
//!
//! Remote failures keep the tagged [`ApiError`] produced by the transport
//! adapter so the invoker can classify them; everything else is a local
//! failure that is never retried.

use rota_core::{ApiError, StatusError};
use rota_transport::TransportError;
use thiserror::Error;

/// Result type alias for operations that can fail with a client error.
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the ROTA client.
#[derive(Debug, Error)]
pub enum Error {
    /// The platform answered with an error status.
    #[error(transparent)]
    Api(#[from] ApiError),

    /// The request never produced a response (connection, timeout, ...).
    #[error("Transport error: {0}")]
    Transport(#[source] TransportError),

    /// The conversation has no participant with purpose `customer`.
    #[error("No customer participant found in conversation {0}")]
    NoCustomerParticipant(String),

    /// The speed-dial list is at capacity.
    #[error("Speed dial list can only contain up to {0} contacts")]
    SpeedDialFull(usize),

    /// The contact is already on the speed-dial list.
    #[error("Contact {0} is already in the speed dial list")]
    AlreadyInSpeedDials(String),

    /// The contact has no work number to dial.
    #[error("Contact {0} has no work phone number")]
    NoPhoneNumber(String),

    /// Failed to deserialize an API response.
    #[error("Failed to parse API response: {0}")]
    ResponseValidation(String),

    /// Serialization/deserialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Invalid URL provided.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// Missing required configuration.
    #[error("Missing required configuration: {0}")]
    MissingConfig(String),

    /// Generic error with context.
    #[error("{context}: {source}")]
    WithContext {
        /// Context description
        context: String,
        /// Underlying error
        #[source]
        source: Box<Error>,
    },

    /// Other errors not covered by specific variants.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl From<TransportError> for Error {
    fn from(err: TransportError) -> Self {
        match err {
            TransportError::Status(api) => Error::Api(api),
            TransportError::Serialization(msg) => Error::ResponseValidation(msg),
            other => Error::Transport(other),
        }
    }
}

impl From<url::ParseError> for Error {
    fn from(err: url::ParseError) -> Self {
        Error::InvalidUrl(err.to_string())
    }
}

impl StatusError for Error {
    fn status(&self) -> Option<u16> {
        match self {
            Error::Api(err) => Some(err.status),
            Error::WithContext { source, .. } => source.status(),
            _ => None,
        }
    }

    fn retry_after_secs(&self) -> Option<i64> {
        match self {
            Error::Api(err) => err.retry_after_secs,
            Error::WithContext { source, .. } => source.retry_after_secs(),
            _ => None,
        }
    }
}

impl Error {
    /// HTTP status of a remote failure, if any.
    pub fn status_code(&self) -> Option<u16> {
        self.status()
    }

    /// Check if this error would be retried under the platform policy.
    pub fn is_retryable(&self) -> bool {
        self.status()
            .is_some_and(|s| rota_core::retry::RETRYABLE_STATUSES.contains(&s))
    }

    /// Add context to an error.
    pub fn context<C>(self, context: C) -> Self
    where
        C: std::fmt::Display + Send + Sync + 'static,
    {
        Error::WithContext {
            context: context.to_string(),
            source: Box::new(self),
        }
    }
}
