//! Retry policy and the resilient invoker.
//!
//! Every remote call made by the client goes through an [`Invoker`]. The
//! invoker retries transient failures (429, 502, 503, 504) up to three
//! times, waiting 3 s, 9 s and 27 s between attempts, or for the
//! server-supplied `retry-after` on a 429.
//!
//! # Key Types
//!
//! - [`BackoffStrategy`] - Seam between the invoker and a policy
//! - [`RetryPolicy`] - Fixed-schedule platform policy
//! - [`Invoker`] - Runs an operation under a strategy
//!
//! # Examples
//!
//! ```rust
//! use rota_core::error::ApiError;
//! use rota_core::retry::{CallOptions, Invoker};
//!
//! # async fn example() -> Result<(), ApiError> {
//! let invoker = Invoker::standard();
//!
//! // Reads are retried
//! let transcript = invoker
//!     .call(|id: &str| async move { Ok::<_, ApiError>(id.len()) }, "comm-1")
//!     .await?;
//!
//! // Placing a call is attempted exactly once
//! invoker
//!     .call_with(
//!         CallOptions::non_idempotent("place_call"),
//!         |number: &str| async move { Ok::<_, ApiError>(number.to_owned()) },
//!         "+441234567890",
//!     )
//!     .await?;
//! # Ok(())
//! # }
//! ```

mod invoker;
mod schedule;
mod strategy;

pub use invoker::{CallOptions, Idempotency, Invoker};
pub use schedule::{
    DEFAULT_MAX_RETRIES, DEFAULT_MAX_RETRY_AFTER, DEFAULT_SCHEDULE, RETRYABLE_STATUSES,
    RetryPolicy, RetryPolicyBuilder,
};
pub use strategy::BackoffStrategy;
