#![deny(unsafe_code)]
#![warn(missing_docs)]

//! Core abstractions for the ROTA platform client.
//!
//! - **Tagged remote errors** via [`ApiError`] and the [`StatusError`]
//!   classification trait
//! - **Bounded retry-with-backoff** via [`Invoker`] driven by a
//!   [`BackoffStrategy`], with [`RetryPolicy`] as the platform default
//!
//! # Examples
//!
//! ```rust
//! use rota_core::prelude::*;
//!
//! # async fn example() -> Result<(), ApiError> {
//! let invoker = Invoker::standard();
//!
//! let value = invoker
//!     .call(|n: u32| async move { Ok::<_, ApiError>(n * 2) }, 21)
//!     .await?;
//! assert_eq!(value, 42);
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod retry;

pub use error::{ApiError, StatusError};
pub use retry::{BackoffStrategy, CallOptions, Idempotency, Invoker, RetryPolicy};

/// Convenient re-exports of commonly used items.
///
/// ```rust
/// use rota_core::prelude::*;
/// ```
pub mod prelude {
    pub use crate::error::{ApiError, StatusError};
    pub use crate::retry::{BackoffStrategy, CallOptions, Idempotency, Invoker, RetryPolicy};
}
