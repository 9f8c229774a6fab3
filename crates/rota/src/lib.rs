//! # ROTA client
//!
//! Typed client for the contact-centre platform and the on-call vet
//! schedule, as used by the Vet ROTA dialer and the interaction viewer:
//! - Callback conversation lookup and outbound calls
//! - On-call destination lookup
//! - External contacts and the speed-dial list
//! - Journey sessions, summaries and transcripts
//! - Bounded retry with a fixed 3 s / 9 s / 27 s backoff on every request
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use rota::Client;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = Client::from_env()?;
//!
//!     let details = client.conversations().details("callback-id").await?;
//!     let destination = client.schedule().destination().await?;
//!
//!     if !destination.is_empty() {
//!         client
//!             .conversations()
//!             .dial_for(&details, &destination.contact_number)
//!             .await?;
//!     }
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![deny(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]

// Re-export commonly used types
pub use client::{Client, ClientBuilder};
pub use config::{ClientConfig, DEFAULT_BASE_URL};
pub use error::{Error, Result};
pub use speed_dial::{SPEED_DIAL_CAPACITY, SpeedDials};
pub use types::*;

// Module declarations
pub mod client;
pub mod config;
pub mod error;
pub mod observability;
pub mod resources;
pub mod speed_dial;
pub mod types;

// Retry building blocks, for callers wrapping their own operations
pub use rota_core::{ApiError, CallOptions, Idempotency, Invoker, RetryPolicy, StatusError};

/// Prelude module for common imports
///
/// # Examples
///
/// ```rust
/// use rota::prelude::*;
/// ```
pub mod prelude {
    pub use crate::{
        Client, ClientConfig, Error, Result, SpeedDials,
        types::{CallRequest, Contact, ConversationDetails, Destination},
    };
    pub use rota_core::prelude::*;
}

/// Crate version, automatically updated from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
