//! HTTP transport layer for the ROTA platform client
//!
//! Provides a trait-based transport abstraction so the client can be driven
//! by the real HTTP stack in production and by a scripted transport in tests.
//!
//! # Architecture
//!
//! - **Transport trait**: Generic interface for any transport implementation
//! - **HTTP transport**: REST client via reqwest, one attempt per call
//! - **Response adapter**: [`HttpResponse::error_for_status`] turns error
//!   statuses into the tagged [`rota_core::ApiError`] the invoker classifies

#![deny(unsafe_code)]
#![warn(missing_docs)]

//! # Usage
//!
//! ```no_run
//! use rota_transport::{HttpRequest, HttpTransport, Transport};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let transport = HttpTransport::new()?;
//! let request = HttpRequest::new("GET", "https://api.mypurecloud.com/api/v2/users/me")
//!     .with_bearer("token");
//! let response = transport.send_http(request).await?.error_for_status()?;
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod http;
pub mod traits;

// Re-export commonly used types
pub use error::{Result, TransportError};
pub use http::{HttpTransport, HttpTransportConfig};
pub use traits::{HttpRequest, HttpResponse, Transport};
