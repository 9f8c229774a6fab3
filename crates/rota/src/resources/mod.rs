//! API resource endpoints
//!
//! Each resource is a thin handle over a [`Client`] clone, grouped the way
//! the platform groups its APIs.

pub mod analytics;
pub mod contacts;
pub mod conversations;
pub mod journey;
pub mod schedule;

pub use analytics::Analytics;
pub use contacts::Contacts;
pub use conversations::Conversations;
pub use journey::Journey;
pub use schedule::Schedule;

use crate::client::Client;

/// Base trait for API resources.
pub trait Resource {
    /// Get a reference to the client.
    fn client(&self) -> &Client;
}
