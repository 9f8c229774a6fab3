//! HTTP transport implementation
//!
//! Provides a reqwest-backed client that implements the Transport trait.
//! One request per call; status handling and retries live above this layer.

pub mod client;

pub use client::{HttpTransport, HttpTransportConfig};
