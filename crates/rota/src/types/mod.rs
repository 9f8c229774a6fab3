//! Typed payloads exchanged with the platform and the schedule API

pub use contact::*;
pub use conversation::*;
pub use journey::*;
pub use schedule::*;

pub mod contact;
pub mod conversation;
pub mod journey;
pub mod schedule;
