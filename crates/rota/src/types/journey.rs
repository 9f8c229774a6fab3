//! Journey session and transcript types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Page size used when listing a contact's sessions.
pub const SESSIONS_PAGE_SIZE: u32 = 200;

/// A journey session of an external contact.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    /// Session id
    pub id: String,

    /// Session type (`web`, `app`, `conversation`, ...)
    #[serde(rename = "type", default)]
    pub session_type: Option<String>,

    /// When the session started
    #[serde(default)]
    pub created_date: Option<DateTime<Utc>>,

    /// When the session ended
    #[serde(default)]
    pub end_date: Option<DateTime<Utc>>,

    /// Remaining platform fields
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Response of the journey sessions listing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionListing {
    /// Sessions, newest first
    #[serde(default)]
    pub entities: Vec<Session>,

    /// Cursor link to the next page
    #[serde(default)]
    pub next_uri: Option<String>,
}

/// Signed link to a communication's transcript.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranscriptUrl {
    /// Pre-signed download URL
    pub url: String,
}
