//! On-call schedule types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Format of the `datetime` query parameter: UTC, whole seconds, `Z` suffix.
pub const SCHEDULE_DATETIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";

/// Render `at` the way the schedule API expects it.
pub fn format_schedule_datetime(at: DateTime<Utc>) -> String {
    at.format(SCHEDULE_DATETIME_FORMAT).to_string()
}

/// Contact details of the vet on call.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DestinationDetails {
    /// Vet name
    #[serde(default)]
    pub name: String,
    /// Number to transfer to
    #[serde(default)]
    pub contact_number: String,
}

/// Response of `GET {schedule}/active-vet`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActiveVet {
    /// Whether a rota entry covers the requested time
    #[serde(default)]
    pub table_match: bool,

    /// Present when `table_match` is true
    #[serde(default)]
    pub destination_details: Option<DestinationDetails>,
}

/// Where the dialer should send the call. Empty when nobody is on call.
pub type Destination = DestinationDetails;

impl DestinationDetails {
    /// No vet on call.
    pub fn is_empty(&self) -> bool {
        self.contact_number.is_empty()
    }
}

impl ActiveVet {
    /// The destination, or an empty one when no rota entry matched.
    pub fn destination(self) -> Destination {
        match (self.table_match, self.destination_details) {
            (true, Some(details)) => details,
            _ => Destination::default(),
        }
    }
}
