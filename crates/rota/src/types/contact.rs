//! External contact types

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Custom field flagging a contact as a speed-dial favourite.
pub const SPEED_DIAL_FIELD: &str = "speed_dial_checkbox";

/// A phone number attached to a contact.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PhoneNumber {
    /// Formatted for display
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display: Option<String>,

    /// E.164 form, used for dialling
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub e164: Option<String>,

    /// ISO country code
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country_code: Option<String>,
}

/// An external contact.
///
/// Fields the client does not model are kept in `extra` so that an update
/// writes the contact back unchanged apart from what was edited.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Contact {
    /// Contact id
    pub id: String,

    /// Given name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,

    /// Family name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,

    /// Work phone
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub work_phone: Option<PhoneNumber>,

    /// Organisation-defined fields
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_fields: Option<Map<String, Value>>,

    /// Everything else the platform returned
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Contact {
    /// "First Last", skipping missing parts.
    pub fn display_name(&self) -> String {
        [self.first_name.as_deref(), self.last_name.as_deref()]
            .into_iter()
            .flatten()
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// E.164 work number, if any.
    pub fn work_number(&self) -> Option<&str> {
        self.work_phone.as_ref().and_then(|p| p.e164.as_deref())
    }

    /// Whether the speed-dial custom field is literally `true`.
    pub fn is_speed_dial(&self) -> bool {
        self.custom_fields
            .as_ref()
            .and_then(|fields| fields.get(SPEED_DIAL_FIELD))
            .and_then(Value::as_bool)
            .unwrap_or(false)
    }

    /// A copy with the speed-dial field set to `flag`, other custom fields kept.
    pub fn with_speed_dial(&self, flag: bool) -> Self {
        let mut updated = self.clone();
        updated
            .custom_fields
            .get_or_insert_with(Map::new)
            .insert(SPEED_DIAL_FIELD.to_string(), Value::Bool(flag));
        updated
    }
}

/// One page of `GET /api/v2/externalcontacts/contacts`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactListing {
    /// Contacts on this page
    #[serde(default)]
    pub entities: Vec<Contact>,

    /// 1-based page number
    #[serde(default)]
    pub page_number: Option<u32>,

    /// Page size requested
    #[serde(default)]
    pub page_size: Option<u32>,

    /// Number of pages available
    #[serde(default)]
    pub page_count: Option<u32>,

    /// Total number of matching contacts
    #[serde(default)]
    pub total: Option<u64>,
}

/// Query for listing contacts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactQuery {
    /// 1-based page number
    pub page_number: u32,
    /// Page size (the platform caps this at 100)
    pub page_size: u32,
    /// Free-text search
    pub q: Option<String>,
}

impl Default for ContactQuery {
    fn default() -> Self {
        Self {
            page_number: 1,
            page_size: 100,
            q: None,
        }
    }
}

impl ContactQuery {
    /// First page of contacts matching `text`.
    pub fn search(text: impl Into<String>) -> Self {
        Self {
            q: Some(text.into()),
            ..Default::default()
        }
    }

    /// Page `page_number` of `page_size` unfiltered contacts.
    pub fn page(page_number: u32, page_size: u32) -> Self {
        Self {
            page_number,
            page_size,
            q: None,
        }
    }

    pub(crate) fn to_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = vec![
            ("pageSize", self.page_size.to_string()),
            ("pageNumber", self.page_number.to_string()),
        ];
        if let Some(q) = &self.q {
            pairs.push(("q", q.clone()));
        }
        pairs
    }
}
