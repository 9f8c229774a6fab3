//! Conversation types: callback participants and outbound call requests

use serde::{Deserialize, Serialize};

/// Label attached to calls placed from the interaction dialer.
pub const DIALER_CALL_LABEL: &str = "generated via interaction widget";

/// Participant purpose identifying the external party of a conversation.
pub const CUSTOMER_PURPOSE: &str = "customer";

/// Reference to another platform entity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntityRef {
    /// Entity id
    pub id: String,

    /// Link to the entity
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub self_uri: Option<String>,
}

/// A participant of a callback conversation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Participant {
    /// Participant id
    #[serde(default)]
    pub id: Option<String>,

    /// Display name
    #[serde(default)]
    pub name: Option<String>,

    /// Role in the conversation (`customer`, `agent`, `acd`, ...)
    #[serde(default)]
    pub purpose: String,

    /// Linked external contact
    #[serde(default)]
    pub external_contact: Option<EntityRef>,

    /// Queue the participant came through
    #[serde(default)]
    pub queue: Option<EntityRef>,
}

/// A callback conversation as returned by the platform.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CallbackConversation {
    /// Conversation id
    pub id: String,

    /// All participants, in platform order
    #[serde(default)]
    pub participants: Vec<Participant>,
}

impl CallbackConversation {
    /// The first participant whose purpose is `customer`.
    pub fn customer(&self) -> Option<&Participant> {
        self.participants
            .iter()
            .find(|p| p.purpose == CUSTOMER_PURPOSE)
    }
}

/// What the dialer needs to know about the customer of a conversation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConversationDetails {
    /// Customer display name
    pub customer_name: Option<String>,
    /// External contact linked to the customer
    pub external_contact_id: Option<String>,
    /// Queue the callback came through
    pub queue_id: Option<String>,
}

impl From<&Participant> for ConversationDetails {
    fn from(participant: &Participant) -> Self {
        Self {
            customer_name: participant.name.clone(),
            external_contact_id: participant.external_contact.as_ref().map(|c| c.id.clone()),
            queue_id: participant.queue.as_ref().map(|q| q.id.clone()),
        }
    }
}

/// Body of `POST /api/v2/conversations/calls`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CallRequest {
    /// Number to dial, E.164
    pub phone_number: String,

    /// Queue to place the call on behalf of
    #[serde(skip_serializing_if = "Option::is_none")]
    pub call_from_queue_id: Option<String>,

    /// External contact to associate with the call
    #[serde(skip_serializing_if = "Option::is_none")]
    pub external_contact_id: Option<String>,

    /// Free-text label shown on the conversation
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,

    /// Session type, e.g. `softphone`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub session_type: Option<String>,
}

impl CallRequest {
    /// A bare call to `phone_number`.
    pub fn new(phone_number: impl Into<String>) -> Self {
        Self {
            phone_number: phone_number.into(),
            ..Default::default()
        }
    }

    /// A softphone call, as placed from a speed dial.
    pub fn softphone(phone_number: impl Into<String>) -> Self {
        Self {
            session_type: Some("softphone".to_string()),
            ..Self::new(phone_number)
        }
    }

    /// The call the dialer places for a callback's customer.
    pub fn for_details(details: &ConversationDetails, phone_number: impl Into<String>) -> Self {
        Self {
            call_from_queue_id: details.queue_id.clone(),
            external_contact_id: details.external_contact_id.clone(),
            label: Some(DIALER_CALL_LABEL.to_string()),
            ..Self::new(phone_number)
        }
    }
}

/// Response of `POST /api/v2/conversations/calls`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CallResponse {
    /// Id of the created conversation
    pub id: String,

    /// Link to the created conversation
    #[serde(default)]
    pub self_uri: Option<String>,
}
