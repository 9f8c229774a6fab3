//! Conversations API endpoint

use rota_core::CallOptions;
use tracing::debug;

use super::Resource;
use crate::{
    client::Client,
    error::{Error, Result},
    types::{CallRequest, CallResponse, CallbackConversation, ConversationDetails},
};

/// Conversations API resource.
///
/// Reads are retried on transient failures. Placing a call is attempted
/// exactly once, since a retry after a lost response could ring twice.
#[derive(Clone, Debug)]
pub struct Conversations {
    client: Client,
}

impl Conversations {
    /// Create a new Conversations resource.
    pub(crate) fn new(client: Client) -> Self {
        Self { client }
    }

    /// Fetch a callback conversation.
    pub async fn callback(&self, conversation_id: &str) -> Result<CallbackConversation> {
        let request = self.client.platform_request(
            "GET",
            &["api", "v2", "conversations", "callbacks", conversation_id],
        )?;

        self.client
            .execute_json(CallOptions::idempotent("conversations.callback"), request)
            .await
    }

    /// Customer name, external contact and queue of a callback conversation.
    ///
    /// # Errors
    ///
    /// [`Error::NoCustomerParticipant`] if nobody in the conversation has
    /// purpose `customer`.
    pub async fn details(&self, conversation_id: &str) -> Result<ConversationDetails> {
        let conversation = self.callback(conversation_id).await?;

        let customer = conversation
            .customer()
            .ok_or_else(|| Error::NoCustomerParticipant(conversation_id.to_string()))?;

        let details = ConversationDetails::from(customer);
        debug!(
            conversation_id,
            external_contact_id = details.external_contact_id.as_deref(),
            queue_id = details.queue_id.as_deref(),
            "Resolved customer participant"
        );
        Ok(details)
    }

    /// Place an outbound call. Never retried.
    pub async fn place_call(&self, call: &CallRequest) -> Result<CallResponse> {
        let request = self
            .client
            .platform_request("POST", &["api", "v2", "conversations", "calls"])?
            .with_json(call)?;

        self.client
            .execute_json(CallOptions::non_idempotent("conversations.place_call"), request)
            .await
    }

    /// Call `phone_number` on behalf of the callback described by `details`.
    pub async fn dial_for(
        &self,
        details: &ConversationDetails,
        phone_number: &str,
    ) -> Result<CallResponse> {
        self.place_call(&CallRequest::for_details(details, phone_number))
            .await
    }

    /// Conversation summaries, returned as the platform sends them.
    pub async fn summaries(&self, conversation_id: &str) -> Result<serde_json::Value> {
        let request = self.client.platform_request(
            "GET",
            &["api", "v2", "conversations", conversation_id, "summaries"],
        )?;

        self.client
            .execute_json(CallOptions::idempotent("conversations.summaries"), request)
            .await
    }
}

impl Resource for Conversations {
    fn client(&self) -> &Client {
        &self.client
    }
}
