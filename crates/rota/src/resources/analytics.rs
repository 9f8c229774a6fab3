//! Speech and text analytics endpoint

use rota_core::CallOptions;

use super::Resource;
use crate::{client::Client, error::Result, types::TranscriptUrl};

/// Speech and text analytics resource.
#[derive(Clone, Debug)]
pub struct Analytics {
    client: Client,
}

impl Analytics {
    /// Create a new Analytics resource.
    pub(crate) fn new(client: Client) -> Self {
        Self { client }
    }

    /// Signed download link for a communication's transcript.
    pub async fn transcript_url(
        &self,
        conversation_id: &str,
        communication_id: &str,
    ) -> Result<TranscriptUrl> {
        let request = self.client.platform_request(
            "GET",
            &[
                "api",
                "v2",
                "speechandtextanalytics",
                "conversations",
                conversation_id,
                "communications",
                communication_id,
                "transcripturl",
            ],
        )?;

        self.client
            .execute_json(CallOptions::idempotent("analytics.transcript_url"), request)
            .await
    }

    /// Download the transcript JSON behind a signed link.
    pub async fn download_transcript(&self, url: &str) -> Result<serde_json::Value> {
        let request = self.client.absolute_request("GET", url)?;

        self.client
            .execute_json(CallOptions::idempotent("analytics.download_transcript"), request)
            .await
    }

    /// [`Analytics::transcript_url`] followed by [`Analytics::download_transcript`].
    pub async fn transcript(
        &self,
        conversation_id: &str,
        communication_id: &str,
    ) -> Result<serde_json::Value> {
        let link = self.transcript_url(conversation_id, communication_id).await?;
        self.download_transcript(&link.url).await
    }
}

impl Resource for Analytics {
    fn client(&self) -> &Client {
        &self.client
    }
}
