//! Journey sessions endpoint

use rota_core::CallOptions;

use super::Resource;
use crate::{
    client::Client,
    error::Result,
    types::{SESSIONS_PAGE_SIZE, SessionListing},
};

/// Journey resource.
#[derive(Clone, Debug)]
pub struct Journey {
    client: Client,
}

impl Journey {
    /// Create a new Journey resource.
    pub(crate) fn new(client: Client) -> Self {
        Self { client }
    }

    /// Sessions of an external contact, one page of 200.
    pub async fn sessions(&self, contact_id: &str) -> Result<SessionListing> {
        let request = self.client.platform_request_with_query(
            "GET",
            &["api", "v2", "externalcontacts", "contacts", contact_id, "journey", "sessions"],
            [("pageSize", SESSIONS_PAGE_SIZE.to_string())],
        )?;

        self.client
            .execute_json(CallOptions::idempotent("journey.sessions"), request)
            .await
    }
}

impl Resource for Journey {
    fn client(&self) -> &Client {
        &self.client
    }
}
