//! On-call schedule endpoint

use chrono::{DateTime, Utc};
use rota_core::CallOptions;
use tracing::warn;

use super::Resource;
use crate::{
    client::Client,
    error::Result,
    types::{ActiveVet, Destination, format_schedule_datetime},
};

/// On-call schedule resource.
///
/// Talks to the rota API configured by `schedule_endpoint`, authenticated
/// with `X-Api-Key` rather than the platform token.
#[derive(Clone, Debug)]
pub struct Schedule {
    client: Client,
}

impl Schedule {
    /// Create a new Schedule resource.
    pub(crate) fn new(client: Client) -> Self {
        Self { client }
    }

    /// The rota entry covering `at`.
    ///
    /// # Errors
    ///
    /// [`crate::Error::MissingConfig`] if no schedule endpoint is configured.
    pub async fn active_vet_at(&self, at: DateTime<Utc>) -> Result<ActiveVet> {
        let request = self
            .client
            .schedule_request("active-vet", [("datetime", format_schedule_datetime(at))])?;

        self.client
            .execute_json(CallOptions::idempotent("schedule.active_vet"), request)
            .await
    }

    /// Where to send a call right now.
    pub async fn destination(&self) -> Result<Destination> {
        self.destination_at(Utc::now()).await
    }

    /// Where to send a call at `at`. Empty when no vet is on call.
    pub async fn destination_at(&self, at: DateTime<Utc>) -> Result<Destination> {
        let active = self.active_vet_at(at).await?;
        if !active.table_match {
            warn!(datetime = %format_schedule_datetime(at), "No active vet found for the requested time");
        }
        Ok(active.destination())
    }
}

impl Resource for Schedule {
    fn client(&self) -> &Client {
        &self.client
    }
}
