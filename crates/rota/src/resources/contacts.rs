//! External contacts endpoint

use rota_core::CallOptions;
use tracing::{debug, warn};

use super::Resource;
use crate::{
    client::Client,
    error::Result,
    types::{Contact, ContactListing, ContactQuery},
};

/// Page size used when walking every contact.
const FAVORITES_PAGE_SIZE: u32 = 100;

/// External contacts resource.
#[derive(Clone, Debug)]
pub struct Contacts {
    client: Client,
}

impl Contacts {
    /// Create a new Contacts resource.
    pub(crate) fn new(client: Client) -> Self {
        Self { client }
    }

    /// One page of contacts.
    pub async fn list(&self, query: &ContactQuery) -> Result<ContactListing> {
        let request = self.client.platform_request_with_query(
            "GET",
            &["api", "v2", "externalcontacts", "contacts"],
            query.to_pairs(),
        )?;

        self.client
            .execute_json(CallOptions::idempotent("contacts.list"), request)
            .await
    }

    /// First page of contacts matching `text`.
    pub async fn search(&self, text: &str) -> Result<Vec<Contact>> {
        Ok(self.list(&ContactQuery::search(text)).await?.entities)
    }

    /// Every contact flagged as a speed dial, across all pages.
    ///
    /// A page that fails (after retries) ends the walk; the favourites found
    /// on earlier pages are still returned.
    pub async fn favorites(&self) -> Vec<Contact> {
        let mut favorites = Vec::new();
        let mut page_number = 1;

        loop {
            let page = match self
                .list(&ContactQuery::page(page_number, FAVORITES_PAGE_SIZE))
                .await
            {
                Ok(page) => page,
                Err(err) => {
                    warn!(page_number, error = %err, "Error fetching favourited contacts");
                    break;
                }
            };

            let page_count = page.page_count.unwrap_or(0);
            favorites.extend(page.entities.into_iter().filter(Contact::is_speed_dial));
            debug!(page_number, page_count, found = favorites.len(), "Scanned contacts page");

            page_number += 1;
            if page_number > page_count {
                break;
            }
        }

        favorites
    }

    /// Write the speed-dial flag of `contact` and return the stored contact.
    pub async fn set_speed_dial(&self, contact: &Contact, flag: bool) -> Result<Contact> {
        let request = self
            .client
            .platform_request(
                "PUT",
                &["api", "v2", "externalcontacts", "contacts", contact.id.as_str()],
            )?
            .with_json(&contact.with_speed_dial(flag))?;

        self.client
            .execute_json(CallOptions::idempotent("contacts.update"), request)
            .await
    }
}

impl Resource for Contacts {
    fn client(&self) -> &Client {
        &self.client
    }
}
