//! Speed-dial list of favourite external contacts
//!
//! The list is explicit state owned by the caller. Membership is mirrored on
//! the platform through the `speed_dial_checkbox` custom field, so a list
//! rebuilt with [`SpeedDials::load_favorites`] matches what was saved.

use tracing::{debug, info, warn};

use crate::{
    client::Client,
    error::{Error, Result},
    resources::Resource,
    types::{CallRequest, CallResponse, Contact},
};

/// Maximum number of speed dials.
pub const SPEED_DIAL_CAPACITY: usize = 10;

/// An ordered list of at most [`SPEED_DIAL_CAPACITY`] favourite contacts.
#[derive(Debug, Clone)]
pub struct SpeedDials {
    client: Client,
    entries: Vec<Contact>,
    capacity: usize,
}

impl SpeedDials {
    /// An empty list backed by `client`.
    pub fn new(client: Client) -> Self {
        Self::with_capacity(client, SPEED_DIAL_CAPACITY)
    }

    /// An empty list with a custom capacity.
    pub fn with_capacity(client: Client, capacity: usize) -> Self {
        Self {
            client,
            entries: Vec::new(),
            capacity,
        }
    }

    /// Current entries, in insertion order.
    pub fn entries(&self) -> &[Contact] {
        &self.entries
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the list is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Whether no more entries fit.
    pub fn is_full(&self) -> bool {
        self.entries.len() >= self.capacity
    }

    /// Whether a contact with `contact_id` is on the list.
    pub fn contains(&self, contact_id: &str) -> bool {
        self.entries.iter().any(|c| c.id == contact_id)
    }

    /// Add `contact`, flagging it on the platform first if needed.
    ///
    /// With `force`, the capacity and duplicate checks are skipped; a
    /// contact already on the list is then left in place rather than added
    /// twice. If the platform update fails the list is unchanged.
    ///
    /// # Errors
    ///
    /// - [`Error::SpeedDialFull`] when the list is at capacity
    /// - [`Error::AlreadyInSpeedDials`] when the contact is already present
    /// - the update error if flagging the contact failed
    pub async fn add(&mut self, contact: Contact, force: bool) -> Result<()> {
        let present = self.contains(&contact.id);
        if !force {
            if self.is_full() {
                return Err(Error::SpeedDialFull(self.capacity));
            }
            if present {
                return Err(Error::AlreadyInSpeedDials(contact.id));
            }
        } else if present {
            return Ok(());
        }

        let contact = if contact.is_speed_dial() {
            contact
        } else {
            let stored = self
                .client
                .contacts()
                .set_speed_dial(&contact, true)
                .await
                .map_err(|err| err.context(format!("Error updating contact {}", contact.id)))?;
            info!(contact_id = %stored.id, "Flagged contact as speed dial");
            stored
        };

        self.entries.push(contact);
        Ok(())
    }

    /// Remove the entry at `index`, clearing its flag on the platform.
    ///
    /// A failed platform update is logged and the entry is removed anyway.
    /// Returns the removed contact, or `None` if `index` is out of range.
    pub async fn remove(&mut self, index: usize) -> Option<Contact> {
        let contact = self.entries.get(index)?;

        match self.client.contacts().set_speed_dial(contact, false).await {
            Ok(_) => info!(contact_id = %contact.id, "Cleared speed dial flag"),
            Err(err) => warn!(contact_id = %contact.id, error = %err, "Error updating contact"),
        }

        Some(self.entries.remove(index))
    }

    /// Add every favourite stored on the platform.
    ///
    /// Returns the number of entries added.
    pub async fn load_favorites(&mut self) -> usize {
        let before = self.entries.len();
        for contact in self.client.contacts().favorites().await {
            // Favourites are already flagged, so this never touches the network.
            if let Err(err) = self.add(contact, true).await {
                warn!(error = %err, "Skipping favourite");
            }
        }
        let added = self.entries.len() - before;
        debug!(added, total = self.entries.len(), "Loaded favourites");
        added
    }

    /// Search contacts, picking up any flagged ones along the way.
    pub async fn search(&mut self, text: &str) -> Result<Vec<Contact>> {
        let results = self.client.contacts().search(text).await?;
        for contact in results.iter().filter(|c| c.is_speed_dial()) {
            if let Err(err) = self.add(contact.clone(), true).await {
                warn!(error = %err, "Skipping favourite");
            }
        }
        Ok(results)
    }

    /// Place a softphone call to the entry at `index`.
    ///
    /// # Errors
    ///
    /// [`Error::NoPhoneNumber`] when the contact has no work number, and
    /// `Ok(None)` when `index` is out of range.
    pub async fn dial(&self, index: usize) -> Result<Option<CallResponse>> {
        let Some(contact) = self.entries.get(index) else {
            return Ok(None);
        };
        let number = contact
            .work_number()
            .ok_or_else(|| Error::NoPhoneNumber(contact.id.clone()))?;

        let response = self
            .client
            .conversations()
            .place_call(&CallRequest::softphone(number))
            .await?;
        Ok(Some(response))
    }
}

impl Resource for SpeedDials {
    fn client(&self) -> &Client {
        &self.client
    }
}
