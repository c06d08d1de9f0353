//! Driving port for contact mutations.

use async_trait::async_trait;

use crate::domain::{Contact, ContactDraft, ContactError};

/// Use-case port for creating and deleting contacts.
///
/// Inbound adapters depend on this trait instead of the service so handler
/// tests can swap in a stub.
#[async_trait]
pub trait ContactsCommand: Send + Sync {
    /// Validate and store a new contact.
    async fn create_contact(&self, draft: ContactDraft) -> Result<Contact, ContactError>;

    /// Delete the contact addressed by the raw path segment `raw_id`.
    async fn delete_contact(&self, raw_id: &str) -> Result<(), ContactError>;
}
