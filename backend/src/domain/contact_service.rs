//! Contact use cases.
//!
//! [`ContactService`] implements both driving ports on top of any
//! [`ContactRepository`]. Creation runs the validator, performs an advisory
//! email lookup and inserts; the store's unique constraint remains the final
//! arbiter when two creates race.

use std::sync::Arc;

use async_trait::async_trait;
use pagination::{PageRequest, Paginated};
use tracing::{debug, info};

use crate::domain::ports::{ContactRepository, ContactsCommand, ContactsQuery};
use crate::domain::{Contact, ContactDraft, ContactError, ContactId, validate_contact};

/// Contact service implementing [`ContactsCommand`] and [`ContactsQuery`].
#[derive(Clone)]
pub struct ContactService<R> {
    repository: Arc<R>,
}

impl<R> ContactService<R> {
    /// Create a service over `repository`.
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl<R> ContactsCommand for ContactService<R>
where
    R: ContactRepository,
{
    async fn create_contact(&self, draft: ContactDraft) -> Result<Contact, ContactError> {
        let contact = validate_contact(&draft).map_err(ContactError::Validation)?;

        if let Some(existing) = self.repository.find_id_by_email(contact.email()).await? {
            debug!(contact_id = %existing, "rejecting create for an email already on file");
            return Err(ContactError::DuplicateEmail);
        }

        let created = self.repository.insert(&contact).await?;
        info!(contact_id = %created.id, "contact created");
        Ok(created)
    }

    async fn delete_contact(&self, raw_id: &str) -> Result<(), ContactError> {
        let id = ContactId::parse(raw_id).map_err(|err| {
            debug!(error = %err, "rejecting delete with malformed id");
            ContactError::InvalidId
        })?;

        if self.repository.delete(id).await? {
            info!(contact_id = %id, "contact deleted");
            Ok(())
        } else {
            Err(ContactError::NotFound)
        }
    }
}

#[async_trait]
impl<R> ContactsQuery for ContactService<R>
where
    R: ContactRepository,
{
    async fn list_contacts(
        &self,
        request: PageRequest,
    ) -> Result<Paginated<Contact>, ContactError> {
        let page = self.repository.list_page(request).await?;
        debug!(
            page = request.page(),
            limit = request.limit(),
            total = page.total,
            "listed contacts"
        );
        Ok(Paginated::new(page.contacts, request, page.total))
    }
}
