//! Driving port for contact reads.

use async_trait::async_trait;
use pagination::{PageRequest, Paginated};

use crate::domain::{Contact, ContactError};

/// Use-case port for paging through contacts.
#[async_trait]
pub trait ContactsQuery: Send + Sync {
    /// Return one page of contacts, newest first.
    async fn list_contacts(&self, request: PageRequest)
    -> Result<Paginated<Contact>, ContactError>;
}
