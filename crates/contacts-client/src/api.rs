//! Wire types and the contacts API port.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use pagination::Paginated;
use serde::{Deserialize, Serialize};

use crate::ClientError;

/// Contact as returned by the server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contact {
    /// Server-assigned identifier.
    pub id: i64,
    /// Trimmed display name.
    pub name: String,
    /// Lower-cased email address.
    pub email: String,
    /// Ten ASCII digits.
    pub phone: String,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last modification timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Body of a create request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactInput {
    /// Display name.
    pub name: String,
    /// Email address.
    pub email: String,
    /// Phone number.
    pub phone: String,
}

/// One page of contacts.
pub type ContactList = Paginated<Contact>;

/// Operations the contact book UI needs from the server.
#[async_trait]
pub trait ContactsApi: Send + Sync {
    /// Fetch page `page` of `limit` contacts, newest first.
    async fn list_contacts(&self, page: u64, limit: u64) -> Result<ContactList, ClientError>;

    /// Create a contact.
    async fn create_contact(&self, input: &ContactInput) -> Result<Contact, ClientError>;

    /// Delete the contact with `id`.
    async fn delete_contact(&self, id: i64) -> Result<(), ClientError>;
}
