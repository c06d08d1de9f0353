//! Driven port for contact persistence adapters and their errors.

use async_trait::async_trait;
use pagination::PageRequest;

use crate::domain::{Contact, ContactId, NewContact};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by contact repository adapters.
    pub enum ContactRepositoryError {
        /// No connection to the store could be obtained.
        Connection { message: String } => "contact repository connection failed: {message}",
        /// A query or mutation failed during execution.
        Query { message: String } => "contact repository query failed: {message}",
        /// The unique constraint on `email` rejected the row.
        DuplicateEmail { email: String } => "a contact with email {email} already exists",
        /// A store check constraint rejected the row.
        CheckViolation { message: String } => "contact row violates a check constraint: {message}",
    }
}

/// A window of contacts and the total row count observed in the same read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactPage {
    /// Contacts on the page, newest first.
    pub contacts: Vec<Contact>,
    /// Number of contacts in the whole table.
    pub total: u64,
}

/// Storage for contact rows.
///
/// Adapters order listings by `created_at` descending with `id` descending
/// as a tie-breaker, and must take the page and the count from one
/// consistent read.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ContactRepository: Send + Sync {
    /// Identifier of the contact holding `email`, if any.
    ///
    /// `email` is expected in normalised (lower-case) form.
    async fn find_id_by_email(&self, email: &str)
    -> Result<Option<ContactId>, ContactRepositoryError>;

    /// Insert a validated contact and return the stored row.
    async fn insert(&self, contact: &NewContact) -> Result<Contact, ContactRepositoryError>;

    /// Fetch one page of contacts together with the total count.
    async fn list_page(&self, request: PageRequest) -> Result<ContactPage, ContactRepositoryError>;

    /// Remove a contact. Returns `false` when no row matched.
    async fn delete(&self, id: ContactId) -> Result<bool, ContactRepositoryError>;
}
