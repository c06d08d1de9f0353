//! Contact list view state.

use pagination::{DEFAULT_LIMIT, PaginationMeta};
use tracing::warn;

use crate::api::{Contact, ContactsApi};
use crate::form::ContactForm;

/// Banner text when listing fails without a server message.
pub const FETCH_FALLBACK: &str = "Failed to fetch contacts";

/// Banner text when deleting fails without a server message.
pub const DELETE_FALLBACK: &str = "Failed to delete contact";

/// The currently displayed page of contacts.
///
/// A failed fetch keeps the previous page on screen and only sets the
/// banner.
pub struct ContactBook<A> {
    api: A,
    contacts: Vec<Contact>,
    pagination: Option<PaginationMeta>,
    loading: bool,
    error: Option<String>,
    current_page: u64,
    limit: u64,
}

impl<A: ContactsApi> ContactBook<A> {
    /// Empty book on page 1 with the default page size.
    pub fn new(api: A) -> Self {
        Self::with_limit(api, DEFAULT_LIMIT)
    }

    /// Empty book on page 1 showing `limit` contacts per page.
    pub fn with_limit(api: A, limit: u64) -> Self {
        Self {
            api,
            contacts: Vec::new(),
            pagination: None,
            loading: false,
            error: None,
            current_page: 1,
            limit,
        }
    }

    /// Contacts on the current page.
    #[must_use]
    pub fn contacts(&self) -> &[Contact] {
        &self.contacts
    }

    /// Window metadata of the last successful fetch.
    #[must_use]
    pub const fn pagination(&self) -> Option<&PaginationMeta> {
        self.pagination.as_ref()
    }

    /// Whether a fetch is in flight.
    #[must_use]
    pub const fn is_loading(&self) -> bool {
        self.loading
    }

    /// Banner message from the last failed operation.
    #[must_use]
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Page shown by the last successful fetch.
    #[must_use]
    pub const fn current_page(&self) -> u64 {
        self.current_page
    }

    /// Page size requested from the server.
    #[must_use]
    pub const fn limit(&self) -> u64 {
        self.limit
    }

    /// The underlying API.
    pub const fn api(&self) -> &A {
        &self.api
    }

    /// Load `page`.
    pub async fn fetch(&mut self, page: u64) {
        self.loading = true;
        self.error = None;
        match self.api.list_contacts(page, self.limit).await {
            Ok(list) => {
                self.contacts = list.data;
                self.pagination = Some(list.pagination);
                self.current_page = page;
            }
            Err(err) => {
                warn!(error = %err, page, "failed to fetch contacts");
                self.error = Some(err.banner_message(FETCH_FALLBACK));
            }
        }
        self.loading = false;
    }

    /// Reload the current page.
    pub async fn refresh(&mut self) {
        self.fetch(self.current_page).await;
    }

    /// Switch to `page`.
    pub async fn set_page(&mut self, page: u64) {
        self.fetch(page).await;
    }

    /// Delete `id`, then reload the same page.
    pub async fn delete(&mut self, id: i64) {
        match self.api.delete_contact(id).await {
            Ok(()) => self.refresh().await,
            Err(err) => {
                warn!(error = %err, contact_id = id, "failed to delete contact");
                self.error = Some(err.banner_message(DELETE_FALLBACK));
            }
        }
    }

    /// Submit `form` and reload the current page when a contact was added.
    pub async fn add(&mut self, form: &mut ContactForm) -> Option<Contact> {
        let created = form.submit(&self.api).await?;
        self.refresh().await;
        Some(created)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::form::FormField;
    use crate::test_support::StubApi;
    use crate::ClientError;
    use rstest::rstest;

    fn ids(book: &ContactBook<StubApi>) -> Vec<i64> {
        book.contacts().iter().map(|contact| contact.id).collect()
    }

    #[tokio::test]
    async fn fetch_replaces_list_and_page() {
        let mut book = ContactBook::with_limit(StubApi::default().with_contacts(13), 6);
        book.fetch(2).await;

        assert_eq!(ids(&book), vec![7, 6, 5, 4, 3, 2]);
        assert_eq!(book.current_page(), 2);
        let meta = book.pagination().expect("pagination");
        assert_eq!((meta.total, meta.total_pages), (13, 3));
        assert!(!book.is_loading());
        assert_eq!(book.error(), None);
    }

    #[rstest]
    #[case::server_message(
        ClientError::Api { status: 503, message: Some("Contact store is unavailable".to_owned()), errors: None },
        "Contact store is unavailable"
    )]
    #[case::network(ClientError::Network { message: "refused".to_owned() }, FETCH_FALLBACK)]
    #[tokio::test]
    async fn failed_fetch_keeps_previous_page(
        #[case] failure: ClientError,
        #[case] banner: &str,
    ) {
        let mut book = ContactBook::new(StubApi::default().with_contacts(3));
        book.fetch(1).await;
        book.api().break_list(failure);
        book.fetch(2).await;

        assert_eq!(ids(&book), vec![3, 2, 1]);
        assert_eq!(book.current_page(), 1);
        assert_eq!(book.error(), Some(banner));
        assert!(!book.is_loading());
    }

    #[tokio::test]
    async fn successful_fetch_clears_the_banner() {
        let mut book = ContactBook::new(StubApi::default().with_contacts(2).failing_list(
            ClientError::Timeout {
                message: "elapsed".to_owned(),
            },
        ));
        book.fetch(1).await;
        assert_eq!(book.error(), Some(FETCH_FALLBACK));

        book.api().recover_list();
        book.refresh().await;
        assert_eq!(book.error(), None);
        assert_eq!(ids(&book), vec![2, 1]);
    }

    #[tokio::test]
    async fn delete_refetches_the_same_page() {
        let mut book = ContactBook::with_limit(StubApi::default().with_contacts(13), 6);
        book.set_page(2).await;
        book.delete(5).await;

        assert_eq!(book.current_page(), 2);
        assert_eq!(ids(&book), vec![7, 6, 4, 3, 2, 1]);
        assert_eq!(book.api().list_calls(), vec![(2, 6), (2, 6)]);
    }

    #[tokio::test]
    async fn failed_delete_sets_the_banner() {
        let mut book = ContactBook::new(StubApi::default().with_contacts(2).failing_delete(
            ClientError::Network {
                message: "refused".to_owned(),
            },
        ));
        book.fetch(1).await;
        book.delete(1).await;

        assert_eq!(book.error(), Some(DELETE_FALLBACK));
        assert_eq!(ids(&book), vec![2, 1]);
    }

    #[tokio::test]
    async fn deleting_a_missing_contact_shows_the_server_message() {
        let mut book = ContactBook::new(StubApi::default().with_contacts(1));
        book.delete(99).await;
        assert_eq!(book.error(), Some("Contact not found"));
    }

    #[tokio::test]
    async fn adding_a_contact_puts_it_at_the_head() {
        let mut book = ContactBook::new(StubApi::default().with_contacts(3));
        book.fetch(1).await;

        let mut form = ContactForm::new();
        form.edit(FormField::Name, "Newest");
        form.edit(FormField::Email, "new@example.com");
        form.edit(FormField::Phone, "555 999 8888");
        let created = book.add(&mut form).await.expect("created");

        assert_eq!(book.contacts().first(), Some(&created));
        assert_eq!(book.pagination().map(|meta| meta.total), Some(4));
    }
}
