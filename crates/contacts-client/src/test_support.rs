//! In-process [`ContactsApi`] double for state tests.

use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use chrono::Utc;
use pagination::{PageRequest, Paginated};

use crate::api::{Contact, ContactInput, ContactList, ContactsApi};
use crate::ClientError;

#[derive(Default)]
struct StubState {
    contacts: Vec<Contact>,
    created: Vec<ContactInput>,
    list_calls: Vec<(u64, u64)>,
    fail_list: Option<ClientError>,
    fail_create: Option<ClientError>,
    fail_delete: Option<ClientError>,
}

/// Stores contacts in a vector and fails on request.
#[derive(Default)]
pub struct StubApi {
    state: Mutex<StubState>,
}

fn to_i64(value: u64) -> i64 {
    i64::try_from(value).unwrap_or(i64::MAX)
}

impl StubApi {
    fn state(&self) -> MutexGuard<'_, StubState> {
        self.state.lock().unwrap_or_else(|err| err.into_inner())
    }

    pub fn with_contacts(self, count: i64) -> Self {
        for id in 1..=count {
            let now = Utc::now();
            self.state().contacts.push(Contact {
                id,
                name: format!("Contact {id}"),
                email: format!("contact{id}@example.com"),
                phone: format!("555{id:07}"),
                created_at: now,
                updated_at: now,
            });
        }
        self
    }

    pub fn failing_list(self, error: ClientError) -> Self {
        self.state().fail_list = Some(error);
        self
    }

    pub fn failing_create(self, error: ClientError) -> Self {
        self.state().fail_create = Some(error);
        self
    }

    pub fn failing_delete(self, error: ClientError) -> Self {
        self.state().fail_delete = Some(error);
        self
    }

    pub fn break_list(&self, error: ClientError) {
        self.state().fail_list = Some(error);
    }

    pub fn recover_list(&self) {
        self.state().fail_list = None;
    }

    pub fn created(&self) -> Vec<ContactInput> {
        self.state().created.clone()
    }

    pub fn list_calls(&self) -> Vec<(u64, u64)> {
        self.state().list_calls.clone()
    }
}

#[async_trait]
impl ContactsApi for StubApi {
    async fn list_contacts(&self, page: u64, limit: u64) -> Result<ContactList, ClientError> {
        let mut state = self.state();
        state.list_calls.push((page, limit));
        if let Some(error) = state.fail_list.clone() {
            return Err(error);
        }
        let request = PageRequest::clamped(to_i64(page), to_i64(limit));
        let mut newest_first = state.contacts.clone();
        newest_first.sort_by(|a, b| b.id.cmp(&a.id));
        let total = newest_first.len() as u64;
        let data = newest_first
            .into_iter()
            .skip(usize::try_from(request.offset()).unwrap_or(usize::MAX))
            .take(usize::try_from(request.limit()).unwrap_or(usize::MAX))
            .collect();
        Ok(Paginated::new(data, request, total))
    }

    async fn create_contact(&self, input: &ContactInput) -> Result<Contact, ClientError> {
        let mut state = self.state();
        if let Some(error) = state.fail_create.clone() {
            return Err(error);
        }
        let now = Utc::now();
        let id = state.contacts.iter().map(|c| c.id).max().unwrap_or(0) + 1;
        let contact = Contact {
            id,
            name: input.name.trim().to_owned(),
            email: input.email.trim().to_lowercase(),
            phone: input.phone.clone(),
            created_at: now,
            updated_at: now,
        };
        state.created.push(input.clone());
        state.contacts.push(contact.clone());
        Ok(contact)
    }

    async fn delete_contact(&self, id: i64) -> Result<(), ClientError> {
        let mut state = self.state();
        if let Some(error) = state.fail_delete.clone() {
            return Err(error);
        }
        let before = state.contacts.len();
        state.contacts.retain(|contact| contact.id != id);
        if state.contacts.len() == before {
            return Err(ClientError::Api {
                status: 404,
                message: Some("Contact not found".to_owned()),
                errors: None,
            });
        }
        Ok(())
    }
}
