//! Shared HTTP adapter state.
//!
//! Handlers receive this through `web::Data` and only see domain ports, so
//! they can be tested without a store.

use std::sync::Arc;

use crate::domain::ports::{ContactsCommand, ContactsQuery};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub contacts: Arc<dyn ContactsCommand>,
    pub contacts_query: Arc<dyn ContactsQuery>,
}

impl HttpState {
    /// Use one service for both ports.
    pub fn from_service<S>(service: Arc<S>) -> Self
    where
        S: ContactsCommand + ContactsQuery + 'static,
    {
        Self {
            contacts: service.clone(),
            contacts_query: service,
        }
    }
}
