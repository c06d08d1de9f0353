//! Builds the HTTP state from the configured store.

use std::sync::Arc;

use actix_web::web;
use mockable::DefaultClock;
use tracing::warn;

use crate::domain::ContactService;
use crate::inbound::http::state::HttpState;
use crate::outbound::memory::InMemoryContactRepository;
use crate::outbound::persistence::{DbPool, DieselContactRepository};

/// Wire the contact service over PostgreSQL when a pool is available,
/// otherwise over a process-local store.
pub(crate) fn build_http_state(db_pool: Option<&DbPool>) -> web::Data<HttpState> {
    let state = match db_pool {
        Some(pool) => {
            let repository = Arc::new(DieselContactRepository::new(pool.clone()));
            HttpState::from_service(Arc::new(ContactService::new(repository)))
        }
        None => {
            warn!("no database configured; contacts are kept in memory and lost on restart");
            let repository = Arc::new(InMemoryContactRepository::new(Arc::new(DefaultClock)));
            HttpState::from_service(Arc::new(ContactService::new(repository)))
        }
    };
    web::Data::new(state)
}
