//! HTTP server configuration object.

use std::net::SocketAddr;

use crate::middleware::ErrorDisclosure;
use crate::outbound::persistence::DbPool;

/// Builder-style configuration for [`super::create_server`].
pub struct ServerConfig {
    pub(crate) bind_addr: SocketAddr,
    pub(crate) disclosure: ErrorDisclosure,
    pub(crate) db_pool: Option<DbPool>,
}

impl ServerConfig {
    /// Listen on `bind_addr`, redacting internal errors and keeping contacts
    /// in memory until told otherwise.
    #[must_use]
    pub fn new(bind_addr: SocketAddr) -> Self {
        Self {
            bind_addr,
            disclosure: ErrorDisclosure::Redacted,
            db_pool: None,
        }
    }

    /// Choose how much detail server errors reveal.
    #[must_use]
    pub fn with_disclosure(mut self, disclosure: ErrorDisclosure) -> Self {
        self.disclosure = disclosure;
        self
    }

    /// Persist contacts in PostgreSQL through `pool`.
    #[must_use]
    pub fn with_db_pool(mut self, pool: DbPool) -> Self {
        self.db_pool = Some(pool);
        self
    }

    /// Configured disclosure mode.
    #[must_use]
    pub fn disclosure(&self) -> ErrorDisclosure {
        self.disclosure
    }

    /// Whether a database pool is attached.
    #[must_use]
    pub fn has_db_pool(&self) -> bool {
        self.db_pool.is_some()
    }
}
