//! Application settings loaded via OrthoConfig.
//!
//! Values come from CLI flags, `CONTACTS_*` environment variables and an
//! optional configuration file, in that order of precedence.

use std::net::SocketAddr;

use ortho_config::OrthoConfig;
use serde::Deserialize;

use crate::middleware::ErrorDisclosure;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:5000";
const DEFAULT_ENVIRONMENT: &str = "development";
const DEFAULT_POOL_MAX_SIZE: u32 = 10;

/// Errors raised while interpreting loaded settings.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SettingsError {
    /// `bind_addr` is not a socket address.
    #[error("invalid bind address {value:?}: {message}")]
    BindAddr { value: String, message: String },
}

/// Server settings.
#[derive(Debug, Clone, Default, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "CONTACTS")]
pub struct AppSettings {
    /// Socket address to listen on.
    pub bind_addr: Option<String>,
    /// PostgreSQL connection string. Without one the server keeps contacts
    /// in memory.
    pub database_url: Option<String>,
    /// Deployment environment name; `production` redacts internal errors.
    pub environment: Option<String>,
    /// Maximum pooled database connections.
    pub pool_max_size: Option<u32>,
    /// Leave the schema alone at start-up. Absent means migrations run.
    pub skip_migrations: Option<bool>,
}

impl AppSettings {
    /// Parsed listen address.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::BindAddr`] when the value does not parse.
    pub fn bind_addr(&self) -> Result<SocketAddr, SettingsError> {
        let raw = self.bind_addr.as_deref().unwrap_or(DEFAULT_BIND_ADDR).trim();
        raw.parse().map_err(|err: std::net::AddrParseError| SettingsError::BindAddr {
            value: raw.to_owned(),
            message: err.to_string(),
        })
    }

    /// Database URL, ignoring blank values.
    pub fn database_url(&self) -> Option<&str> {
        self.database_url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
    }

    /// Deployment environment name.
    pub fn environment(&self) -> &str {
        self.environment.as_deref().unwrap_or(DEFAULT_ENVIRONMENT)
    }

    /// Error disclosure mode for the environment.
    pub fn disclosure(&self) -> ErrorDisclosure {
        ErrorDisclosure::for_environment(self.environment())
    }

    /// Maximum pooled connections.
    pub fn pool_max_size(&self) -> u32 {
        self.pool_max_size.unwrap_or(DEFAULT_POOL_MAX_SIZE)
    }

    /// Whether to apply migrations at start-up.
    pub fn run_migrations(&self) -> bool {
        !self.skip_migrations.unwrap_or(false)
    }
}
