//! Backend entry-point: loads settings, prepares the contact store and
//! serves the REST API.

use actix_web::web;
use color_eyre::eyre::{Result, WrapErr};
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use contacts_backend::inbound::http::health::HealthState;
use contacts_backend::outbound::persistence::{DbPool, PoolConfig, run_pending_migrations};
use contacts_backend::server::{AppSettings, ServerConfig, create_server};

/// Application bootstrap.
#[actix_web::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = AppSettings::load_from_iter(std::env::args_os())
        .wrap_err("failed to load settings")?;
    let bind_addr = settings.bind_addr()?;

    let mut config = ServerConfig::new(bind_addr).with_disclosure(settings.disclosure());
    if let Some(database_url) = settings.database_url() {
        if settings.run_migrations() {
            let url = database_url.to_owned();
            let applied = tokio::task::spawn_blocking(move || run_pending_migrations(&url))
                .await
                .wrap_err("migration task panicked")??;
            info!(applied, "database migrations applied");
        }
        let pool = DbPool::new(
            PoolConfig::new(database_url).with_max_size(settings.pool_max_size()),
        )
        .await?;
        config = config.with_db_pool(pool);
    }

    let health_state = web::Data::new(HealthState::new());
    info!(
        %bind_addr,
        environment = settings.environment(),
        persistent = config.has_db_pool(),
        "starting contacts backend"
    );
    let server = create_server(health_state.clone(), config)?;
    let result = server.await;
    health_state.mark_draining();
    result.wrap_err("server terminated with an error")
}
