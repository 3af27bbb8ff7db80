//! Contacts backend entry point.

mod server;

use actix_web::web;
use color_eyre::eyre::{WrapErr, eyre};
use mockable::DefaultEnv;
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use contacts_backend::inbound::http::health::HealthState;
use contacts_backend::inbound::http::session_config::{BuildMode, session_settings_from_env};
use contacts_backend::outbound::persistence::{DbPool, PoolConfig, run_pending_migrations};

use server::{AppSettings, ServerConfig, create_server};

async fn connect_database(url: &str, settings: &AppSettings) -> color_eyre::Result<DbPool> {
    if settings.run_migrations {
        let applied = run_pending_migrations(url)
            .await
            .wrap_err("failed to apply database migrations")?;
        info!(applied, "database migrations applied");
    }

    DbPool::new(PoolConfig::new(url).with_max_size(settings.db_max_connections()))
        .await
        .wrap_err("failed to build database pool")
}

#[actix_web::main]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    if let Err(error) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(%error, "tracing init failed");
    }

    let settings =
        AppSettings::load().map_err(|err| eyre!("failed to load configuration: {err}"))?;
    let session = session_settings_from_env(&DefaultEnv::new(), BuildMode::from_debug_assertions())
        .wrap_err("invalid session configuration")?;
    let bind_addr = settings.bind_addr().wrap_err("invalid CONTACTS_BIND_ADDR")?;

    let mut config = ServerConfig::new(
        session.key,
        session.cookie_secure,
        session.same_site,
        bind_addr,
    );
    if let Some(url) = settings.database_url.as_deref() {
        config = config.with_db_pool(connect_database(url, &settings).await?);
    }

    let health_state = web::Data::new(HealthState::new());
    let server = create_server(health_state.clone(), config)?;
    info!(%bind_addr, "contacts backend listening");
    server.await?;
    health_state.mark_unhealthy();
    Ok(())
}

#[cfg(test)]
mod tests;
