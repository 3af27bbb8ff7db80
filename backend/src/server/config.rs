//! Process settings and the HTTP server configuration built from them.

use std::net::SocketAddr;

use actix_web::cookie::{Key, SameSite};
use ortho_config::OrthoConfig;
use serde::Deserialize;

use contacts_backend::outbound::persistence::DbPool;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_DB_MAX_CONNECTIONS: u32 = 10;

/// Settings read from `CONTACTS_*` environment variables and CLI flags.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "CONTACTS")]
pub struct AppSettings {
    /// Listen address, `0.0.0.0:8080` when unset.
    pub bind_addr: Option<String>,
    /// PostgreSQL URL; without it the server keeps contacts in memory.
    pub database_url: Option<String>,
    /// Upper bound on pooled connections.
    pub db_max_connections: Option<u32>,
    /// Apply embedded migrations before serving.
    #[ortho_config(default = true)]
    pub run_migrations: bool,
}

impl AppSettings {
    pub fn bind_addr(&self) -> Result<SocketAddr, std::net::AddrParseError> {
        self.bind_addr.as_deref().unwrap_or(DEFAULT_BIND_ADDR).parse()
    }

    pub fn db_max_connections(&self) -> u32 {
        self.db_max_connections.unwrap_or(DEFAULT_DB_MAX_CONNECTIONS)
    }
}

/// Inputs for [`super::create_server`].
pub struct ServerConfig {
    pub(crate) key: Key,
    pub(crate) cookie_secure: bool,
    pub(crate) same_site: SameSite,
    pub(crate) bind_addr: SocketAddr,
    pub(crate) db_pool: Option<DbPool>,
}

impl ServerConfig {
    #[must_use]
    pub fn new(key: Key, cookie_secure: bool, same_site: SameSite, bind_addr: SocketAddr) -> Self {
        Self {
            key,
            cookie_secure,
            same_site,
            bind_addr,
            db_pool: None,
        }
    }

    /// Serve contacts and users from PostgreSQL instead of memory.
    #[must_use]
    pub fn with_db_pool(mut self, pool: DbPool) -> Self {
        self.db_pool = Some(pool);
        self
    }
}
