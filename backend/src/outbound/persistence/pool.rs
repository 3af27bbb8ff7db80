//! bb8 pool of `diesel-async` PostgreSQL connections.
//!
//! Repositories check out one connection per operation. The pooled handle
//! returns to the pool when dropped, on success and error paths alike.

use std::time::Duration;

use diesel_async::pooled_connection::bb8::{Pool, PooledConnection};
use diesel_async::pooled_connection::AsyncDieselConnectionManager;
use diesel_async::AsyncPgConnection;
use tracing::debug;

/// Errors that can occur during pool operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PoolError {
    /// Failed to check out a connection from the pool.
    #[error("failed to get connection from pool: {message}")]
    Checkout { message: String },

    /// Failed to build the connection pool.
    #[error("failed to build connection pool: {message}")]
    Build { message: String },
}

impl PoolError {
    /// Create a checkout error with the given message.
    pub fn checkout(message: impl Into<String>) -> Self {
        Self::Checkout {
            message: message.into(),
        }
    }

    /// Create a build error with the given message.
    pub fn build(message: impl Into<String>) -> Self {
        Self::Build {
            message: message.into(),
        }
    }
}

/// Configuration for the database connection pool.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use contacts_backend::outbound::persistence::PoolConfig;
///
/// let config = PoolConfig::new("postgres://contacts@localhost/contacts")
///     .with_max_size(4)
///     .with_connection_timeout(Duration::from_secs(5));
/// assert_eq!(config.max_size(), 4);
/// ```
#[derive(Debug, Clone)]
pub struct PoolConfig {
    database_url: String,
    max_size: u32,
    min_idle: Option<u32>,
    connection_timeout: Duration,
}

impl PoolConfig {
    /// Create a new configuration with the given database URL.
    ///
    /// Uses sensible defaults:
    /// - `max_size`: 10 connections
    /// - `min_idle`: 2 connections
    /// - `connection_timeout`: 30 seconds
    pub fn new(database_url: impl Into<String>) -> Self {
        Self {
            database_url: database_url.into(),
            max_size: 10,
            min_idle: Some(2),
            connection_timeout: Duration::from_secs(30),
        }
    }

    /// Set the maximum number of connections in the pool; zero is raised to one.
    pub fn with_max_size(mut self, max_size: u32) -> Self {
        self.max_size = max_size.max(1);
        self.min_idle = self.min_idle.map(|idle| idle.min(self.max_size));
        self
    }

    /// Set the minimum number of idle connections to maintain.
    pub fn with_min_idle(mut self, min_idle: Option<u32>) -> Self {
        self.min_idle = min_idle;
        self
    }

    /// Set the connection checkout timeout.
    pub fn with_connection_timeout(mut self, timeout: Duration) -> Self {
        self.connection_timeout = timeout;
        self
    }

    pub fn database_url(&self) -> &str {
        &self.database_url
    }

    pub fn max_size(&self) -> u32 {
        self.max_size
    }
}

/// Async connection pool shared by every Diesel repository.
#[derive(Clone)]
pub struct DbPool {
    inner: Pool<AsyncPgConnection>,
}

impl DbPool {
    /// Create a new connection pool with the given configuration.
    ///
    /// # Errors
    ///
    /// Returns `PoolError::Build` if the pool cannot be constructed (e.g.,
    /// invalid database URL or connection failure).
    pub async fn new(config: PoolConfig) -> Result<Self, PoolError> {
        let manager = AsyncDieselConnectionManager::<AsyncPgConnection>::new(&config.database_url);
        debug!(
            max_size = config.max_size,
            min_idle = ?config.min_idle,
            "building database pool"
        );

        let pool = Pool::builder()
            .max_size(config.max_size)
            .min_idle(config.min_idle)
            .connection_timeout(config.connection_timeout)
            .build(manager)
            .await
            .map_err(|err| PoolError::build(err.to_string()))?;

        Ok(Self { inner: pool })
    }

    /// Get a connection from the pool.
    ///
    /// # Errors
    ///
    /// Returns `PoolError::Checkout` if a connection cannot be obtained within
    /// the configured timeout.
    pub async fn get(
        &self,
    ) -> Result<PooledConnection<'_, AsyncPgConnection>, PoolError> {
        self.inner
            .get()
            .await
            .map_err(|err| PoolError::checkout(err.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn defaults_suit_a_small_service() {
        let config = PoolConfig::new("postgres://localhost/contacts");

        assert_eq!(config.database_url(), "postgres://localhost/contacts");
        assert_eq!(config.max_size(), 10);
        assert_eq!(config.min_idle, Some(2));
        assert_eq!(config.connection_timeout, Duration::from_secs(30));
    }

    #[rstest]
    #[case(0, 1, Some(1))]
    #[case(1, 1, Some(1))]
    #[case(20, 20, Some(2))]
    fn max_size_clamps_idle_connections(
        #[case] requested: u32,
        #[case] expected_max: u32,
        #[case] expected_idle: Option<u32>,
    ) {
        let config = PoolConfig::new("postgres://localhost/contacts").with_max_size(requested);
        assert_eq!(config.max_size(), expected_max);
        assert_eq!(config.min_idle, expected_idle);
    }

    #[rstest]
    fn errors_carry_their_cause() {
        assert!(PoolError::checkout("timed out").to_string().contains("timed out"));
        assert!(PoolError::build("bad url").to_string().contains("bad url"));
    }
}
