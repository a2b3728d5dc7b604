//! Connection pool configuration.

use crate::error::storage_error;
use itsm_core::store::StorageError;
use sqlx::postgres::{PgConnectOptions, PgPoolOptions};
use std::str::FromStr;
use std::time::Duration;

/// `PostgreSQL` pool settings.
///
/// The connection URL carries credentials, so it is never printed by the
/// `Debug` implementation. Use [`PoolConfig::redacted_url`] for logging.
#[derive(Clone, PartialEq, Eq)]
pub struct PoolConfig {
    /// `PostgreSQL` connection URL
    pub url: String,
    /// Maximum number of connections in the pool
    pub max_connections: u32,
    /// Minimum number of idle connections kept open
    pub min_connections: u32,
    /// How long to wait for a pooled connection before failing
    pub connect_timeout: Duration,
    /// Connections idle longer than this are closed
    pub idle_timeout: Duration,
    /// Server-side `statement_timeout` applied to every session
    pub statement_timeout: Duration,
}

impl PoolConfig {
    /// Create a configuration for the given URL with default pool settings.
    #[must_use]
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            max_connections: 10,
            min_connections: 1,
            connect_timeout: Duration::from_secs(30),
            idle_timeout: Duration::from_secs(600),
            statement_timeout: Duration::from_secs(60),
        }
    }

    /// Override the acquire timeout.
    #[must_use]
    pub const fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    /// Override the pool size bounds.
    #[must_use]
    pub const fn with_pool_size(mut self, min_connections: u32, max_connections: u32) -> Self {
        self.min_connections = min_connections;
        self.max_connections = max_connections;
        self
    }

    /// The URL with any `user:password@` prefix removed.
    #[must_use]
    pub fn redacted_url(&self) -> &str {
        self.url.rsplit('@').next().unwrap_or(&self.url)
    }

    pub(crate) fn pool_options(&self) -> PgPoolOptions {
        PgPoolOptions::new()
            .max_connections(self.max_connections)
            .min_connections(self.min_connections)
            .acquire_timeout(self.connect_timeout)
            .idle_timeout(self.idle_timeout)
    }

    pub(crate) fn connect_options(&self) -> Result<PgConnectOptions, StorageError> {
        let options = PgConnectOptions::from_str(&self.url)
            .map_err(|e| storage_error("Invalid database URL", &e))?;

        Ok(options.options([(
            "statement_timeout",
            self.statement_timeout.as_millis(),
        )]))
    }
}

impl std::fmt::Debug for PoolConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PoolConfig")
            .field("url", &self.redacted_url())
            .field("max_connections", &self.max_connections)
            .field("min_connections", &self.min_connections)
            .field("connect_timeout", &self.connect_timeout)
            .field("idle_timeout", &self.idle_timeout)
            .field("statement_timeout", &self.statement_timeout)
            .finish()
    }
}
