//! Configuration management for the ticket tracker.
//!
//! Loads configuration from environment variables. Tuning knobs have sensible
//! defaults; the database URL does not, because it carries credentials.

use itsm_postgres::PoolConfig;
use std::env;
use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;

/// Errors raised while loading configuration.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// A required variable is unset or empty.
    #[error("Missing required environment variable {0}")]
    Missing(&'static str),

    /// A variable is set but does not parse.
    #[error("Invalid value {value:?} for {key}")]
    Invalid {
        /// Variable name
        key: &'static str,
        /// Raw value that failed to parse
        value: String,
    },
}

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// `PostgreSQL` pool configuration
    pub postgres: PoolConfig,
    /// HTTP server configuration
    pub server: ServerConfig,
    /// Prometheus exporter configuration
    pub metrics: MetricsConfig,
}

/// Server configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// Host to bind to
    pub host: String,
    /// Port to bind to
    pub port: u16,
    /// Name reported by the root marker
    pub service_name: String,
    /// Per-request timeout
    pub request_timeout: Duration,
    /// Bound on draining in-flight requests after a shutdown signal, and
    /// separately on closing the pool afterwards
    pub shutdown_timeout: Duration,
}

impl ServerConfig {
    /// `host:port` to bind the HTTP listener to.
    #[must_use]
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Metrics exporter configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetricsConfig {
    /// Whether to start the Prometheus exporter
    pub enabled: bool,
    /// Metrics server host (for Prometheus scraping)
    pub host: String,
    /// Metrics server port
    pub port: u16,
}

impl Config {
    /// Load configuration from the process environment.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Missing`] if `DATABASE_URL` is unset and
    /// [`ConfigError::Invalid`] if any numeric or boolean variable fails to
    /// parse.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    ///
    /// # Errors
    ///
    /// Same as [`Config::from_env`].
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let url = lookup("DATABASE_URL")
            .filter(|url| !url.trim().is_empty())
            .ok_or(ConfigError::Missing("DATABASE_URL"))?;

        let postgres = PoolConfig {
            max_connections: parsed(&lookup, "DATABASE_MAX_CONNECTIONS", 10)?,
            min_connections: parsed(&lookup, "DATABASE_MIN_CONNECTIONS", 1)?,
            connect_timeout: seconds(&lookup, "DATABASE_CONNECT_TIMEOUT", 30)?,
            idle_timeout: seconds(&lookup, "DATABASE_IDLE_TIMEOUT", 600)?,
            statement_timeout: seconds(&lookup, "DATABASE_STATEMENT_TIMEOUT", 60)?,
            ..PoolConfig::new(url)
        };

        let server = ServerConfig {
            host: lookup("HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
            port: parsed(&lookup, "PORT", 8000)?,
            service_name: lookup("SERVICE_NAME").unwrap_or_else(|| "Airport ITSM".to_string()),
            request_timeout: seconds(&lookup, "REQUEST_TIMEOUT", 30)?,
            shutdown_timeout: seconds(&lookup, "SHUTDOWN_TIMEOUT", 30)?,
        };

        let metrics = MetricsConfig {
            enabled: parsed(&lookup, "METRICS_ENABLED", true)?,
            host: lookup("METRICS_HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
            port: parsed(&lookup, "METRICS_PORT", 9090)?,
        };

        Ok(Self {
            postgres,
            server,
            metrics,
        })
    }
}

fn parsed<F, T>(lookup: &F, key: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match lookup(key) {
        None => Ok(default),
        Some(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid { key, value }),
    }
}

fn seconds<F>(lookup: &F, key: &'static str, default: u64) -> Result<Duration, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    parsed(lookup, key, default).map(Duration::from_secs)
}
