//! Airport ITSM ticket tracker server.
//!
//! Loads [`Config`] from the environment, connects the `PostgreSQL` ticket
//! store, bootstraps the schema and serves the ticket API until shutdown.

#![forbid(unsafe_code)]
#![warn(missing_docs, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod app;
pub mod config;
pub mod metrics;

pub use app::{router, run, shutdown_signal};
pub use config::{Config, ConfigError, MetricsConfig, ServerConfig};
