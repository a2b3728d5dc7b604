//! Prometheus metrics exporter.
//!
//! The exporter serves `/metrics` on its own listener so scrapes never share
//! the request timeout or routing of the ticket API.
//!
//! # Example
//!
//! ```rust,no_run
//! use itsm_server::metrics::MetricsServer;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let mut server = MetricsServer::new("0.0.0.0:9090".parse()?);
//! server.start()?;
//! # Ok(())
//! # }
//! ```

use metrics::{describe_counter, describe_histogram};
use metrics_exporter_prometheus::{Matcher, PrometheusBuilder};
use std::net::SocketAddr;
use thiserror::Error;

/// Errors from metrics operations.
#[derive(Error, Debug)]
pub enum MetricsError {
    /// The configured address is not a socket address
    #[error("Invalid metrics address {0:?}")]
    Address(String),
    /// Failed to build metrics exporter
    #[error("Failed to build metrics exporter: {0}")]
    Build(String),
    /// Failed to install metrics exporter
    #[error("Failed to install metrics exporter: {0}")]
    Install(String),
}

/// Prometheus metrics server.
#[derive(Debug)]
pub struct MetricsServer {
    addr: SocketAddr,
    started: bool,
}

impl MetricsServer {
    /// Create a new metrics server bound to `addr` once started.
    #[must_use]
    pub const fn new(addr: SocketAddr) -> Self {
        Self {
            addr,
            started: false,
        }
    }

    /// Create a metrics server from a `host` and `port` pair.
    ///
    /// # Errors
    ///
    /// Returns [`MetricsError::Address`] if the pair does not form a socket
    /// address.
    pub fn from_host_port(host: &str, port: u16) -> Result<Self, MetricsError> {
        let raw = format!("{host}:{port}");
        raw.parse()
            .map(Self::new)
            .map_err(|_| MetricsError::Address(raw))
    }

    /// Address the exporter listens on.
    #[must_use]
    pub const fn addr(&self) -> SocketAddr {
        self.addr
    }

    /// Whether the exporter has been installed.
    #[must_use]
    pub const fn is_started(&self) -> bool {
        self.started
    }

    /// Describe all metrics and start the HTTP exporter.
    ///
    /// Must be called from within a Tokio runtime.
    ///
    /// # Errors
    ///
    /// Returns an error if the exporter cannot be built or installed.
    pub fn start(&mut self) -> Result<(), MetricsError> {
        let builder = PrometheusBuilder::new()
            .with_http_listener(self.addr)
            .set_buckets_for_metric(
                Matcher::Suffix("duration_seconds".to_string()),
                &[
                    0.001, 0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0,
                ],
            )
            .map_err(|e| MetricsError::Build(e.to_string()))?;

        match builder.install() {
            Ok(()) => {
                self.started = true;
                register_metrics();
                tracing::info!(
                    addr = %self.addr,
                    "Metrics server started - available at http://{}/metrics",
                    self.addr
                );
                Ok(())
            }
            Err(e) => {
                let err_msg = e.to_string();
                if err_msg.contains("already initialized") {
                    tracing::warn!("Metrics recorder already initialized, skipping re-initialization");
                    Ok(())
                } else {
                    Err(MetricsError::Install(err_msg))
                }
            }
        }
    }
}

/// Register all metric descriptions.
pub fn register_metrics() {
    describe_counter!(
        "itsm_tickets_created_total",
        "Total number of tickets created through the API"
    );
    describe_counter!(
        "itsm_ticket_store_operations_total",
        "Total number of ticket store operations by operation and outcome"
    );
    describe_histogram!(
        "itsm_ticket_store_duration_seconds",
        metrics::Unit::Seconds,
        "Ticket store operation duration in seconds"
    );
}
