//! Process wiring: store, router, listener and shutdown.

use crate::config::{Config, ServerConfig};
use crate::metrics::MetricsServer;
use anyhow::Context;
use axum::Router;
use itsm_postgres::PostgresTicketStore;
use itsm_web::{AppState, build_router};
use std::future::IntoFuture;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::sync::watch;
use tracing::{error, info, warn};

/// Build the ticket router with the configured per-request timeout.
///
/// Requests exceeding `request_timeout` are answered with 408.
pub fn router(state: AppState, server: &ServerConfig) -> Router {
    build_router(state, server.request_timeout)
}

/// Run the ticket tracker until a shutdown signal arrives.
///
/// # Errors
///
/// Fails if the metrics exporter, the database connection, the schema
/// bootstrap or the HTTP listener cannot be set up.
pub async fn run(config: Config) -> anyhow::Result<()> {
    if config.metrics.enabled {
        let mut metrics =
            MetricsServer::from_host_port(&config.metrics.host, config.metrics.port)?;
        metrics.start()?;
    }

    info!(database = %config.postgres.redacted_url(), "Connecting to database");
    let store = PostgresTicketStore::connect(&config.postgres)
        .await
        .context("Failed to connect to database")?;
    store
        .migrate()
        .await
        .context("Failed to create tickets schema")?;
    info!("Database ready");

    let state = AppState::new(Arc::new(store.clone()), config.server.service_name.as_str());
    let app = router(state, &config.server);

    let addr = config.server.bind_address();
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    info!(address = %addr, "Ticket API listening");

    let (stopping_tx, mut stopping_rx) = watch::channel(false);
    let server = axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            shutdown_signal().await;
            let _ = stopping_tx.send(true);
        })
        .into_future();
    let drain_deadline = async {
        if stopping_rx.wait_for(|stopping| *stopping).await.is_ok() {
            tokio::time::sleep(config.server.shutdown_timeout).await;
        } else {
            std::future::pending::<()>().await;
        }
    };

    let served = tokio::select! {
        result = server => result,
        () = drain_deadline => {
            warn!(
                timeout = ?config.server.shutdown_timeout,
                "In-flight requests did not drain in time"
            );
            Ok(())
        }
    };
    if let Err(e) = &served {
        error!(error = %e, "HTTP server error");
    }

    info!("Closing database pool");
    if tokio::time::timeout(config.server.shutdown_timeout, store.close())
        .await
        .is_err()
    {
        warn!(
            timeout = ?config.server.shutdown_timeout,
            "Database pool did not close in time"
        );
    }

    served.context("HTTP server failed")?;
    info!("Server stopped");
    Ok(())
}

/// Resolve on Ctrl+C or SIGTERM.
pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => info!("Received Ctrl+C, shutting down"),
        () = terminate => info!("Received SIGTERM, shutting down"),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use itsm_testing::InMemoryTicketStore;
    use std::time::Duration;
    use tower::ServiceExt;

    fn server_config() -> ServerConfig {
        ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 0,
            service_name: "Airport ITSM".to_string(),
            request_timeout: Duration::from_secs(5),
            shutdown_timeout: Duration::from_secs(5),
        }
    }

    #[tokio::test]
    async fn test_router_serves_root_with_configured_name() {
        let store = InMemoryTicketStore::new();
        let config = server_config();
        let state = AppState::new(Arc::new(store), config.service_name.as_str());

        let response = router(state, &config)
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        assert_eq!(&bytes[..], br#"{"system":"Airport ITSM Running"}"#);
    }

    #[tokio::test]
    async fn test_router_keeps_ticket_routes() {
        let store = InMemoryTicketStore::new();
        let state = AppState::new(Arc::new(store.clone()), "Airport ITSM");

        let response = router(state, &server_config())
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/tickets/?title=Gate%2012%20display%20dark")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(store.len(), 1);
    }
}
