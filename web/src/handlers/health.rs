//! Liveness and readiness endpoints.
//!
//! These endpoints are used by load balancers and monitoring systems
//! to verify service health.

use crate::state::AppState;
use axum::{Json, extract::State, http::StatusCode};
use serde::{Deserialize, Serialize};

/// Root marker response.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct SystemResponse {
    /// `"<service name> Running"`
    pub system: String,
}

/// Root liveness marker.
///
/// # Endpoint
///
/// ```text
/// GET /
/// ```
///
/// # Response
///
/// ```json
/// {"system": "Airport ITSM Running"}
/// ```
#[allow(clippy::unused_async)]
pub async fn root(State(state): State<AppState>) -> Json<SystemResponse> {
    Json(SystemResponse {
        system: format!("{} Running", state.service_name()),
    })
}

/// Health check response.
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Service status
    pub status: String,
    /// Service version
    pub version: String,
}

/// Simple health check endpoint (for basic liveness).
///
/// Returns 200 OK if the process is serving requests. This endpoint does
/// NOT check the database.
///
/// # Endpoint
///
/// ```text
/// GET /health
/// ```
#[allow(clippy::unused_async)]
pub async fn health_check() -> (StatusCode, Json<HealthResponse>) {
    (
        StatusCode::OK,
        Json(HealthResponse {
            status: "ok".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }),
    )
}

/// Readiness check response.
#[derive(Debug, Serialize, Deserialize)]
pub struct ReadinessResponse {
    /// Overall readiness status
    pub ready: bool,
    /// Database connectivity
    pub database: bool,
}

/// Readiness check endpoint.
///
/// Performs a round-trip against the ticket store.
///
/// # Status Codes
///
/// - 200 OK: store reachable
/// - 503 Service Unavailable: store unreachable
///
/// # Endpoint
///
/// ```text
/// GET /ready
/// ```
pub async fn readiness_check(
    State(state): State<AppState>,
) -> (StatusCode, Json<ReadinessResponse>) {
    let database = match state.store().health_check().await {
        Ok(()) => true,
        Err(e) => {
            tracing::warn!(error = %e, "Readiness check failed");
            false
        }
    };

    let status = if database {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (
        status,
        Json(ReadinessResponse {
            ready: database,
            database,
        }),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use itsm_testing::InMemoryTicketStore;
    use std::sync::Arc;

    fn state_with(store: InMemoryTicketStore) -> AppState {
        AppState::new(Arc::new(store), "Airport ITSM")
    }

    #[tokio::test]
    async fn test_root_marker() {
        let Json(body) = root(State(state_with(InMemoryTicketStore::new()))).await;
        assert_eq!(body.system, "Airport ITSM Running");
    }

    #[tokio::test]
    async fn test_simple_health_check() {
        let (status, Json(body)) = health_check().await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body.status, "ok");
    }

    #[tokio::test]
    async fn test_readiness_with_available_store() {
        let (status, Json(body)) =
            readiness_check(State(state_with(InMemoryTicketStore::new()))).await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.ready);
        assert!(body.database);
    }

    #[tokio::test]
    async fn test_readiness_with_unavailable_store() {
        let store = InMemoryTicketStore::new();
        store.set_unavailable(true);

        let (status, Json(body)) = readiness_check(State(state_with(store))).await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert!(!body.ready);
        assert!(!body.database);
    }
}
