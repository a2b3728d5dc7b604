//! Router configuration.

use crate::handlers::{create_ticket, health_check, list_tickets, readiness_check, root};
use crate::middleware::correlation_id;
use crate::state::AppState;
use axum::{Router, http::StatusCode, middleware::from_fn, routing::get};
use std::time::Duration;
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};

/// Build the complete Axum router.
///
/// Routes:
/// - `GET /` root liveness marker
/// - `GET /health`, `GET /ready` probes
/// - `POST /tickets/`, `GET /tickets/` (also without the trailing slash)
///
/// Every response passes through HTTP tracing and carries an
/// `X-Correlation-ID` header. Requests running longer than
/// `request_timeout` are answered with 408; the correlation layer sits
/// outside the timeout so those responses are tagged too.
pub fn build_router(state: AppState, request_timeout: Duration) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/health", get(health_check))
        .route("/ready", get(readiness_check))
        .route("/tickets/", get(list_tickets).post(create_ticket))
        .route("/tickets", get(list_tickets).post(create_ticket))
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            request_timeout,
        ))
        .layer(TraceLayer::new_for_http())
        .layer(from_fn(correlation_id))
        .with_state(state)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::middleware::CORRELATION_ID_HEADER;
    use axum::{
        body::Body,
        http::{Method, Request},
    };
    use itsm_core::store::{StorageError, StoreFuture, TicketStore};
    use itsm_core::ticket::{NewTicket, Ticket};
    use itsm_testing::InMemoryTicketStore;
    use std::sync::Arc;
    use tower::ServiceExt;

    fn app(store: &InMemoryTicketStore) -> Router {
        build_router(
            AppState::new(Arc::new(store.clone()), "Airport ITSM"),
            Duration::from_secs(5),
        )
    }

    /// Store whose every call outlives any reasonable request timeout.
    struct StalledStore;

    impl TicketStore for StalledStore {
        fn insert(&self, _ticket: NewTicket) -> StoreFuture<'_, Ticket> {
            Box::pin(async {
                tokio::time::sleep(Duration::from_secs(5)).await;
                Err(StorageError::Unavailable("stalled".to_string()))
            })
        }

        fn list_all(&self) -> StoreFuture<'_, Vec<Ticket>> {
            Box::pin(async {
                tokio::time::sleep(Duration::from_secs(5)).await;
                Ok(Vec::new())
            })
        }

        fn health_check(&self) -> StoreFuture<'_, ()> {
            Box::pin(async {
                tokio::time::sleep(Duration::from_secs(5)).await;
                Ok(())
            })
        }
    }

    async fn body_json(response: axum::response::Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_root_marker() {
        let store = InMemoryTicketStore::new();
        let request = Request::builder().uri("/").body(Body::empty()).unwrap();

        let response = app(&store).oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert!(response.headers().contains_key(CORRELATION_ID_HEADER));
        assert_eq!(
            body_json(response).await,
            serde_json::json!({"system": "Airport ITSM Running"})
        );
    }

    #[tokio::test]
    async fn test_create_with_query_title() {
        let store = InMemoryTicketStore::new();
        let request = Request::builder()
            .method(Method::POST)
            .uri("/tickets/?title=Broken%20jet%20bridge")
            .body(Body::empty())
            .unwrap();

        let response = app(&store).oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            body_json(response).await,
            serde_json::json!({"message": "ticket created"})
        );
        assert_eq!(store.tickets()[0].title, "Broken jet bridge");
    }

    #[tokio::test]
    async fn test_create_without_title_is_422() {
        let store = InMemoryTicketStore::new();
        let request = Request::builder()
            .method(Method::POST)
            .uri("/tickets/")
            .body(Body::empty())
            .unwrap();

        let response = app(&store).oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body_json(response).await["code"], "VALIDATION_ERROR");
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn test_tickets_without_trailing_slash() {
        let store = InMemoryTicketStore::new();
        let request = Request::builder()
            .uri("/tickets")
            .body(Body::empty())
            .unwrap();

        let response = app(&store).oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await, serde_json::json!([]));
    }

    #[tokio::test]
    async fn test_unsupported_method_is_rejected() {
        let store = InMemoryTicketStore::new();
        let request = Request::builder()
            .method(Method::DELETE)
            .uri("/tickets/")
            .body(Body::empty())
            .unwrap();

        let response = app(&store).oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
    }

    #[tokio::test]
    async fn test_slow_store_times_out_with_correlation_id() {
        let app = build_router(
            AppState::new(Arc::new(StalledStore), "Airport ITSM"),
            Duration::from_millis(50),
        );
        let request = Request::builder()
            .uri("/tickets/")
            .body(Body::empty())
            .unwrap();

        let response = app.oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::REQUEST_TIMEOUT);
        let header = response
            .headers()
            .get(CORRELATION_ID_HEADER)
            .expect("timed-out response should carry a correlation id");
        assert!(uuid::Uuid::parse_str(header.to_str().unwrap()).is_ok());
    }
}
