//! Axum HTTP surface for the Airport ITSM ticket tracker.
//!
//! Maps two ticket operations onto the injected `TicketStore`, plus a root
//! marker and health probes.
//!
//! # Request Flow
//!
//! 1. **HTTP Request** arrives at an Axum handler
//! 2. **Extract** query parameters and the shared [`AppState`]
//! 3. **Call** the ticket store exactly once
//! 4. **Map** the result (or [`AppError`]) to an HTTP response
//!
//! # Example
//!
//! ```no_run
//! use itsm_web::{AppState, build_router};
//! use itsm_testing::InMemoryTicketStore;
//! use std::sync::Arc;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let state = AppState::new(Arc::new(InMemoryTicketStore::new()), "Airport ITSM");
//! let app = build_router(state, std::time::Duration::from_secs(30));
//!
//! let listener = tokio::net::TcpListener::bind("127.0.0.1:8000").await?;
//! axum::serve(listener, app).await?;
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod error;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;

// Re-export key types for convenience
pub use error::{AppError, ErrorCode};
pub use middleware::{CORRELATION_ID_HEADER, CorrelationId, correlation_id};
pub use router::build_router;
pub use state::AppState;

/// Result type alias for web handlers.
pub type WebResult<T> = Result<T, AppError>;
