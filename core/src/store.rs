//! Ticket store trait and related types.
//!
//! The store owns the durable representation of tickets. It offers exactly
//! what the tracker needs:
//!
//! - Insert one ticket (the store assigns id and creation time)
//! - List every ticket
//! - A cheap connectivity probe for readiness checks
//!
//! # Implementations
//!
//! - `PostgresTicketStore` (in `itsm-postgres`): production implementation
//! - `InMemoryTicketStore` (in `itsm-testing`): fast, deterministic testing
//!
//! # Example
//!
//! ```no_run
//! use itsm_core::store::{StorageError, TicketStore};
//! use itsm_core::ticket::NewTicket;
//! use std::sync::Arc;
//!
//! async fn example(store: Arc<dyn TicketStore>) -> Result<(), StorageError> {
//!     store.insert(NewTicket::new("Runway light out")).await?;
//!     let all = store.list_all().await?;
//!     assert!(!all.is_empty());
//!     Ok(())
//! }
//! ```

use crate::ticket::{NewTicket, Ticket};
use std::future::Future;
use std::pin::Pin;
use thiserror::Error;

/// Errors that can occur during ticket store operations.
///
/// Every variant means the operation had no visible effect: an insert that
/// fails never leaves a partial row behind.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StorageError {
    /// The backing store could not be reached (pool timeout, I/O, TLS).
    #[error("Storage unavailable: {0}")]
    Unavailable(String),

    /// A statement or transaction failed.
    #[error("Storage query failed: {0}")]
    Query(String),

    /// Schema bootstrap failed or a row did not match the expected layout.
    #[error("Storage schema error: {0}")]
    Schema(String),

    /// The connection settings are unusable, e.g. a malformed database URL.
    #[error("Invalid storage configuration: {0}")]
    Configuration(String),
}

impl StorageError {
    /// Whether the error indicates the store itself is unreachable.
    #[must_use]
    pub const fn is_unavailable(&self) -> bool {
        matches!(self, Self::Unavailable(_))
    }
}

/// Boxed future returned by [`TicketStore`] methods.
pub type StoreFuture<'a, T> = Pin<Box<dyn Future<Output = Result<T, StorageError>> + Send + 'a>>;

/// Persistence abstraction for tickets.
///
/// # Thread Safety
///
/// Implementations must be `Send + Sync`; a single instance is shared across
/// all in-flight requests.
///
/// # Dyn Compatibility
///
/// Methods return boxed futures instead of using `async fn` so the store can
/// be held as `Arc<dyn TicketStore>` in application state.
pub trait TicketStore: Send + Sync {
    /// Persist a new ticket.
    ///
    /// The write is committed before the future resolves. The returned ticket
    /// carries the store-assigned id and creation time.
    ///
    /// # Errors
    ///
    /// - `Unavailable`: the store cannot be reached
    /// - `Query`: the insert or commit failed (nothing was persisted)
    fn insert(&self, ticket: NewTicket) -> StoreFuture<'_, Ticket>;

    /// List every stored ticket.
    ///
    /// Returns tickets in insertion order. An empty store yields an empty
    /// vector, not an error.
    ///
    /// # Errors
    ///
    /// - `Unavailable`: the store cannot be reached
    /// - `Query`: the read failed
    fn list_all(&self) -> StoreFuture<'_, Vec<Ticket>>;

    /// Verify the store is reachable.
    ///
    /// # Errors
    ///
    /// Returns the storage error that prevented the round-trip.
    fn health_check(&self) -> StoreFuture<'_, ()>;
}
