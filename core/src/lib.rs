//! # Airport ITSM Core
//!
//! Core types and traits for the Airport ITSM ticket tracker.
//!
//! This crate provides the domain vocabulary shared by every other crate in
//! the workspace:
//!
//! - [`ticket`]: the `Ticket` entity, its identity and the insert payload
//! - [`store`]: the `TicketStore` persistence abstraction and `StorageError`
//! - [`environment`]: injected dependencies such as the `Clock`
//!
//! ## Architecture
//!
//! ```text
//! HTTP handler (itsm-web)
//!        │
//!        ▼
//! Arc<dyn TicketStore>  ── PostgresTicketStore (itsm-postgres)
//!                       └─ InMemoryTicketStore (itsm-testing)
//! ```
//!
//! ## Example
//!
//! ```no_run
//! use itsm_core::store::{StorageError, TicketStore};
//! use itsm_core::ticket::NewTicket;
//!
//! async fn report<S: TicketStore>(store: &S) -> Result<(), StorageError> {
//!     let ticket = store.insert(NewTicket::new("Broken jet bridge")).await?;
//!     assert_eq!(ticket.status, "OPEN");
//!     Ok(())
//! }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod store;
pub mod ticket;

pub use store::{StorageError, TicketStore};
pub use ticket::{DEFAULT_PRIORITY, DEFAULT_STATUS, NewTicket, Ticket, TicketId};

/// Environment module - Dependency injection traits
///
/// External dependencies that affect observable output are abstracted behind
/// traits so tests can swap them for deterministic versions.
pub mod environment {
    use chrono::{DateTime, Utc};

    /// Clock trait - abstracts time operations for testability
    ///
    /// # Examples
    ///
    /// ```
    /// use itsm_core::environment::{Clock, SystemClock};
    ///
    /// let clock = SystemClock;
    /// let before = chrono::Utc::now();
    /// assert!(clock.now() >= before);
    /// ```
    pub trait Clock: Send + Sync {
        /// Get the current time
        fn now(&self) -> DateTime<Utc>;
    }

    /// Production clock backed by the system time.
    #[derive(Debug, Clone, Copy, Default)]
    pub struct SystemClock;

    impl Clock for SystemClock {
        fn now(&self) -> DateTime<Utc> {
            Utc::now()
        }
    }
}
