//! In-memory ticket store testing utilities
//!
//! Provides a fast, deterministic [`TicketStore`] for handler and service
//! tests that should not need a database.

#![allow(clippy::unwrap_used)] // Test infrastructure uses unwrap for simplicity
#![allow(clippy::missing_panics_doc)] // Lock poisoning only follows a panicking test

use itsm_core::environment::{Clock, SystemClock};
use itsm_core::store::{StorageError, StoreFuture, TicketStore};
use itsm_core::ticket::{NewTicket, Ticket, TicketId};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, RwLock};

/// In-memory ticket store for fast, deterministic testing.
///
/// Ids are assigned sequentially starting at 1 and `created_at` comes from the
/// injected [`Clock`]. Calling [`set_unavailable`](Self::set_unavailable)
/// simulates a storage outage: every operation then fails with
/// [`StorageError::Unavailable`] and nothing is written.
///
/// Clones share the same underlying rows.
///
/// # Example
///
/// ```
/// use itsm_core::store::TicketStore;
/// use itsm_core::ticket::NewTicket;
/// use itsm_testing::InMemoryTicketStore;
///
/// # tokio_test::block_on(async {
/// let store = InMemoryTicketStore::new();
/// store.set_unavailable(true);
///
/// assert!(store.insert(NewTicket::new("Gate 4 PA silent")).await.is_err());
/// assert!(store.is_empty());
/// # });
/// ```
#[derive(Clone)]
pub struct InMemoryTicketStore {
    tickets: Arc<RwLock<Vec<Ticket>>>,
    clock: Arc<dyn Clock>,
    unavailable: Arc<AtomicBool>,
}

impl InMemoryTicketStore {
    /// Create a new empty store stamping tickets with the system clock
    #[must_use]
    pub fn new() -> Self {
        Self::with_clock(SystemClock)
    }

    /// Create a new empty store stamping tickets with the given clock
    #[must_use]
    pub fn with_clock(clock: impl Clock + 'static) -> Self {
        Self {
            tickets: Arc::new(RwLock::new(Vec::new())),
            clock: Arc::new(clock),
            unavailable: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Simulate the backing store going down (or coming back)
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    /// Number of stored tickets, regardless of availability
    #[must_use]
    pub fn len(&self) -> usize {
        self.tickets.read().unwrap().len()
    }

    /// Check if the store is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tickets.read().unwrap().is_empty()
    }

    /// Snapshot of every stored ticket, regardless of availability
    ///
    /// Useful for asserting on writes without going through the trait.
    #[must_use]
    pub fn tickets(&self) -> Vec<Ticket> {
        self.tickets.read().unwrap().clone()
    }

    fn check_available(&self) -> Result<(), StorageError> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(StorageError::Unavailable(
                "in-memory store marked unavailable".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for InMemoryTicketStore {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for InMemoryTicketStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InMemoryTicketStore")
            .field("len", &self.len())
            .field("unavailable", &self.unavailable.load(Ordering::SeqCst))
            .finish_non_exhaustive()
    }
}

impl TicketStore for InMemoryTicketStore {
    fn insert(&self, ticket: NewTicket) -> StoreFuture<'_, Ticket> {
        Box::pin(async move {
            self.check_available()?;

            let mut tickets = self.tickets.write().unwrap();
            // Rows are never deleted, so the next id is always len + 1.
            let id = i64::try_from(tickets.len())
                .map_err(|e| StorageError::Query(format!("id sequence exhausted: {e}")))?
                + 1;
            let ticket = ticket.into_ticket(TicketId::new(id), self.clock.now());
            tickets.push(ticket.clone());
            Ok(ticket)
        })
    }

    fn list_all(&self) -> StoreFuture<'_, Vec<Ticket>> {
        Box::pin(async move {
            self.check_available()?;
            Ok(self.tickets.read().unwrap().clone())
        })
    }

    fn health_check(&self) -> StoreFuture<'_, ()> {
        Box::pin(async move { self.check_available() })
    }
}
