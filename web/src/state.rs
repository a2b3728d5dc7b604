//! Application state for Axum handlers.

use itsm_core::store::TicketStore;
use std::sync::Arc;

/// Application state shared across all HTTP handlers.
///
/// Holds no ticket data of its own: every request goes to the injected
/// store. Cloning is cheap (two `Arc` bumps).
///
/// # Examples
///
/// ```
/// use itsm_web::AppState;
/// use itsm_testing::InMemoryTicketStore;
/// use std::sync::Arc;
///
/// let state = AppState::new(Arc::new(InMemoryTicketStore::new()), "Airport ITSM");
/// assert_eq!(state.service_name(), "Airport ITSM");
/// ```
#[derive(Clone)]
pub struct AppState {
    store: Arc<dyn TicketStore>,
    service_name: Arc<str>,
}

impl AppState {
    /// Create a new application state.
    ///
    /// # Arguments
    ///
    /// - `store`: ticket store used by every handler
    /// - `service_name`: name reported by the root liveness marker
    #[must_use]
    pub fn new(store: Arc<dyn TicketStore>, service_name: impl Into<Arc<str>>) -> Self {
        Self {
            store,
            service_name: service_name.into(),
        }
    }

    /// The injected ticket store.
    #[must_use]
    pub fn store(&self) -> &dyn TicketStore {
        self.store.as_ref()
    }

    /// Name reported by `GET /`.
    #[must_use]
    pub fn service_name(&self) -> &str {
        &self.service_name
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("service_name", &self.service_name)
            .finish_non_exhaustive()
    }
}
