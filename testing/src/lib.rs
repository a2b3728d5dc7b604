//! # Airport ITSM Testing
//!
//! Testing utilities for the Airport ITSM ticket tracker.
//!
//! This crate provides:
//! - [`InMemoryTicketStore`]: a `TicketStore` with no database behind it
//! - [`FixedClock`]: deterministic time for `created_at` assertions
//! - proptest strategies for ticket payloads
//!
//! ## Example
//!
//! ```
//! use itsm_core::store::TicketStore;
//! use itsm_core::ticket::NewTicket;
//! use itsm_testing::{InMemoryTicketStore, test_clock};
//!
//! # tokio_test::block_on(async {
//! let store = InMemoryTicketStore::with_clock(test_clock());
//! store.insert(NewTicket::new("Broken jet bridge")).await.unwrap();
//!
//! let tickets = store.list_all().await.unwrap();
//! assert_eq!(tickets.len(), 1);
//! # });
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

use chrono::{DateTime, Utc};
use itsm_core::environment::Clock;

pub mod ticket_store_mocks;

/// Mock implementations of environment traits.
pub mod mocks {
    use super::{Clock, DateTime, Utc};

    /// Clock pinned to one instant, so in-memory `created_at` values are
    /// predictable.
    ///
    /// ```
    /// use itsm_testing::mocks::FixedClock;
    /// use itsm_core::environment::Clock;
    /// use chrono::{TimeZone, Utc};
    ///
    /// let opened = Utc.with_ymd_and_hms(2026, 10, 19, 6, 45, 0).unwrap();
    /// let clock = FixedClock::new(opened);
    /// assert_eq!(clock.now(), opened);
    /// ```
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct FixedClock {
        instant: DateTime<Utc>,
    }

    impl FixedClock {
        /// Pin the clock to `instant`.
        #[must_use]
        pub const fn new(instant: DateTime<Utc>) -> Self {
            Self { instant }
        }

        /// Return a clock moved forward by `seconds`.
        #[must_use]
        pub fn advanced_by(self, seconds: i64) -> Self {
            Self::new(self.instant + chrono::Duration::seconds(seconds))
        }
    }

    impl Clock for FixedClock {
        fn now(&self) -> DateTime<Utc> {
            self.instant
        }
    }

    /// Clock pinned at 2026-01-01T00:00:00Z.
    #[must_use]
    pub fn test_clock() -> FixedClock {
        FixedClock::new(DateTime::<Utc>::default() + chrono::Duration::seconds(1_767_225_600))
    }
}

/// Property-based testing utilities using proptest.
pub mod properties {
    use itsm_core::ticket::NewTicket;
    use proptest::prelude::*;

    /// Arbitrary titles, including empty and non-ASCII strings.
    ///
    /// Titles are never validated, so the strategy does not filter anything.
    pub fn ticket_title() -> impl Strategy<Value = String> {
        prop_oneof![
            Just(String::new()),
            "[A-Za-z0-9 ]{1,40}",
            any::<String>(),
        ]
    }

    /// Arbitrary insert payloads with default status and priority.
    pub fn new_ticket() -> impl Strategy<Value = NewTicket> {
        ticket_title().prop_map(NewTicket::new)
    }
}

pub use mocks::{FixedClock, test_clock};
pub use ticket_store_mocks::InMemoryTicketStore;
