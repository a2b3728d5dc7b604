//! The `Ticket` entity.
//!
//! A ticket is an IT-service-management record for a reported issue. Tickets
//! are created once and never mutated: `status` and `priority` are opaque
//! strings assigned at creation, and `created_at` is stamped by the store.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Status assigned to a ticket when none is supplied.
pub const DEFAULT_STATUS: &str = "OPEN";

/// Priority assigned to a ticket when none is supplied.
pub const DEFAULT_PRIORITY: &str = "P3";

/// Store-assigned ticket identity.
///
/// Serialized as a bare integer so clients see `"id": 42`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TicketId(i64);

impl TicketId {
    /// Wrap a raw id as assigned by the store.
    #[must_use]
    pub const fn new(id: i64) -> Self {
        Self(id)
    }

    /// The raw id value.
    #[must_use]
    pub const fn value(self) -> i64 {
        self.0
    }
}

impl fmt::Display for TicketId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A persisted ticket.
///
/// Serializes with exactly the five public fields:
///
/// ```json
/// {
///   "id": 1,
///   "title": "Broken jet bridge",
///   "status": "OPEN",
///   "priority": "P3",
///   "created_at": "2026-10-19T08:30:00Z"
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ticket {
    /// Primary key, unique and immutable once assigned.
    pub id: TicketId,
    /// Free-form title. Accepted as-is, including the empty string.
    pub title: String,
    /// Lifecycle status (`OPEN` unless supplied).
    pub status: String,
    /// Priority label (`P3` unless supplied).
    pub priority: String,
    /// Insertion time, set exactly once.
    pub created_at: DateTime<Utc>,
}

/// Payload for inserting a new ticket.
///
/// Status and priority default to [`DEFAULT_STATUS`] and
/// [`DEFAULT_PRIORITY`]. The id and creation time are always chosen by the
/// store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTicket {
    /// Ticket title.
    pub title: String,
    /// Initial status.
    pub status: String,
    /// Initial priority.
    pub priority: String,
}

impl NewTicket {
    /// Create a payload with the given title and default status/priority.
    #[must_use]
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            status: DEFAULT_STATUS.to_string(),
            priority: DEFAULT_PRIORITY.to_string(),
        }
    }

    /// Override the initial status.
    #[must_use]
    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.status = status.into();
        self
    }

    /// Override the initial priority.
    #[must_use]
    pub fn with_priority(mut self, priority: impl Into<String>) -> Self {
        self.priority = priority.into();
        self
    }

    /// Materialize the payload into a ticket with the given identity.
    ///
    /// Used by stores that assign ids and timestamps in-process.
    #[must_use]
    pub fn into_ticket(self, id: TicketId, created_at: DateTime<Utc>) -> Ticket {
        Ticket {
            id,
            title: self.title,
            status: self.status,
            priority: self.priority,
            created_at,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_new_ticket_defaults() {
        let new = NewTicket::new("Broken jet bridge");
        assert_eq!(new.title, "Broken jet bridge");
        assert_eq!(new.status, "OPEN");
        assert_eq!(new.priority, "P3");
    }

    #[test]
    fn test_new_ticket_overrides() {
        let new = NewTicket::new("Baggage belt stalled")
            .with_status("IN_PROGRESS")
            .with_priority("P1");
        assert_eq!(new.status, "IN_PROGRESS");
        assert_eq!(new.priority, "P1");
    }

    #[test]
    fn test_empty_title_is_accepted() {
        let new = NewTicket::new("");
        assert_eq!(new.title, "");
    }

    #[test]
    fn test_ticket_serializes_five_fields() {
        let created_at = Utc.with_ymd_and_hms(2026, 10, 19, 8, 30, 0).unwrap();
        let ticket = NewTicket::new("Gate 12 display dark").into_ticket(TicketId::new(7), created_at);

        let json = serde_json::to_value(&ticket).unwrap();
        let object = json.as_object().unwrap();

        assert_eq!(object.len(), 5);
        assert_eq!(json["id"], 7);
        assert_eq!(json["title"], "Gate 12 display dark");
        assert_eq!(json["status"], "OPEN");
        assert_eq!(json["priority"], "P3");
        assert_eq!(json["created_at"], "2026-10-19T08:30:00Z");
    }

    #[test]
    fn test_ticket_id_display() {
        assert_eq!(TicketId::new(42).to_string(), "42");
        assert_eq!(TicketId::new(42).value(), 42);
    }
}
