//! HTTP request handlers.
//!
//! This module contains all HTTP handlers organized by concern.

pub mod health;
pub mod tickets;

pub use health::{health_check, readiness_check, root};
pub use tickets::{create_ticket, list_tickets};
