//! Ticket API endpoints.
//!
//! - POST /tickets/?title=... - Create a ticket
//! - GET /tickets/ - List every ticket

use crate::WebResult;
use crate::error::AppError;
use crate::state::AppState;
use axum::{
    Json,
    extract::{Query, State, rejection::QueryRejection},
};
use itsm_core::ticket::{NewTicket, Ticket};
use serde::{Deserialize, Serialize};

/// Message returned when a ticket is created.
pub const TICKET_CREATED: &str = "ticket created";

/// Query parameters for creating a ticket.
#[derive(Debug, Deserialize)]
pub struct CreateTicketParams {
    /// Ticket title. Required, otherwise unchecked.
    pub title: String,
}

/// Acknowledgement body.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct MessageResponse {
    /// Human-readable outcome
    pub message: String,
}

/// Create a ticket.
///
/// The created ticket is not echoed back; clients list tickets to see it.
///
/// # Endpoint
///
/// ```text
/// POST /tickets/?title=Broken%20jet%20bridge
/// ```
///
/// # Response
///
/// ```json
/// {"message": "ticket created"}
/// ```
///
/// # Errors
///
/// - 422 if `title` is missing
/// - 503 / 500 if the ticket store fails
pub async fn create_ticket(
    State(state): State<AppState>,
    params: Result<Query<CreateTicketParams>, QueryRejection>,
) -> WebResult<Json<MessageResponse>> {
    let Query(params) = params.map_err(|rejection| AppError::validation(rejection.body_text()))?;

    let ticket = state.store().insert(NewTicket::new(params.title)).await?;

    metrics::counter!("itsm_tickets_created_total").increment(1);
    tracing::info!(ticket_id = %ticket.id, "Ticket created");

    Ok(Json(MessageResponse {
        message: TICKET_CREATED.to_string(),
    }))
}

/// List every ticket.
///
/// # Endpoint
///
/// ```text
/// GET /tickets/
/// ```
///
/// # Response
///
/// ```json
/// [
///   {"id": 1, "title": "Broken jet bridge", "status": "OPEN", "priority": "P3",
///    "created_at": "2026-10-19T08:30:00Z"}
/// ]
/// ```
///
/// # Errors
///
/// - 503 / 500 if the ticket store fails
pub async fn list_tickets(State(state): State<AppState>) -> WebResult<Json<Vec<Ticket>>> {
    let tickets = state.store().list_all().await?;
    tracing::debug!(count = tickets.len(), "Tickets listed");
    Ok(Json(tickets))
}
