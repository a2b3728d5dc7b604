//! Schema bootstrap for the `tickets` table.
//!
//! The schema is part of the storage contract and is created at process
//! startup if absent. Every statement is `IF NOT EXISTS`, so bootstrapping an
//! already-initialized database leaves existing rows untouched.

use crate::error::schema_error;
use itsm_core::store::StorageError;
use sqlx::PgPool;

/// Advisory lock key serializing concurrent schema bootstraps.
pub const SCHEMA_LOCK_KEY: i64 = 0x0A17_7C0D_0001;

/// `tickets` table definition.
pub const CREATE_TICKETS_TABLE: &str = r"
    CREATE TABLE IF NOT EXISTS tickets (
        id BIGSERIAL PRIMARY KEY,
        title TEXT NOT NULL,
        status TEXT NOT NULL DEFAULT 'OPEN',
        priority TEXT NOT NULL DEFAULT 'P3',
        created_at TIMESTAMPTZ NOT NULL DEFAULT now()
    )
";

/// Index on the ticket id.
pub const CREATE_TICKETS_ID_INDEX: &str =
    "CREATE INDEX IF NOT EXISTS ix_tickets_id ON tickets (id)";

/// Create the `tickets` table and its index if they do not exist.
///
/// Runs in a single transaction holding a transaction-scoped advisory lock,
/// so two processes starting against the same database do not race on
/// catalog inserts.
///
/// # Errors
///
/// Returns [`StorageError::Unavailable`] if the database cannot be reached
/// and [`StorageError::Schema`] if any DDL statement fails.
#[tracing::instrument(skip(pool))]
pub async fn ensure_schema(pool: &PgPool) -> Result<(), StorageError> {
    let mut tx = pool
        .begin()
        .await
        .map_err(|e| schema_error("Failed to start schema transaction", &e))?;

    sqlx::query("SELECT pg_advisory_xact_lock($1)")
        .bind(SCHEMA_LOCK_KEY)
        .execute(&mut *tx)
        .await
        .map_err(|e| schema_error("Failed to acquire schema lock", &e))?;

    sqlx::query(CREATE_TICKETS_TABLE)
        .execute(&mut *tx)
        .await
        .map_err(|e| schema_error("Failed to create tickets table", &e))?;

    sqlx::query(CREATE_TICKETS_ID_INDEX)
        .execute(&mut *tx)
        .await
        .map_err(|e| schema_error("Failed to create tickets id index", &e))?;

    tx.commit()
        .await
        .map_err(|e| schema_error("Failed to commit schema transaction", &e))?;

    tracing::debug!("Tickets schema ensured");
    Ok(())
}
