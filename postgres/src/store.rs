//! `PostgreSQL`-backed ticket store.

use crate::config::PoolConfig;
use crate::error::storage_error;
use crate::schema;
use chrono::{DateTime, Utc};
use itsm_core::store::{StorageError, StoreFuture, TicketStore};
use itsm_core::ticket::{NewTicket, Ticket, TicketId};
use sqlx::PgPool;
use std::time::Instant;

/// `PostgreSQL` ticket store.
///
/// Persists tickets in the `tickets` table:
///
/// ```sql
/// CREATE TABLE tickets (
///     id BIGSERIAL PRIMARY KEY,
///     title TEXT NOT NULL,
///     status TEXT NOT NULL DEFAULT 'OPEN',
///     priority TEXT NOT NULL DEFAULT 'P3',
///     created_at TIMESTAMPTZ NOT NULL DEFAULT now()
/// );
/// ```
///
/// Cloning is cheap: clones share the same connection pool. Each operation
/// checks out its own connection and returns it on every exit path.
#[derive(Clone, Debug)]
pub struct PostgresTicketStore {
    pool: PgPool,
}

#[derive(sqlx::FromRow)]
struct TicketRow {
    id: i64,
    title: String,
    status: String,
    priority: String,
    created_at: DateTime<Utc>,
}

impl From<TicketRow> for Ticket {
    fn from(row: TicketRow) -> Self {
        Self {
            id: TicketId::new(row.id),
            title: row.title,
            status: row.status,
            priority: row.priority,
            created_at: row.created_at,
        }
    }
}

impl PostgresTicketStore {
    /// Create a store over an existing connection pool.
    #[must_use]
    pub const fn from_pool(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Connect a new pool using the given configuration.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Configuration`] if the URL is invalid and
    /// [`StorageError::Unavailable`] if the database cannot be reached.
    pub async fn connect(config: &PoolConfig) -> Result<Self, StorageError> {
        let options = config.connect_options()?;
        let pool = config
            .pool_options()
            .connect_with(options)
            .await
            .map_err(|e| storage_error("Failed to connect", &e))?;

        tracing::info!(database = %config.redacted_url(), "Connected to ticket database");
        Ok(Self::from_pool(pool))
    }

    /// Build a pool that opens connections on first use.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Configuration`] if the URL is invalid.
    pub fn connect_lazy(config: &PoolConfig) -> Result<Self, StorageError> {
        let options = config.connect_options()?;
        Ok(Self::from_pool(config.pool_options().connect_lazy_with(options)))
    }

    /// Create the `tickets` schema if it does not exist.
    ///
    /// # Errors
    ///
    /// See [`schema::ensure_schema`].
    pub async fn migrate(&self) -> Result<(), StorageError> {
        schema::ensure_schema(&self.pool).await
    }

    /// Get the underlying connection pool.
    #[must_use]
    pub const fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Close the pool, waiting for checked-out connections to return.
    pub async fn close(&self) {
        self.pool.close().await;
    }

    #[tracing::instrument(skip(self, ticket), fields(title_len = ticket.title.len()))]
    async fn insert_ticket(&self, ticket: NewTicket) -> Result<Ticket, StorageError> {
        let started = Instant::now();
        let result = self.insert_in_transaction(ticket).await;
        record_operation("insert", started, result.is_ok());

        match &result {
            Ok(ticket) => tracing::debug!(ticket_id = %ticket.id, "Ticket inserted"),
            Err(e) => tracing::warn!(error = %e, "Ticket insert failed"),
        }
        result
    }

    async fn insert_in_transaction(&self, ticket: NewTicket) -> Result<Ticket, StorageError> {
        // Dropping `tx` without commit rolls back, so every early return and
        // cancelled future leaves nothing behind.
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| storage_error("Failed to start transaction", &e))?;

        let row: TicketRow = sqlx::query_as(
            "INSERT INTO tickets (title, status, priority)
             VALUES ($1, $2, $3)
             RETURNING id, title, status, priority, created_at",
        )
        .bind(&ticket.title)
        .bind(&ticket.status)
        .bind(&ticket.priority)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| storage_error("Failed to insert ticket", &e))?;

        tx.commit()
            .await
            .map_err(|e| storage_error("Failed to commit transaction", &e))?;

        Ok(row.into())
    }

    #[tracing::instrument(skip(self))]
    async fn fetch_all(&self) -> Result<Vec<Ticket>, StorageError> {
        let started = Instant::now();
        let result: Result<Vec<TicketRow>, StorageError> = sqlx::query_as(
            "SELECT id, title, status, priority, created_at
             FROM tickets
             ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| storage_error("Failed to list tickets", &e));
        record_operation("list_all", started, result.is_ok());

        let rows = result?;
        tracing::debug!(count = rows.len(), "Tickets listed");
        Ok(rows.into_iter().map(Ticket::from).collect())
    }

    async fn ping(&self) -> Result<(), StorageError> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map_err(|e| storage_error("Health check failed", &e))?;
        Ok(())
    }
}

impl TicketStore for PostgresTicketStore {
    fn insert(&self, ticket: NewTicket) -> StoreFuture<'_, Ticket> {
        Box::pin(self.insert_ticket(ticket))
    }

    fn list_all(&self) -> StoreFuture<'_, Vec<Ticket>> {
        Box::pin(self.fetch_all())
    }

    fn health_check(&self) -> StoreFuture<'_, ()> {
        Box::pin(self.ping())
    }
}

fn record_operation(operation: &'static str, started: Instant, success: bool) {
    let outcome = if success { "success" } else { "error" };
    metrics::counter!(
        "itsm_ticket_store_operations_total",
        "operation" => operation,
        "outcome" => outcome
    )
    .increment(1);
    metrics::histogram!("itsm_ticket_store_duration_seconds", "operation" => operation)
        .record(started.elapsed().as_secs_f64());
}
