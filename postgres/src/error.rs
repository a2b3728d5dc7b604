//! Mapping from sqlx errors to `StorageError`.

use itsm_core::store::StorageError;

/// Classify a sqlx error, prefixing the message with what was being attempted.
pub(crate) fn storage_error(context: &str, err: &sqlx::Error) -> StorageError {
    let message = format!("{context}: {err}");
    match err {
        sqlx::Error::PoolTimedOut
        | sqlx::Error::PoolClosed
        | sqlx::Error::Io(_)
        | sqlx::Error::Tls(_)
        | sqlx::Error::WorkerCrashed => StorageError::Unavailable(message),
        sqlx::Error::ColumnDecode { .. }
        | sqlx::Error::ColumnNotFound(_)
        | sqlx::Error::Decode(_) => StorageError::Schema(message),
        sqlx::Error::Configuration(_) => StorageError::Configuration(message),
        _ => StorageError::Query(message),
    }
}

/// Like [`storage_error`], but statement failures count as schema errors.
pub(crate) fn schema_error(context: &str, err: &sqlx::Error) -> StorageError {
    match storage_error(context, err) {
        StorageError::Query(message) => StorageError::Schema(message),
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pool_timeout_is_unavailable() {
        let err = storage_error("Failed to insert ticket", &sqlx::Error::PoolTimedOut);
        assert!(err.is_unavailable());
        assert!(err.to_string().contains("Failed to insert ticket"));
    }

    #[test]
    fn test_row_not_found_is_query_error() {
        let err = storage_error("Failed to list tickets", &sqlx::Error::RowNotFound);
        assert!(matches!(err, StorageError::Query(_)));
    }

    #[test]
    fn test_configuration_error_is_not_a_query_failure() {
        let err = storage_error(
            "Invalid database URL",
            &sqlx::Error::Configuration("relative URL without a base".into()),
        );
        assert!(matches!(err, StorageError::Configuration(_)));
        assert!(!err.is_unavailable());
    }

    #[test]
    fn test_schema_error_promotes_query_failures() {
        let err = schema_error("Failed to create tickets table", &sqlx::Error::RowNotFound);
        assert!(matches!(err, StorageError::Schema(_)));

        let err = schema_error("Failed to create tickets table", &sqlx::Error::PoolClosed);
        assert!(err.is_unavailable());
    }
}
