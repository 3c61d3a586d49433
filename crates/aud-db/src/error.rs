//! Database error types for aud-db.

use aud_core::enums::EntityType;
use aud_core::validation::ValidationErrors;
use thiserror::Error;

use crate::transient::is_transient_error;

/// The driver error wrapped by [`DatabaseError::LibSql`].
pub use libsql::Error as LibSqlError;

/// Errors from database operations.
#[derive(Debug, Error)]
pub enum DatabaseError {
    /// Input rejected before any store access.
    #[error(transparent)]
    Validation(#[from] ValidationErrors),

    /// No row with this id.
    #[error("{entity} {id} not found")]
    NotFound { entity: EntityType, id: i64 },

    /// A reference field names a parent row that does not exist.
    #[error("{field} references missing {entity} {id}")]
    ForeignKey {
        field: &'static str,
        entity: EntityType,
        id: i64,
    },

    /// A SQL query failed.
    #[error("Query failed: {0}")]
    Query(String),

    /// Schema migration failed.
    #[error("Migration failed: {0}")]
    Migration(String),

    /// Expected a result row but none was returned.
    #[error("No result returned")]
    NoResult,

    /// Invalid state encountered (e.g., bad data in DB).
    #[error("Invalid state: {0}")]
    InvalidState(String),

    /// Underlying libSQL error.
    #[error("libSQL error: {0}")]
    LibSql(#[from] libsql::Error),

    /// Catch-all for unexpected errors.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl DatabaseError {
    /// Whether repeating the same call may succeed.
    ///
    /// Only store conditions (busy, locked, lost connection) qualify;
    /// constraint violations and bad data never do.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::LibSql(e) => is_transient_error(e),
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aud_core::validation::IssueKind;

    #[test]
    fn not_found_message_names_entity() {
        let err = DatabaseError::NotFound {
            entity: EntityType::Finding,
            id: 7,
        };
        assert_eq!(err.to_string(), "finding 7 not found");
    }

    #[test]
    fn foreign_key_message_names_field() {
        let err = DatabaseError::ForeignKey {
            field: "auditId",
            entity: EntityType::Audit,
            id: 999,
        };
        assert_eq!(err.to_string(), "auditId references missing audit 999");
    }

    #[test]
    fn validation_is_transparent() {
        let err: DatabaseError = ValidationErrors::single("title", IssueKind::Empty).into();
        assert_eq!(err.to_string(), "validation failed: title must not be empty");
        assert!(!err.is_retryable());
    }

    #[test]
    fn locked_store_is_retryable() {
        let err = DatabaseError::LibSql(libsql::Error::SqliteFailure(
            5,
            "database is locked".into(),
        ));
        assert!(err.is_retryable());
    }

    #[test]
    fn constraint_failure_is_not_retryable() {
        let err = DatabaseError::LibSql(libsql::Error::SqliteFailure(
            19,
            "CHECK constraint failed".into(),
        ));
        assert!(!err.is_retryable());
    }
}
