//! Error kinds surfaced to procedure callers.

use aud_core::enums::EntityType;
use aud_core::validation::{FieldIssue, ValidationErrors};
use aud_db::error::DatabaseError;
use serde::Serialize;
use thiserror::Error;

/// Every way a procedure call can fail.
#[derive(Debug, Error)]
pub enum RpcError {
    /// Input broke the field contract; nothing was written.
    #[error(transparent)]
    Validation(#[from] ValidationErrors),

    #[error("{entity} {id} not found")]
    NotFound { entity: EntityType, id: i64 },

    #[error("{field} references missing {entity} {id}")]
    ForeignKey {
        field: &'static str,
        entity: EntityType,
        id: i64,
    },

    /// The backing store failed. `retryable` marks busy/locked/connection
    /// conditions.
    #[error("store error: {message}")]
    Store { retryable: bool, message: String },

    #[error("unknown procedure '{0}'")]
    UnknownProcedure(String),
}

impl RpcError {
    /// Stable machine-readable code.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::NotFound { .. } => "NOT_FOUND",
            Self::ForeignKey { .. } => "FOREIGN_KEY_ERROR",
            Self::Store { .. } => "STORE_ERROR",
            Self::UnknownProcedure(_) => "UNKNOWN_PROCEDURE",
        }
    }

    /// JSON error body: `{ code, message, issues?, retryable? }`.
    #[must_use]
    pub fn body(&self) -> ErrorBody {
        ErrorBody {
            code: self.code(),
            message: self.to_string(),
            issues: match self {
                Self::Validation(errors) => Some(errors.issues.clone()),
                _ => None,
            },
            retryable: match self {
                Self::Store { retryable, .. } => Some(*retryable),
                _ => None,
            },
        }
    }

    pub(crate) fn store(message: impl Into<String>) -> Self {
        Self::Store {
            retryable: false,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorBody {
    pub code: &'static str,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub issues: Option<Vec<FieldIssue>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub retryable: Option<bool>,
}

impl From<DatabaseError> for RpcError {
    fn from(e: DatabaseError) -> Self {
        match e {
            DatabaseError::Validation(errors) => Self::Validation(errors),
            DatabaseError::NotFound { entity, id } => Self::NotFound { entity, id },
            DatabaseError::ForeignKey { field, entity, id } => {
                Self::ForeignKey { field, entity, id }
            }
            other => {
                let retryable = other.is_retryable();
                tracing::warn!(error = %other, retryable, "store failure");
                Self::Store {
                    retryable,
                    message: other.to_string(),
                }
            }
        }
    }
}
