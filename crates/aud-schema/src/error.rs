//! Schema validation error types.

use thiserror::Error;

/// Errors from the schema registry.
#[derive(Debug, Error)]
pub enum SchemaError {
    /// Requested schema name was not found in the registry.
    #[error("Schema not found: {0}")]
    NotFound(String),

    /// JSON value did not pass schema validation.
    #[error("Validation failed for '{schema}': {errors:?}")]
    ValidationFailed {
        schema: String,
        /// Individual error messages from the validator.
        errors: Vec<String>,
    },
}
