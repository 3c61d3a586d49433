//! Classification of store failures that may clear on their own.
//!
//! The service never retries; callers decide based on the flag surfaced
//! through `DatabaseError::is_retryable`.

/// `SQLITE_BUSY`
const SQLITE_BUSY: i32 = 5;
/// `SQLITE_LOCKED`
const SQLITE_LOCKED: i32 = 6;

/// Detect transient store errors: lock contention and lost connections.
///
/// SQL and constraint errors are never transient.
pub fn is_transient_error(e: &libsql::Error) -> bool {
    if let libsql::Error::SqliteFailure(code, _) = e {
        if matches!(code & 0xff, SQLITE_BUSY | SQLITE_LOCKED) {
            return true;
        }
    }
    let msg = e.to_string().to_lowercase();
    msg.contains("database is locked")
        || msg.contains("database is busy")
        || msg.contains("connection reset")
        || msg.contains("connection refused")
        || msg.contains("connection closed")
}
