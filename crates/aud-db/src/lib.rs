//! # aud-db
//!
//! libSQL persistence for the audit record tree.
//!
//! Holds one embedded libSQL connection (local file or `:memory:`), creates
//! the tables from the column descriptor in `aud_core::schema`, and exposes
//! typed repositories on [`service::AudService`]. Every mutation runs in its
//! own transaction; deletes remove dependent rows children-first inside that
//! transaction.
//!
//! Uses the `libsql` crate (C `SQLite` fork, v0.9.29).

pub mod error;
pub mod mapping;
mod migrations;
pub mod repos;
pub mod service;
mod transient;

#[cfg(test)]
mod test_support;

use error::DatabaseError;
use libsql::Builder;

/// Database handle: a libSQL database and its single connection.
pub struct AudDb {
    #[allow(dead_code)]
    db: libsql::Database,
    conn: libsql::Connection,
}

impl AudDb {
    /// Open a local database at the given path (`":memory:"` for a private
    /// in-memory store).
    ///
    /// Runs migrations automatically on open.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the database cannot be opened or
    /// migrations fail.
    pub async fn open_local(path: &str) -> Result<Self, DatabaseError> {
        let db = Builder::new_local(path).build().await?;
        let conn = db.connect()?;

        // Enable foreign keys (must be per-connection in SQLite)
        conn.execute("PRAGMA foreign_keys = ON", ())
            .await
            .map_err(|e| DatabaseError::Migration(format!("PRAGMA foreign_keys: {e}")))?;

        let aud_db = Self { db, conn };
        aud_db.run_migrations().await?;
        tracing::debug!(path, "database opened");
        Ok(aud_db)
    }

    /// Access the underlying libSQL connection for direct queries.
    #[must_use]
    pub const fn conn(&self) -> &libsql::Connection {
        &self.conn
    }
}
