//! Schema creation.
//!
//! Statements are generated from the column descriptor and use
//! `IF NOT EXISTS`, so re-running on an existing database is a no-op.

use aud_core::schema::TABLES;

use crate::AudDb;
use crate::error::DatabaseError;

impl AudDb {
    /// Create every table (parents first) and its foreign-key indexes.
    pub(crate) async fn run_migrations(&self) -> Result<(), DatabaseError> {
        for table in TABLES {
            let mut batch = table.create_table_sql();
            for index in table.index_sql() {
                batch.push('\n');
                batch.push_str(&index);
            }
            self.conn
                .execute_batch(&batch)
                .await
                .map_err(|e| DatabaseError::Migration(format!("{}: {e}", table.name)))?;
        }
        Ok(())
    }
}
