//! Service layer orchestrating reads and transactional mutations.
//!
//! `AudService` wraps `AudDb` (raw database access) and `SchemaRegistry`
//! (select-shape validation). The per-entity repositories in [`crate::repos`]
//! are implemented as `impl AudService` on top of the generic operations here.

use std::collections::BTreeMap;

use aud_core::entities::Record;
use aud_core::enums::EntityType;
use aud_core::schema::{Role, Table, dependents_of, table_for, table_named};
use aud_core::time::{format_timestamp, next_after, now, parse_timestamp};
use aud_core::validation::{InsertShape, UpdateShape};
use aud_schema::SchemaRegistry;
use serde_json::{Map, Value};
use tokio::sync::Mutex;

use crate::AudDb;
use crate::error::DatabaseError;
use crate::mapping::{decode, json_to_sql};
use crate::repos::{Conditions, Page};

/// Result of a delete: the removed row plus every dependent row removed with
/// it, counted per entity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Deleted {
    pub entity: EntityType,
    pub id: i64,
    pub cascaded: BTreeMap<EntityType, u64>,
}

impl Deleted {
    /// Dependent rows of `entity` removed by the cascade.
    #[must_use]
    pub fn cascaded_count(&self, entity: EntityType) -> u64 {
        self.cascaded.get(&entity).copied().unwrap_or(0)
    }
}

/// Orchestrates access to the shared connection.
///
/// Every mutation method follows this protocol:
/// 1. Re-check the typed input (no store access on failure)
/// 2. Take the gate and begin a transaction
/// 3. Check existence and parent references
/// 4. Execute SQL and read the result back
/// 5. Commit, or roll back and log on any error
///
/// Reads take the gate too, so they never observe an open transaction.
pub struct AudService {
    db: AudDb,
    schema: SchemaRegistry,
    gate: Mutex<()>,
}

impl AudService {
    /// Create a new service wrapping a local database.
    ///
    /// # Arguments
    ///
    /// * `db_path` - Path to the libSQL database file, or `":memory:"`.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the database cannot be opened.
    pub async fn new_local(db_path: &str) -> Result<Self, DatabaseError> {
        let db = AudDb::open_local(db_path).await?;
        Ok(Self::from_db(db))
    }

    /// Create from an existing `AudDb`.
    #[must_use]
    pub fn from_db(db: AudDb) -> Self {
        Self {
            db,
            schema: SchemaRegistry::new(),
            gate: Mutex::new(()),
        }
    }

    /// Access the underlying database handle.
    #[must_use]
    pub const fn db(&self) -> &AudDb {
        &self.db
    }

    /// Access the schema registry.
    #[must_use]
    pub const fn schema(&self) -> &SchemaRegistry {
        &self.schema
    }

    // -----------------------------------------------------------------------
    // Reads
    // -----------------------------------------------------------------------

    /// Fetch one record by id.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::NotFound` if no row has this id.
    pub async fn get_record<R: Record>(&self, id: i64) -> Result<R, DatabaseError> {
        let _gate = self.gate.lock().await;
        fetch::<R>(self.db.conn(), id)
            .await?
            .ok_or(DatabaseError::NotFound {
                entity: R::ENTITY,
                id,
            })
    }

    /// List records matching `conditions`, ordered by id, one page at a time.
    pub(crate) async fn list_records<R: Record>(
        &self,
        conditions: Conditions,
        page: Page,
    ) -> Result<Vec<R>, DatabaseError> {
        let table = R::table();
        let (where_clause, mut params) = conditions.into_parts();
        params.push(libsql::Value::Integer(i64::from(page.limit)));
        let limit_idx = params.len();
        params.push(libsql::Value::Integer(i64::from(page.offset)));
        let offset_idx = params.len();

        let sql = format!(
            "SELECT {} FROM {} {where_clause} ORDER BY id ASC LIMIT ?{limit_idx} OFFSET ?{offset_idx}",
            table.column_list(),
            table.name
        );

        let _gate = self.gate.lock().await;
        let mut rows = self
            .db
            .conn()
            .query(&sql, libsql::params_from_iter(params))
            .await?;
        let mut records = Vec::new();
        while let Some(row) = rows.next().await? {
            records.push(decode::<R>(&row)?);
        }
        Ok(records)
    }

    /// Run a single-row `sql` and read its first `N` columns as integers
    /// (NULL reads as 0). One statement, one gate hold: the values come from
    /// the same snapshot.
    pub(crate) async fn integers<const N: usize>(
        &self,
        sql: &str,
    ) -> Result<[i64; N], DatabaseError> {
        let _gate = self.gate.lock().await;
        let mut rows = self.db.conn().query(sql, ()).await?;
        let row = rows.next().await?.ok_or(DatabaseError::NoResult)?;
        let mut values = [0; N];
        for (idx, slot) in (0_i32..).zip(values.iter_mut()) {
            *slot = row.get::<Option<i64>>(idx)?.unwrap_or(0);
        }
        Ok(values)
    }

    // -----------------------------------------------------------------------
    // Mutations
    // -----------------------------------------------------------------------

    /// Insert a validated payload and return the stored record.
    ///
    /// Stamps `createdAt == updatedAt` (or `recordedAt`) and checks that every
    /// referenced parent exists.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::Validation` if the payload breaks a field rule,
    /// `DatabaseError::ForeignKey` if a parent is missing.
    pub async fn insert_record<N, R>(&self, new: &N) -> Result<R, DatabaseError>
    where
        N: InsertShape,
        R: Record,
    {
        debug_assert_eq!(N::ENTITY, R::ENTITY);
        new.check()?;
        let fields = to_object(new)?;
        let table = R::table();

        let _gate = self.gate.lock().await;
        let tx = self.db.conn().transaction().await?;
        let result = async {
            check_references(&tx, table, &fields).await?;
            let id = insert_row(&tx, table, &fields).await?;
            fetch::<R>(&tx, id).await?.ok_or(DatabaseError::NoResult)
        }
        .await;
        let record = finish(tx, result, "create", R::ENTITY).await?;
        tracing::debug!(entity = %R::ENTITY, id = record.id(), "created");
        Ok(record)
    }

    /// Apply a sparse update and return the stored record.
    ///
    /// An update with no fields returns the current record unchanged.
    /// Otherwise `updatedAt` moves strictly forward.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::NotFound` if the row is missing,
    /// `DatabaseError::Validation` on a field rule, `DatabaseError::ForeignKey`
    /// if a changed reference points at a missing parent.
    pub async fn update_record<U, R>(&self, id: i64, update: &U) -> Result<R, DatabaseError>
    where
        U: UpdateShape,
        R: Record,
    {
        debug_assert_eq!(U::ENTITY, R::ENTITY);
        update.check()?;
        let changes = update.changes();
        if changes.is_empty() {
            return self.get_record::<R>(id).await;
        }
        let table = R::table();

        let _gate = self.gate.lock().await;
        let tx = self.db.conn().transaction().await?;
        let result = async {
            let previous = last_updated(&tx, table, id).await?;
            check_references(&tx, table, &changes).await?;
            update_row(&tx, table, id, &changes, previous).await?;
            fetch::<R>(&tx, id).await?.ok_or(DatabaseError::NoResult)
        }
        .await;
        let record = finish(tx, result, "update", R::ENTITY).await?;
        tracing::debug!(
            entity = %R::ENTITY,
            id,
            fields = ?changes.keys().collect::<Vec<_>>(),
            "updated"
        );
        Ok(record)
    }

    /// Delete a row and, in the same transaction, every row depending on it
    /// (children before parents).
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::NotFound` if the row is missing. On any failure
    /// nothing is removed.
    pub async fn delete_cascade(
        &self,
        entity: EntityType,
        id: i64,
    ) -> Result<Deleted, DatabaseError> {
        let table = table_for(entity);

        let _gate = self.gate.lock().await;
        let tx = self.db.conn().transaction().await?;
        let result = async {
            if !exists(&tx, table, id).await? {
                return Err(DatabaseError::NotFound { entity, id });
            }
            delete_tree(&tx, table, id).await
        }
        .await;
        let cascaded = finish(tx, result, "delete", entity).await?;
        tracing::debug!(%entity, id, ?cascaded, "deleted");
        Ok(Deleted {
            entity,
            id,
            cascaded,
        })
    }
}

/// Commit on success; roll back and log on failure.
async fn finish<T>(
    tx: libsql::Transaction,
    result: Result<T, DatabaseError>,
    op: &'static str,
    entity: EntityType,
) -> Result<T, DatabaseError> {
    match result {
        Ok(value) => {
            tx.commit().await?;
            Ok(value)
        }
        Err(e) => {
            tracing::warn!(%entity, op, error = %e, "transaction rolled back");
            if let Err(rollback) = tx.rollback().await {
                tracing::warn!(%entity, op, error = %rollback, "rollback failed");
            }
            Err(e)
        }
    }
}

fn to_object<T: serde::Serialize>(value: &T) -> Result<Map<String, Value>, DatabaseError> {
    match serde_json::to_value(value).map_err(|e| DatabaseError::Other(e.into()))? {
        Value::Object(map) => Ok(map),
        other => Err(DatabaseError::InvalidState(format!(
            "expected an object payload, got {other}"
        ))),
    }
}

async fn fetch<R: Record>(conn: &libsql::Connection, id: i64) -> Result<Option<R>, DatabaseError> {
    let table = R::table();
    let sql = format!("SELECT {} FROM {} WHERE id = ?1", table.column_list(), table.name);
    let mut rows = conn.query(&sql, [id]).await?;
    match rows.next().await? {
        Some(row) => Ok(Some(decode::<R>(&row)?)),
        None => Ok(None),
    }
}

async fn exists(conn: &libsql::Connection, table: &Table, id: i64) -> Result<bool, DatabaseError> {
    let sql = format!("SELECT 1 FROM {} WHERE id = ?1", table.name);
    let mut rows = conn.query(&sql, [id]).await?;
    Ok(rows.next().await?.is_some())
}

/// Every non-null reference in `fields` must name an existing parent row.
async fn check_references(
    conn: &libsql::Connection,
    table: &Table,
    fields: &Map<String, Value>,
) -> Result<(), DatabaseError> {
    for column in table.foreign_keys() {
        let (Some(fk), Some(parent_id)) = (
            column.references,
            fields.get(column.field).and_then(Value::as_i64),
        ) else {
            continue;
        };
        let parent = table_named(fk.table).ok_or_else(|| {
            DatabaseError::InvalidState(format!("{} references unknown table {}", column.name, fk.table))
        })?;
        if !exists(conn, parent, parent_id).await? {
            return Err(DatabaseError::ForeignKey {
                field: column.field,
                entity: parent.entity,
                id: parent_id,
            });
        }
    }
    Ok(())
}

async fn insert_row(
    conn: &libsql::Connection,
    table: &Table,
    fields: &Map<String, Value>,
) -> Result<i64, DatabaseError> {
    let stamp = libsql::Value::Text(format_timestamp(&now()));
    let mut names = Vec::new();
    let mut params = Vec::new();

    for column in table.columns {
        match column.role {
            Role::PrimaryKey => continue,
            Role::Managed => params.push(stamp.clone()),
            Role::Data => {
                params.push(json_to_sql(column, fields.get(column.field).unwrap_or(&Value::Null))?);
            }
        }
        names.push(column.name);
    }

    let placeholders = (1..=params.len())
        .map(|i| format!("?{i}"))
        .collect::<Vec<_>>()
        .join(", ");
    let sql = format!(
        "INSERT INTO {} ({}) VALUES ({placeholders})",
        table.name,
        names.join(", ")
    );
    conn.execute(&sql, libsql::params_from_iter(params)).await?;
    Ok(conn.last_insert_rowid())
}

/// Current `updated_at` of the row, or `NotFound`. Tables without one only
/// get the existence check.
async fn last_updated(
    conn: &libsql::Connection,
    table: &Table,
    id: i64,
) -> Result<Option<chrono::DateTime<chrono::Utc>>, DatabaseError> {
    let not_found = || DatabaseError::NotFound {
        entity: table.entity,
        id,
    };
    if !table.tracks_updates() {
        return if exists(conn, table, id).await? {
            Ok(None)
        } else {
            Err(not_found())
        };
    }
    let sql = format!("SELECT updated_at FROM {} WHERE id = ?1", table.name);
    let mut rows = conn.query(&sql, [id]).await?;
    let row = rows.next().await?.ok_or_else(not_found)?;
    let text = row.get::<String>(0)?;
    parse_timestamp(&text)
        .map(Some)
        .ok_or_else(|| DatabaseError::InvalidState(format!("bad updated_at '{text}'")))
}

async fn update_row(
    conn: &libsql::Connection,
    table: &Table,
    id: i64,
    changes: &Map<String, Value>,
    previous: Option<chrono::DateTime<chrono::Utc>>,
) -> Result<(), DatabaseError> {
    let mut sets = Vec::new();
    let mut params: Vec<libsql::Value> = Vec::new();

    for (field, value) in changes {
        let column = table.column(field).ok_or_else(|| {
            DatabaseError::InvalidState(format!("{} has no field {field}", table.name))
        })?;
        params.push(json_to_sql(column, value)?);
        sets.push(format!("{} = ?{}", column.name, params.len()));
    }

    if let Some(previous) = previous {
        params.push(libsql::Value::Text(format_timestamp(&next_after(previous))));
        sets.push(format!("updated_at = ?{}", params.len()));
    }

    params.push(libsql::Value::Integer(id));
    let sql = format!(
        "UPDATE {} SET {} WHERE id = ?{}",
        table.name,
        sets.join(", "),
        params.len()
    );
    conn.execute(&sql, libsql::params_from_iter(params)).await?;
    Ok(())
}

/// Collect the row and its descendants level by level, then delete them in
/// reverse discovery order so every child goes before its parent.
async fn delete_tree(
    conn: &libsql::Connection,
    root: &'static Table,
    id: i64,
) -> Result<BTreeMap<EntityType, u64>, DatabaseError> {
    let mut levels: Vec<(&'static Table, Vec<i64>)> = vec![(root, vec![id])];
    let mut next = 0;
    while next < levels.len() {
        let (parent, parent_ids) = levels[next].clone();
        for (child, column) in dependents_of(parent) {
            let child_ids = select_ids(conn, child, column.name, &parent_ids).await?;
            if !child_ids.is_empty() {
                levels.push((child, child_ids));
            }
        }
        next += 1;
    }

    let mut cascaded = BTreeMap::new();
    for (idx, (table, ids)) in levels.iter().enumerate().rev() {
        let removed = delete_ids(conn, table, ids).await?;
        if idx > 0 {
            *cascaded.entry(table.entity).or_insert(0) += removed;
        }
    }
    Ok(cascaded)
}

/// Ids bound per statement; SQLite caps host parameters at 32766.
const ID_BATCH: usize = 500;

fn in_list(len: usize) -> String {
    (1..=len)
        .map(|i| format!("?{i}"))
        .collect::<Vec<_>>()
        .join(", ")
}

async fn select_ids(
    conn: &libsql::Connection,
    table: &Table,
    column: &str,
    parent_ids: &[i64],
) -> Result<Vec<i64>, DatabaseError> {
    let mut ids = Vec::new();
    for batch in parent_ids.chunks(ID_BATCH) {
        let sql = format!(
            "SELECT id FROM {} WHERE {column} IN ({}) ORDER BY id",
            table.name,
            in_list(batch.len())
        );
        let mut rows = conn
            .query(&sql, libsql::params_from_iter(batch.to_vec()))
            .await?;
        while let Some(row) = rows.next().await? {
            ids.push(row.get::<i64>(0)?);
        }
    }
    Ok(ids)
}

async fn delete_ids(
    conn: &libsql::Connection,
    table: &Table,
    ids: &[i64],
) -> Result<u64, DatabaseError> {
    let mut removed = 0;
    for batch in ids.chunks(ID_BATCH) {
        let sql = format!(
            "DELETE FROM {} WHERE id IN ({})",
            table.name,
            in_list(batch.len())
        );
        removed += conn
            .execute(&sql, libsql::params_from_iter(batch.to_vec()))
            .await?;
    }
    Ok(removed)
}
