//! Row and parameter conversion driven by the column descriptor.
//!
//! Every table is read with `SELECT {column_list}` in declaration order, so
//! column index `i` of a row is `table.columns[i]`. Rows become a JSON object
//! keyed by wire field name and are then decoded into the entity type; writes
//! go the other way from the serialized typed payload.

use aud_core::entities::Record;
use aud_core::schema::{Column, ColumnKind, Table};
use aud_core::time::{format_timestamp, parse_timestamp};
use serde_json::{Map, Number, Value};

use crate::error::DatabaseError;

/// Convert one stored value to its wire form.
///
/// # Errors
///
/// Returns `DatabaseError::InvalidState` when storage holds something the
/// column cannot represent (a blob, a non-finite real, a bad timestamp).
pub fn sql_to_json(column: &Column, value: libsql::Value) -> Result<Value, DatabaseError> {
    use libsql::Value as Sql;

    let invalid = |what: &str| {
        DatabaseError::InvalidState(format!("column {} holds {what}", column.name))
    };

    Ok(match (column.kind, value) {
        (_, Sql::Null) => Value::Null,
        (ColumnKind::Integer, Sql::Integer(i)) => Value::from(i),
        #[allow(clippy::cast_precision_loss)]
        (ColumnKind::Real, Sql::Integer(i)) => Value::from(i as f64),
        (ColumnKind::Real, Sql::Real(f)) => real(f).ok_or_else(|| invalid("a non-finite real"))?,
        (ColumnKind::Timestamp, Sql::Text(s)) => {
            let dt = parse_timestamp(&s).ok_or_else(|| invalid(&format!("timestamp '{s}'")))?;
            Value::String(format_timestamp(&dt))
        }
        (ColumnKind::Text | ColumnKind::Enum(_), Sql::Text(s)) => Value::String(s),
        (_, other) => return Err(invalid(&format!("unexpected {other:?}"))),
    })
}

fn real(f: f64) -> Option<Value> {
    Number::from_f64(f).map(Value::Number)
}

/// Convert one wire value to a bind parameter.
///
/// Timestamps are re-rendered in the canonical storage form.
///
/// # Errors
///
/// Returns `DatabaseError::InvalidState` if the value does not fit the
/// column. Validated payloads never hit this.
pub fn json_to_sql(column: &Column, value: &Value) -> Result<libsql::Value, DatabaseError> {
    use libsql::Value as Sql;

    let mismatch = || {
        DatabaseError::InvalidState(format!(
            "{} expects {}, got {value}",
            column.field,
            column.kind.expected()
        ))
    };

    Ok(match (column.kind, value) {
        (_, Value::Null) => Sql::Null,
        (ColumnKind::Integer, Value::Number(n)) => Sql::Integer(n.as_i64().ok_or_else(mismatch)?),
        (ColumnKind::Real, Value::Number(n)) => Sql::Real(n.as_f64().ok_or_else(mismatch)?),
        (ColumnKind::Timestamp, Value::String(s)) => {
            Sql::Text(format_timestamp(&parse_timestamp(s).ok_or_else(mismatch)?))
        }
        (ColumnKind::Text | ColumnKind::Enum(_), Value::String(s)) => Sql::Text(s.clone()),
        _ => return Err(mismatch()),
    })
}

/// Read a full row of `table` into a JSON object.
///
/// # Errors
///
/// Returns `DatabaseError` if a column cannot be read or converted.
pub fn row_to_json(table: &Table, row: &libsql::Row) -> Result<Map<String, Value>, DatabaseError> {
    let mut object = Map::with_capacity(table.columns.len());
    for (idx, column) in (0_i32..).zip(table.columns) {
        let value = sql_to_json(column, row.get_value(idx)?)?;
        object.insert(column.field.to_string(), value);
    }
    Ok(object)
}

/// Decode a full row into its entity type.
///
/// # Errors
///
/// Returns `DatabaseError` if the row does not match the entity shape.
pub fn decode<R: Record>(row: &libsql::Row) -> Result<R, DatabaseError> {
    let object = row_to_json(R::table(), row)?;
    serde_json::from_value(Value::Object(object)).map_err(|e| {
        DatabaseError::InvalidState(format!("{} row does not decode: {e}", R::ENTITY))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use aud_core::schema::{AUDITS, METRICS};
    use libsql::Value as Sql;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn column(table: &Table, field: &str) -> &'static Column {
        table.column(field).unwrap()
    }

    #[test]
    fn timestamps_render_canonically() {
        let col = column(&AUDITS, "dueDate");
        assert_eq!(
            sql_to_json(col, Sql::Text("2025-03-31 12:00:00".into())).unwrap(),
            json!("2025-03-31T12:00:00.000000Z")
        );
        let bound = json_to_sql(col, &json!("2025-03-31")).unwrap();
        assert!(matches!(bound, Sql::Text(ref s) if s == "2025-03-31T00:00:00.000000Z"));
    }

    #[test]
    fn integer_stored_in_real_column_reads_as_number() {
        let col = column(&METRICS, "value");
        assert_eq!(sql_to_json(col, Sql::Integer(3)).unwrap(), json!(3.0));
    }

    #[test]
    fn null_passes_through() {
        let col = column(&AUDITS, "department");
        assert_eq!(sql_to_json(col, Sql::Null).unwrap(), Value::Null);
        assert!(matches!(json_to_sql(col, &Value::Null).unwrap(), Sql::Null));
    }

    #[test]
    fn mismatched_bind_is_invalid_state() {
        let col = column(&METRICS, "auditId");
        let err = json_to_sql(col, &json!("one")).unwrap_err();
        assert!(matches!(err, DatabaseError::InvalidState(_)));
    }

    #[test]
    fn blob_is_rejected() {
        let col = column(&AUDITS, "title");
        assert!(sql_to_json(col, Sql::Blob(vec![1, 2])).is_err());
    }
}
