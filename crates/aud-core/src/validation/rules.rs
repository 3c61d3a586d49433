//! Descriptor-driven field rules.

use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use super::error::{IssueKind, ValidationErrors};
use crate::schema::{Column, ColumnKind, Table};
use crate::time::{format_timestamp, parse_timestamp};

/// Validate an insert payload for `table` and decode it into `T`.
///
/// # Errors
///
/// Returns every violated field: missing required values, `null` in
/// non-nullable fields, wrong types, empty strings, and values outside an
/// enumerated set.
pub fn validate_insert<T: DeserializeOwned>(
    table: &Table,
    payload: &Value,
) -> Result<T, ValidationErrors> {
    let object = as_object(payload)?;
    let mut errors = ValidationErrors::default();
    let mut normalized = Map::new();

    for column in table.writable_columns() {
        match object.get(column.field) {
            None => {
                if let Some(default) = column.default {
                    normalized.insert(column.field.to_string(), Value::from(default));
                } else if column.nullable {
                    normalized.insert(column.field.to_string(), Value::Null);
                } else {
                    errors.push(column.field, IssueKind::Missing);
                }
            }
            Some(Value::Null) if column.nullable => {
                normalized.insert(column.field.to_string(), Value::Null);
            }
            Some(Value::Null) => errors.push(column.field, IssueKind::Null),
            Some(value) => match check_value(column, value) {
                Ok(value) => {
                    normalized.insert(column.field.to_string(), value);
                }
                Err(kind) => errors.push(column.field, kind),
            },
        }
    }

    errors.into_result()?;
    decode(normalized)
}

/// Validate a sparse update payload for `table` and decode it into `T`.
///
/// # Errors
///
/// Returns every violated field, including attempts to change server-managed
/// or immutable columns.
pub fn validate_update<T: DeserializeOwned>(
    table: &Table,
    payload: &Value,
) -> Result<T, ValidationErrors> {
    let object = as_object(payload)?;
    let mut errors = ValidationErrors::default();
    let mut normalized = Map::new();

    for (key, value) in object {
        let Some(column) = table.column(key) else {
            continue;
        };
        if !column.is_writable() || column.immutable {
            errors.push(key.as_str(), IssueKind::ReadOnly);
            continue;
        }
        match value {
            Value::Null if column.nullable => {
                normalized.insert(key.clone(), Value::Null);
            }
            Value::Null => errors.push(key.as_str(), IssueKind::Null),
            value => match check_value(column, value) {
                Ok(value) => {
                    normalized.insert(key.clone(), value);
                }
                Err(kind) => errors.push(key.as_str(), kind),
            },
        }
    }

    errors.into_result()?;
    decode(normalized)
}

fn as_object(payload: &Value) -> Result<&Map<String, Value>, ValidationErrors> {
    payload.as_object().ok_or_else(|| {
        ValidationErrors::single("input", IssueKind::InvalidType { expected: "object" })
    })
}

fn decode<T: DeserializeOwned>(normalized: Map<String, Value>) -> Result<T, ValidationErrors> {
    serde_json::from_value(Value::Object(normalized))
        .map_err(|e| ValidationErrors::malformed("input", e))
}

/// Check a non-null value against its column and return its normalized form.
fn check_value(column: &Column, value: &Value) -> Result<Value, IssueKind> {
    let invalid_type = IssueKind::InvalidType {
        expected: column.kind.expected(),
    };
    match column.kind {
        ColumnKind::Integer => value.as_i64().map(Value::from).ok_or(invalid_type),
        ColumnKind::Real => value
            .as_f64()
            .filter(|v| v.is_finite())
            .map(Value::from)
            .ok_or(invalid_type),
        ColumnKind::Text => match value.as_str() {
            Some("") if column.non_empty => Err(IssueKind::Empty),
            Some(_) => Ok(value.clone()),
            None => Err(invalid_type),
        },
        ColumnKind::Enum(allowed) => match value.as_str() {
            Some(s) if allowed.contains(&s) => Ok(value.clone()),
            Some(_) => Err(IssueKind::InvalidEnum { allowed }),
            None => Err(invalid_type),
        },
        ColumnKind::Timestamp => value
            .as_str()
            .and_then(parse_timestamp)
            .map(|dt| Value::from(format_timestamp(&dt)))
            .ok_or(invalid_type),
    }
}
