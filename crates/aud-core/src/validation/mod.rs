//! Input validation derived from the column descriptor.
//!
//! Two validators per entity, both driven by the same [`crate::schema::Table`]:
//!
//! - insert: every writable column is checked; omitted fields take their
//!   declared default (or `null` when nullable); unknown and server-managed
//!   keys are dropped.
//! - update: only supplied fields are checked; server-managed and immutable
//!   keys are rejected as read-only; unknown keys are dropped.
//!
//! Both collect every violated field before failing and never touch storage.
//! The select shape is validated separately by JSON Schema in `aud-schema`.

mod error;
mod rules;

pub use error::{FieldIssue, IssueKind, ValidationErrors};
pub use rules::{validate_insert, validate_update};

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::enums::EntityType;
use crate::schema::table_for;

/// An insert payload (`New*`) validated against its table.
pub trait InsertShape: Serialize + DeserializeOwned {
    const ENTITY: EntityType;

    /// Validate a raw JSON payload and apply defaults.
    ///
    /// # Errors
    ///
    /// Returns every violated field.
    fn parse(payload: &serde_json::Value) -> Result<Self, ValidationErrors> {
        validate_insert(table_for(Self::ENTITY), payload)
    }

    /// Re-check an already typed value (non-empty rules, finite numbers).
    ///
    /// # Errors
    ///
    /// Returns every violated field.
    fn check(&self) -> Result<(), ValidationErrors> {
        let value =
            serde_json::to_value(self).map_err(|e| ValidationErrors::malformed("input", e))?;
        validate_insert::<Self>(table_for(Self::ENTITY), &value).map(|_| ())
    }
}

/// A sparse update payload validated against its table.
pub trait UpdateShape: Serialize + DeserializeOwned + Default {
    const ENTITY: EntityType;

    /// Validate a raw sparse JSON payload.
    ///
    /// # Errors
    ///
    /// Returns every violated field.
    fn parse(payload: &serde_json::Value) -> Result<Self, ValidationErrors> {
        validate_update(table_for(Self::ENTITY), payload)
    }

    /// Re-check an already typed value.
    ///
    /// # Errors
    ///
    /// Returns every violated field.
    fn check(&self) -> Result<(), ValidationErrors> {
        let value =
            serde_json::to_value(self).map_err(|e| ValidationErrors::malformed("input", e))?;
        validate_update::<Self>(table_for(Self::ENTITY), &value).map(|_| ())
    }

    /// The changed fields keyed by wire name.
    #[must_use]
    fn changes(&self) -> serde_json::Map<String, serde_json::Value> {
        match serde_json::to_value(self) {
            Ok(serde_json::Value::Object(map)) => map,
            _ => serde_json::Map::new(),
        }
    }

    #[must_use]
    fn is_empty(&self) -> bool {
        self.changes().is_empty()
    }
}
