//! Central schema registry for the audit record types.
//!
//! The `SchemaRegistry` builds JSON Schemas from aud-core types at construction
//! time using [`schemars::schema_for!`] and compiles a `jsonschema` validator
//! for each one.

use std::collections::HashMap;

use aud_core::enums::EntityType;
use schemars::schema_for;

use crate::error::SchemaError;

struct Entry {
    schema: serde_json::Value,
    validator: jsonschema::Validator,
}

/// Compiled JSON Schemas for every select and insert shape.
pub struct SchemaRegistry {
    entries: HashMap<&'static str, Entry>,
}

/// Generate the schema for `$ty`, compile it, and insert it under `$name`.
macro_rules! register {
    ($map:expr, $name:expr, $ty:ty) => {{
        let schema = serde_json::to_value(schema_for!($ty)).unwrap();
        let validator = jsonschema::validator_for(&schema).unwrap();
        $map.insert($name, Entry { schema, validator });
    }};
}

impl SchemaRegistry {
    /// Build a registry containing the select shape of every entity (named
    /// after the entity, e.g. `"audit"`) and its insert shape (`"new_audit"`).
    ///
    /// # Panics
    ///
    /// Panics if a `schemars`-generated schema cannot be serialized or
    /// compiled. Neither happens for derived schemas in practice.
    #[must_use]
    pub fn new() -> Self {
        use aud_core::entities::{
            Audit, Evidence, Finding, Metric, NewAudit, NewEvidence, NewFinding, NewMetric,
            NewRecommendation, Recommendation,
        };

        let mut entries = HashMap::new();

        register!(entries, "audit", Audit);
        register!(entries, "finding", Finding);
        register!(entries, "recommendation", Recommendation);
        register!(entries, "evidence", Evidence);
        register!(entries, "metric", Metric);

        register!(entries, "new_audit", NewAudit);
        register!(entries, "new_finding", NewFinding);
        register!(entries, "new_recommendation", NewRecommendation);
        register!(entries, "new_evidence", NewEvidence);
        register!(entries, "new_metric", NewMetric);

        Self { entries }
    }

    /// Get a schema by name. Returns `None` if not found.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&serde_json::Value> {
        self.entries.get(name).map(|e| &e.schema)
    }

    /// Select schema of `entity`.
    #[must_use]
    pub fn select_schema(&self, entity: EntityType) -> Option<&serde_json::Value> {
        self.get(entity.as_str())
    }

    /// Validate a JSON value against a named schema.
    ///
    /// # Errors
    ///
    /// Returns `SchemaError::NotFound` if the schema name is unknown, or
    /// `SchemaError::ValidationFailed` listing every violation.
    pub fn validate(&self, name: &str, instance: &serde_json::Value) -> Result<(), SchemaError> {
        let entry = self
            .entries
            .get(name)
            .ok_or_else(|| SchemaError::NotFound(name.to_string()))?;

        let errors: Vec<String> = entry
            .validator
            .iter_errors(instance)
            .map(|e| format!("{e}"))
            .collect();

        if errors.is_empty() {
            Ok(())
        } else {
            Err(SchemaError::ValidationFailed {
                schema: name.to_string(),
                errors,
            })
        }
    }

    /// Validate a record read from storage against its entity's select shape.
    ///
    /// # Errors
    ///
    /// Returns `SchemaError::ValidationFailed` if the record does not match.
    pub fn validate_record(
        &self,
        entity: EntityType,
        record: &serde_json::Value,
    ) -> Result<(), SchemaError> {
        self.validate(entity.as_str(), record)
    }

    /// List all registered schema names.
    #[must_use]
    pub fn list(&self) -> Vec<&'static str> {
        let mut names: Vec<&'static str> = self.entries.keys().copied().collect();
        names.sort_unstable();
        names
    }

    /// Number of registered schemas.
    #[must_use]
    pub fn schema_count(&self) -> usize {
        self.entries.len()
    }
}

impl Default for SchemaRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aud_core::entities::Finding;
    use aud_core::enums::{FindingStatus, Priority};
    use chrono::Utc;
    use serde_json::json;

    fn registry() -> SchemaRegistry {
        SchemaRegistry::new()
    }

    #[test]
    fn registry_has_expected_count() {
        // 5 select + 5 insert
        assert_eq!(registry().schema_count(), 10);
    }

    #[test]
    fn registry_list_is_sorted() {
        let names = registry().list();
        let mut sorted = names.clone();
        sorted.sort_unstable();
        assert_eq!(names, sorted);
    }

    #[test]
    fn every_entity_has_a_select_schema() {
        let reg = registry();
        for entity in EntityType::ALL {
            assert!(reg.select_schema(entity).is_some(), "{entity}");
        }
    }

    #[test]
    fn validate_valid_finding() {
        let finding = Finding {
            id: 1,
            audit_id: 1,
            title: "Stale admin accounts".into(),
            description: "3 accounts unused 90+ days".into(),
            risk_level: Priority::Medium,
            category: None,
            status: FindingStatus::Open,
            recommendation: None,
            assigned_to: None,
            due_date: None,
            resolved_date: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        let json = serde_json::to_value(&finding).unwrap();
        assert!(registry().validate_record(EntityType::Finding, &json).is_ok());
    }

    #[test]
    fn validate_rejects_missing_required_field() {
        let invalid = json!({
            "id": 1,
            "auditId": 1,
            // "description" is missing
            "title": "t",
            "riskLevel": "medium",
            "status": "open",
            "createdAt": "2026-02-08T12:00:00Z",
            "updatedAt": "2026-02-08T12:00:00Z"
        });
        let result = registry().validate("finding", &invalid);
        match result {
            Err(SchemaError::ValidationFailed { schema, errors }) => {
                assert_eq!(schema, "finding");
                assert!(!errors.is_empty());
            }
            other => panic!("Expected ValidationFailed, got {other:?}"),
        }
    }

    #[test]
    fn validate_rejects_invalid_enum() {
        let invalid = json!({
            "id": 1,
            "auditId": 1,
            "findingId": null,
            "title": "t",
            "status": "lost",
            "createdAt": "2026-02-08T12:00:00Z",
            "updatedAt": "2026-02-08T12:00:00Z"
        });
        assert!(registry().validate("evidence", &invalid).is_err());
    }

    #[test]
    fn validate_accepts_empty_metric_type() {
        let metric = json!({
            "id": 1,
            "auditId": 1,
            "metricType": "",
            "value": 0.5,
            "targetValue": null,
            "unit": null,
            "recordedAt": "2026-02-08T12:00:00.000000Z"
        });
        assert!(registry().validate("metric", &metric).is_ok());
    }

    #[test]
    fn validate_nonexistent_schema_returns_not_found() {
        let result = registry().validate("bogus", &json!({}));
        assert!(matches!(result, Err(SchemaError::NotFound(_))));
    }
}
