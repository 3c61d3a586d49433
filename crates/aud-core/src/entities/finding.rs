use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::Record;
use crate::enums::{EntityType, FindingStatus, Priority};
use crate::validation::InsertShape;

/// An issue discovered during an audit.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Finding {
    pub id: i64,
    pub audit_id: i64,
    pub title: String,
    pub description: String,
    pub risk_level: Priority,
    pub category: Option<String>,
    pub status: FindingStatus,
    /// Free-text remediation note, distinct from `Recommendation` records.
    pub recommendation: Option<String>,
    pub assigned_to: Option<String>,
    pub due_date: Option<DateTime<Utc>>,
    pub resolved_date: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Record for Finding {
    const ENTITY: EntityType = EntityType::Finding;

    fn id(&self) -> i64 {
        self.id
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct NewFinding {
    pub audit_id: i64,
    pub title: String,
    pub description: String,
    pub risk_level: Priority,
    pub category: Option<String>,
    pub status: FindingStatus,
    pub recommendation: Option<String>,
    pub assigned_to: Option<String>,
    pub due_date: Option<DateTime<Utc>>,
    pub resolved_date: Option<DateTime<Utc>>,
}

impl NewFinding {
    pub fn new(audit_id: i64, title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            audit_id,
            title: title.into(),
            description: description.into(),
            risk_level: Priority::Medium,
            category: None,
            status: FindingStatus::Open,
            recommendation: None,
            assigned_to: None,
            due_date: None,
            resolved_date: None,
        }
    }
}

impl InsertShape for NewFinding {
    const ENTITY: EntityType = EntityType::Finding;
}
