use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::Record;
use crate::enums::{AuditStatus, AuditType, EntityType, Priority};
use crate::validation::InsertShape;

/// An audit engagement: the root of the record tree.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Audit {
    pub id: i64,
    pub title: String,
    pub description: Option<String>,
    #[serde(rename = "type")]
    pub audit_type: AuditType,
    pub status: AuditStatus,
    pub priority: Priority,
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
    pub due_date: DateTime<Utc>,
    pub auditor_id: Option<String>,
    pub department: Option<String>,
    pub scope: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Record for Audit {
    const ENTITY: EntityType = EntityType::Audit;

    fn id(&self) -> i64 {
        self.id
    }
}

/// Insert shape of [`Audit`].
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct NewAudit {
    pub title: String,
    pub description: Option<String>,
    #[serde(rename = "type")]
    pub audit_type: AuditType,
    pub status: AuditStatus,
    pub priority: Priority,
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
    pub due_date: DateTime<Utc>,
    pub auditor_id: Option<String>,
    pub department: Option<String>,
    pub scope: Option<String>,
}

impl NewAudit {
    /// Minimal audit with declared defaults for everything optional.
    pub fn new(title: impl Into<String>, audit_type: AuditType, due_date: DateTime<Utc>) -> Self {
        Self {
            title: title.into(),
            description: None,
            audit_type,
            status: AuditStatus::Planned,
            priority: Priority::Medium,
            start_date: None,
            end_date: None,
            due_date,
            auditor_id: None,
            department: None,
            scope: None,
        }
    }
}

impl InsertShape for NewAudit {
    const ENTITY: EntityType = EntityType::Audit;
}
