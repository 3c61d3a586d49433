use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::Record;
use crate::enums::{EntityType, EvidenceStatus};
use crate::validation::InsertShape;

/// A reference to supporting material for an audit, optionally tied to one
/// of its findings. Only the path and type of the file are recorded.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Evidence {
    pub id: i64,
    pub audit_id: i64,
    pub finding_id: Option<i64>,
    pub title: String,
    pub description: Option<String>,
    pub file_path: Option<String>,
    pub file_type: Option<String>,
    pub status: EvidenceStatus,
    pub uploaded_by: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Record for Evidence {
    const ENTITY: EntityType = EntityType::Evidence;

    fn id(&self) -> i64 {
        self.id
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct NewEvidence {
    pub audit_id: i64,
    pub finding_id: Option<i64>,
    pub title: String,
    pub description: Option<String>,
    pub file_path: Option<String>,
    pub file_type: Option<String>,
    pub status: EvidenceStatus,
    pub uploaded_by: Option<String>,
}

impl NewEvidence {
    pub fn new(audit_id: i64, title: impl Into<String>) -> Self {
        Self {
            audit_id,
            finding_id: None,
            title: title.into(),
            description: None,
            file_path: None,
            file_type: None,
            status: EvidenceStatus::Submitted,
            uploaded_by: None,
        }
    }
}

impl InsertShape for NewEvidence {
    const ENTITY: EntityType = EntityType::Evidence;
}
