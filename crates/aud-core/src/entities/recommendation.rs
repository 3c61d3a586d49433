use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::Record;
use crate::enums::{EntityType, Priority, RecommendationStatus};
use crate::validation::InsertShape;

/// A remediation action attached to a finding.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Recommendation {
    pub id: i64,
    pub finding_id: i64,
    pub description: String,
    pub priority: Priority,
    pub status: RecommendationStatus,
    pub assigned_to: Option<String>,
    pub due_date: Option<DateTime<Utc>>,
    pub completed_date: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Record for Recommendation {
    const ENTITY: EntityType = EntityType::Recommendation;

    fn id(&self) -> i64 {
        self.id
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct NewRecommendation {
    pub finding_id: i64,
    pub description: String,
    pub priority: Priority,
    pub status: RecommendationStatus,
    pub assigned_to: Option<String>,
    pub due_date: Option<DateTime<Utc>>,
    pub completed_date: Option<DateTime<Utc>>,
}

impl NewRecommendation {
    pub fn new(finding_id: i64, description: impl Into<String>) -> Self {
        Self {
            finding_id,
            description: description.into(),
            priority: Priority::Medium,
            status: RecommendationStatus::Pending,
            assigned_to: None,
            due_date: None,
            completed_date: None,
        }
    }
}

impl InsertShape for NewRecommendation {
    const ENTITY: EntityType = EntityType::Recommendation;
}
