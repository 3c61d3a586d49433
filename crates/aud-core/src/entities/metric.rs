use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::Record;
use crate::enums::EntityType;
use crate::validation::InsertShape;

/// A raw KPI measurement recorded against an audit.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Metric {
    pub id: i64,
    pub audit_id: i64,
    pub metric_type: String,
    pub value: f64,
    pub target_value: Option<f64>,
    pub unit: Option<String>,
    pub recorded_at: DateTime<Utc>,
}

impl Record for Metric {
    const ENTITY: EntityType = EntityType::Metric;

    fn id(&self) -> i64 {
        self.id
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NewMetric {
    pub audit_id: i64,
    pub metric_type: String,
    pub value: f64,
    pub target_value: Option<f64>,
    pub unit: Option<String>,
}

impl NewMetric {
    pub fn new(audit_id: i64, metric_type: impl Into<String>, value: f64) -> Self {
        Self {
            audit_id,
            metric_type: metric_type.into(),
            value,
            target_value: None,
            unit: None,
        }
    }
}

impl InsertShape for NewMetric {
    const ENTITY: EntityType = EntityType::Metric;
}
