//! Recommendation update builder.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::enums::{EntityType, Priority, RecommendationStatus};
use crate::validation::UpdateShape;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RecommendationUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<Priority>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<RecommendationStatus>,
    #[serde(skip_serializing_if = "Option::is_none", deserialize_with = "super::present")]
    pub assigned_to: Option<Option<String>>,
    #[serde(skip_serializing_if = "Option::is_none", deserialize_with = "super::present")]
    pub due_date: Option<Option<DateTime<Utc>>>,
    #[serde(skip_serializing_if = "Option::is_none", deserialize_with = "super::present")]
    pub completed_date: Option<Option<DateTime<Utc>>>,
}

impl UpdateShape for RecommendationUpdate {
    const ENTITY: EntityType = EntityType::Recommendation;
}

#[derive(Debug, Default)]
pub struct RecommendationUpdateBuilder(RecommendationUpdate);

impl RecommendationUpdateBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self(RecommendationUpdate::default())
    }

    #[must_use]
    pub fn description(mut self, val: impl Into<String>) -> Self {
        self.0.description = Some(val.into());
        self
    }

    #[must_use]
    pub fn priority(mut self, val: Priority) -> Self {
        self.0.priority = Some(val);
        self
    }

    #[must_use]
    pub fn status(mut self, val: RecommendationStatus) -> Self {
        self.0.status = Some(val);
        self
    }

    #[must_use]
    pub fn assigned_to(mut self, val: Option<String>) -> Self {
        self.0.assigned_to = Some(val);
        self
    }

    #[must_use]
    pub fn due_date(mut self, val: Option<DateTime<Utc>>) -> Self {
        self.0.due_date = Some(val);
        self
    }

    #[must_use]
    pub fn completed_date(mut self, val: Option<DateTime<Utc>>) -> Self {
        self.0.completed_date = Some(val);
        self
    }

    #[must_use]
    pub fn build(self) -> RecommendationUpdate {
        self.0
    }
}
