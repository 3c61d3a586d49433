//! Finding update builder.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::enums::{EntityType, FindingStatus, Priority};
use crate::validation::UpdateShape;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FindingUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub risk_level: Option<Priority>,
    #[serde(skip_serializing_if = "Option::is_none", deserialize_with = "super::present")]
    pub category: Option<Option<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<FindingStatus>,
    #[serde(skip_serializing_if = "Option::is_none", deserialize_with = "super::present")]
    pub recommendation: Option<Option<String>>,
    #[serde(skip_serializing_if = "Option::is_none", deserialize_with = "super::present")]
    pub assigned_to: Option<Option<String>>,
    #[serde(skip_serializing_if = "Option::is_none", deserialize_with = "super::present")]
    pub due_date: Option<Option<DateTime<Utc>>>,
    #[serde(skip_serializing_if = "Option::is_none", deserialize_with = "super::present")]
    pub resolved_date: Option<Option<DateTime<Utc>>>,
}

impl UpdateShape for FindingUpdate {
    const ENTITY: EntityType = EntityType::Finding;
}

#[derive(Debug, Default)]
pub struct FindingUpdateBuilder(FindingUpdate);

impl FindingUpdateBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self(FindingUpdate::default())
    }

    #[must_use]
    pub fn title(mut self, val: impl Into<String>) -> Self {
        self.0.title = Some(val.into());
        self
    }

    #[must_use]
    pub fn description(mut self, val: impl Into<String>) -> Self {
        self.0.description = Some(val.into());
        self
    }

    #[must_use]
    pub fn risk_level(mut self, val: Priority) -> Self {
        self.0.risk_level = Some(val);
        self
    }

    #[must_use]
    pub fn category(mut self, val: Option<String>) -> Self {
        self.0.category = Some(val);
        self
    }

    #[must_use]
    pub fn status(mut self, val: FindingStatus) -> Self {
        self.0.status = Some(val);
        self
    }

    #[must_use]
    pub fn recommendation(mut self, val: Option<String>) -> Self {
        self.0.recommendation = Some(val);
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
    pub fn resolved_date(mut self, val: Option<DateTime<Utc>>) -> Self {
        self.0.resolved_date = Some(val);
        self
    }

    #[must_use]
    pub fn build(self) -> FindingUpdate {
        self.0
    }
}
