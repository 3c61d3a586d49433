//! Audit update builder.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::enums::{AuditStatus, AuditType, EntityType, Priority};
use crate::validation::UpdateShape;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AuditUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", deserialize_with = "super::present")]
    pub description: Option<Option<String>>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub audit_type: Option<AuditType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<AuditStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<Priority>,
    #[serde(skip_serializing_if = "Option::is_none", deserialize_with = "super::present")]
    pub start_date: Option<Option<DateTime<Utc>>>,
    #[serde(skip_serializing_if = "Option::is_none", deserialize_with = "super::present")]
    pub end_date: Option<Option<DateTime<Utc>>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none", deserialize_with = "super::present")]
    pub auditor_id: Option<Option<String>>,
    #[serde(skip_serializing_if = "Option::is_none", deserialize_with = "super::present")]
    pub department: Option<Option<String>>,
    #[serde(skip_serializing_if = "Option::is_none", deserialize_with = "super::present")]
    pub scope: Option<Option<String>>,
}

impl UpdateShape for AuditUpdate {
    const ENTITY: EntityType = EntityType::Audit;
}

#[derive(Debug, Default)]
pub struct AuditUpdateBuilder(AuditUpdate);

impl AuditUpdateBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self(AuditUpdate::default())
    }

    #[must_use]
    pub fn title(mut self, val: impl Into<String>) -> Self {
        self.0.title = Some(val.into());
        self
    }

    #[must_use]
    pub fn description(mut self, val: Option<String>) -> Self {
        self.0.description = Some(val);
        self
    }

    #[must_use]
    pub fn audit_type(mut self, val: AuditType) -> Self {
        self.0.audit_type = Some(val);
        self
    }

    #[must_use]
    pub fn status(mut self, val: AuditStatus) -> Self {
        self.0.status = Some(val);
        self
    }

    #[must_use]
    pub fn priority(mut self, val: Priority) -> Self {
        self.0.priority = Some(val);
        self
    }

    #[must_use]
    pub fn start_date(mut self, val: Option<DateTime<Utc>>) -> Self {
        self.0.start_date = Some(val);
        self
    }

    #[must_use]
    pub fn end_date(mut self, val: Option<DateTime<Utc>>) -> Self {
        self.0.end_date = Some(val);
        self
    }

    #[must_use]
    pub fn due_date(mut self, val: DateTime<Utc>) -> Self {
        self.0.due_date = Some(val);
        self
    }

    #[must_use]
    pub fn auditor_id(mut self, val: Option<String>) -> Self {
        self.0.auditor_id = Some(val);
        self
    }

    #[must_use]
    pub fn department(mut self, val: Option<String>) -> Self {
        self.0.department = Some(val);
        self
    }

    #[must_use]
    pub fn scope(mut self, val: Option<String>) -> Self {
        self.0.scope = Some(val);
        self
    }

    #[must_use]
    pub fn build(self) -> AuditUpdate {
        self.0
    }
}
