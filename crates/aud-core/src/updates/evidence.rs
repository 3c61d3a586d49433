//! Evidence update builder.

use serde::{Deserialize, Serialize};

use crate::enums::{EntityType, EvidenceStatus};
use crate::validation::UpdateShape;

/// Sparse evidence update. `finding_id` may be attached, moved, or cleared;
/// `audit_id` is fixed at creation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EvidenceUpdate {
    #[serde(skip_serializing_if = "Option::is_none", deserialize_with = "super::present")]
    pub finding_id: Option<Option<i64>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", deserialize_with = "super::present")]
    pub description: Option<Option<String>>,
    #[serde(skip_serializing_if = "Option::is_none", deserialize_with = "super::present")]
    pub file_path: Option<Option<String>>,
    #[serde(skip_serializing_if = "Option::is_none", deserialize_with = "super::present")]
    pub file_type: Option<Option<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<EvidenceStatus>,
    #[serde(skip_serializing_if = "Option::is_none", deserialize_with = "super::present")]
    pub uploaded_by: Option<Option<String>>,
}

impl UpdateShape for EvidenceUpdate {
    const ENTITY: EntityType = EntityType::Evidence;
}

#[derive(Debug, Default)]
pub struct EvidenceUpdateBuilder(EvidenceUpdate);

impl EvidenceUpdateBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self(EvidenceUpdate::default())
    }

    #[must_use]
    pub fn finding_id(mut self, val: Option<i64>) -> Self {
        self.0.finding_id = Some(val);
        self
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
    pub fn file_path(mut self, val: Option<String>) -> Self {
        self.0.file_path = Some(val);
        self
    }

    #[must_use]
    pub fn file_type(mut self, val: Option<String>) -> Self {
        self.0.file_type = Some(val);
        self
    }

    #[must_use]
    pub fn status(mut self, val: EvidenceStatus) -> Self {
        self.0.status = Some(val);
        self
    }

    #[must_use]
    pub fn uploaded_by(mut self, val: Option<String>) -> Self {
        self.0.uploaded_by = Some(val);
        self
    }

    #[must_use]
    pub fn build(self) -> EvidenceUpdate {
        self.0
    }
}
