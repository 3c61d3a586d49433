//! Finding repository.

use aud_core::entities::{Finding, NewFinding};
use aud_core::enums::{EntityType, FindingStatus, Priority};
use aud_core::updates::FindingUpdate;
use serde::{Deserialize, Serialize};

use super::{Conditions, Page, integer, text};
use crate::error::DatabaseError;
use crate::service::{AudService, Deleted};

/// Filter criteria for listing findings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FindingFilter {
    pub audit_id: Option<i64>,
    pub status: Option<FindingStatus>,
    pub risk_level: Option<Priority>,
    pub search: Option<String>,
    pub limit: Option<u32>,
    pub offset: Option<u32>,
}

impl AudService {
    /// # Errors
    ///
    /// Returns `DatabaseError::Validation`, or `DatabaseError::ForeignKey` if
    /// the audit does not exist.
    pub async fn create_finding(&self, new: &NewFinding) -> Result<Finding, DatabaseError> {
        self.insert_record(new).await
    }

    /// # Errors
    ///
    /// Returns `DatabaseError::NotFound` if the finding does not exist.
    pub async fn get_finding(&self, id: i64) -> Result<Finding, DatabaseError> {
        self.get_record(id).await
    }

    /// # Errors
    ///
    /// Returns `DatabaseError::NotFound` or `DatabaseError::Validation`.
    pub async fn update_finding(
        &self,
        id: i64,
        update: &FindingUpdate,
    ) -> Result<Finding, DatabaseError> {
        self.update_record(id, update).await
    }

    /// Delete a finding with its recommendations and any evidence that
    /// references it. The parent audit is untouched.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::NotFound` if the finding does not exist.
    pub async fn delete_finding(&self, id: i64) -> Result<Deleted, DatabaseError> {
        self.delete_cascade(EntityType::Finding, id).await
    }

    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails.
    pub async fn list_findings(
        &self,
        filter: &FindingFilter,
    ) -> Result<Vec<Finding>, DatabaseError> {
        let mut conditions = Conditions::default();
        conditions.eq("audit_id", integer(filter.audit_id));
        conditions.eq("status", text(filter.status));
        conditions.eq("risk_level", text(filter.risk_level));
        conditions.search(&["title", "description"], filter.search.as_deref());
        self.list_records(conditions, Page::new(filter.limit, filter.offset))
            .await
    }
}
