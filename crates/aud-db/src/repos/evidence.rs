//! Evidence repository.
//!
//! Evidence always belongs to an audit and may additionally point at any
//! existing finding, including one filed under a different audit. Deleting
//! either parent removes the evidence. `findingId` is the only reference
//! that can change after creation.

use aud_core::entities::{Evidence, NewEvidence};
use aud_core::enums::{EntityType, EvidenceStatus};
use aud_core::updates::EvidenceUpdate;
use serde::{Deserialize, Serialize};

use super::{Conditions, Page, integer, text};
use crate::error::DatabaseError;
use crate::service::{AudService, Deleted};

/// Filter criteria for listing evidence.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EvidenceFilter {
    pub audit_id: Option<i64>,
    pub finding_id: Option<i64>,
    pub status: Option<EvidenceStatus>,
    pub search: Option<String>,
    pub limit: Option<u32>,
    pub offset: Option<u32>,
}

impl AudService {
    /// # Errors
    ///
    /// Returns `DatabaseError::Validation`, or `DatabaseError::ForeignKey` if
    /// the audit or the finding does not exist.
    pub async fn create_evidence(&self, new: &NewEvidence) -> Result<Evidence, DatabaseError> {
        self.insert_record(new).await
    }

    /// # Errors
    ///
    /// Returns `DatabaseError::NotFound` if the evidence does not exist.
    pub async fn get_evidence(&self, id: i64) -> Result<Evidence, DatabaseError> {
        self.get_record(id).await
    }

    /// # Errors
    ///
    /// Returns `DatabaseError::NotFound`, `DatabaseError::Validation`, or
    /// `DatabaseError::ForeignKey` if a new `findingId` does not exist.
    pub async fn update_evidence(
        &self,
        id: i64,
        update: &EvidenceUpdate,
    ) -> Result<Evidence, DatabaseError> {
        self.update_record(id, update).await
    }

    /// # Errors
    ///
    /// Returns `DatabaseError::NotFound` if the evidence does not exist.
    pub async fn delete_evidence(&self, id: i64) -> Result<Deleted, DatabaseError> {
        self.delete_cascade(EntityType::Evidence, id).await
    }

    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails.
    pub async fn list_evidence(
        &self,
        filter: &EvidenceFilter,
    ) -> Result<Vec<Evidence>, DatabaseError> {
        let mut conditions = Conditions::default();
        conditions.eq("audit_id", integer(filter.audit_id));
        conditions.eq("finding_id", integer(filter.finding_id));
        conditions.eq("status", text(filter.status));
        conditions.search(&["title", "description"], filter.search.as_deref());
        self.list_records(conditions, Page::new(filter.limit, filter.offset))
            .await
    }
}
