//! Metric repository.
//!
//! Metrics are raw measurements: they are recorded once and never updated.

use aud_core::entities::{Metric, NewMetric};
use aud_core::enums::EntityType;
use serde::{Deserialize, Serialize};

use super::{Conditions, Page, integer, text};
use crate::error::DatabaseError;
use crate::service::{AudService, Deleted};

/// Filter criteria for listing metrics.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct MetricFilter {
    pub audit_id: Option<i64>,
    pub metric_type: Option<String>,
    pub limit: Option<u32>,
    pub offset: Option<u32>,
}

impl AudService {
    /// # Errors
    ///
    /// Returns `DatabaseError::Validation`, or `DatabaseError::ForeignKey` if
    /// the audit does not exist.
    pub async fn create_metric(&self, new: &NewMetric) -> Result<Metric, DatabaseError> {
        self.insert_record(new).await
    }

    /// # Errors
    ///
    /// Returns `DatabaseError::NotFound` if the metric does not exist.
    pub async fn get_metric(&self, id: i64) -> Result<Metric, DatabaseError> {
        self.get_record(id).await
    }

    /// # Errors
    ///
    /// Returns `DatabaseError::NotFound` if the metric does not exist.
    pub async fn delete_metric(&self, id: i64) -> Result<Deleted, DatabaseError> {
        self.delete_cascade(EntityType::Metric, id).await
    }

    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails.
    pub async fn list_metrics(&self, filter: &MetricFilter) -> Result<Vec<Metric>, DatabaseError> {
        let mut conditions = Conditions::default();
        conditions.eq("audit_id", integer(filter.audit_id));
        conditions.eq("metric_type", text(filter.metric_type.as_deref()));
        self.list_records(conditions, Page::new(filter.limit, filter.offset))
            .await
    }
}
