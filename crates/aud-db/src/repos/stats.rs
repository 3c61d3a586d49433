//! Dashboard counters across audits and findings.

use serde::{Deserialize, Serialize};

use crate::error::DatabaseError;
use crate::service::AudService;

/// Aggregate counts for the audit overview.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditStats {
    pub total_audits: i64,
    pub completed_audits: i64,
    pub in_progress_audits: i64,
    /// Audits whose status is `overdue`.
    pub overdue_audits: i64,
    pub total_findings: i64,
    pub open_findings: i64,
    pub critical_findings: i64,
    /// Completed audits as a percentage of all audits; 0 when there are none.
    pub completion_rate: f64,
}

const STATS_SQL: &str = "SELECT \
    (SELECT COUNT(*) FROM audits), \
    (SELECT COUNT(*) FROM audits WHERE status = 'completed'), \
    (SELECT COUNT(*) FROM audits WHERE status = 'in_progress'), \
    (SELECT COUNT(*) FROM audits WHERE status = 'overdue'), \
    (SELECT COUNT(*) FROM audit_findings), \
    (SELECT COUNT(*) FROM audit_findings WHERE status = 'open'), \
    (SELECT COUNT(*) FROM audit_findings WHERE risk_level = 'critical')";

impl AudService {
    /// Compute the overview counters in one statement.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the count query fails.
    pub async fn audit_stats(&self) -> Result<AuditStats, DatabaseError> {
        let [
            total_audits,
            completed_audits,
            in_progress_audits,
            overdue_audits,
            total_findings,
            open_findings,
            critical_findings,
        ] = self.integers(STATS_SQL).await?;

        Ok(AuditStats {
            total_audits,
            completed_audits,
            in_progress_audits,
            overdue_audits,
            total_findings,
            open_findings,
            critical_findings,
            completion_rate: completion_rate(completed_audits, total_audits),
        })
    }
}

#[allow(clippy::cast_precision_loss)]
fn completion_rate(completed: i64, total: i64) -> f64 {
    if total == 0 {
        0.0
    } else {
        completed as f64 / total as f64 * 100.0
    }
}
