//! Audit repository: CRUD, filtered listing, cascade delete.

use aud_core::entities::{Audit, NewAudit};
use aud_core::enums::{AuditStatus, AuditType, EntityType, Priority};
use aud_core::updates::AuditUpdate;
use serde::{Deserialize, Serialize};

use super::{Conditions, Page, text};
use crate::error::DatabaseError;
use crate::service::{AudService, Deleted};

/// Filter criteria for listing audits. Every field is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AuditFilter {
    pub status: Option<AuditStatus>,
    #[serde(rename = "type")]
    pub audit_type: Option<AuditType>,
    pub priority: Option<Priority>,
    pub department: Option<String>,
    /// Substring of `title` or `description`, case-insensitive.
    pub search: Option<String>,
    pub limit: Option<u32>,
    pub offset: Option<u32>,
}

impl AudService {
    /// # Errors
    ///
    /// Returns `DatabaseError::Validation` if the payload breaks a field rule.
    pub async fn create_audit(&self, new: &NewAudit) -> Result<Audit, DatabaseError> {
        self.insert_record(new).await
    }

    /// # Errors
    ///
    /// Returns `DatabaseError::NotFound` if the audit does not exist.
    pub async fn get_audit(&self, id: i64) -> Result<Audit, DatabaseError> {
        self.get_record(id).await
    }

    /// # Errors
    ///
    /// Returns `DatabaseError::NotFound` or `DatabaseError::Validation`.
    pub async fn update_audit(
        &self,
        id: i64,
        update: &AuditUpdate,
    ) -> Result<Audit, DatabaseError> {
        self.update_record(id, update).await
    }

    /// Delete an audit with its findings (and their recommendations and
    /// evidence), evidence, and metrics.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::NotFound` if the audit does not exist.
    pub async fn delete_audit(&self, id: i64) -> Result<Deleted, DatabaseError> {
        self.delete_cascade(EntityType::Audit, id).await
    }

    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails.
    pub async fn list_audits(&self, filter: &AuditFilter) -> Result<Vec<Audit>, DatabaseError> {
        let mut conditions = Conditions::default();
        conditions.eq("status", text(filter.status));
        conditions.eq("type", text(filter.audit_type));
        conditions.eq("priority", text(filter.priority));
        conditions.eq("department", text(filter.department.as_deref()));
        conditions.search(&["title", "description"], filter.search.as_deref());
        self.list_records(conditions, Page::new(filter.limit, filter.offset))
            .await
    }
}

#[cfg(test)]
mod tests {
    use aud_core::entities::{NewEvidence, NewMetric, NewRecommendation};
    use aud_core::enums::{AuditStatus, AuditType, EntityType, FindingStatus, Priority};
    use aud_core::updates::AuditUpdateBuilder;
    use aud_core::validation::IssueKind;
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::test_support::helpers::{due, seed_audit, seed_finding, test_service};

    #[tokio::test]
    async fn create_applies_defaults_and_stamps() {
        let svc = test_service().await;
        let audit = seed_audit(&svc, "Q1 Access Review").await;

        assert_eq!(audit.id, 1);
        assert_eq!(audit.title, "Q1 Access Review");
        assert_eq!(audit.status, AuditStatus::Planned);
        assert_eq!(audit.priority, Priority::Medium);
        assert_eq!(audit.due_date, due());
        assert_eq!(audit.created_at, audit.updated_at);
    }

    #[tokio::test]
    async fn create_then_get_roundtrips() {
        let svc = test_service().await;
        let mut new = NewAudit::new("SOX walkthrough", AuditType::Financial, due());
        new.description = Some("Year-end controls".into());
        new.department = Some("Finance".into());
        let created = svc.create_audit(&new).await.unwrap();

        let fetched = svc.get_audit(created.id).await.unwrap();
        assert_eq!(fetched, created);
    }

    #[tokio::test]
    async fn ids_are_unique_and_increasing() {
        let svc = test_service().await;
        let a = seed_audit(&svc, "a").await;
        let b = seed_audit(&svc, "b").await;
        assert!(b.id > a.id);
    }

    #[tokio::test]
    async fn create_rejects_empty_title_without_touching_store() {
        let svc = test_service().await;
        let err = svc
            .create_audit(&NewAudit::new("", AuditType::Internal, due()))
            .await
            .unwrap_err();
        let DatabaseError::Validation(errors) = err else {
            panic!("expected validation error, got {err:?}");
        };
        assert_eq!(errors.issue_for("title"), Some(&IssueKind::Empty));
        assert!(svc.list_audits(&AuditFilter::default()).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn get_missing_is_not_found() {
        let svc = test_service().await;
        let err = svc.get_audit(42).await.unwrap_err();
        assert!(matches!(
            err,
            DatabaseError::NotFound { entity: EntityType::Audit, id: 42 }
        ));
    }

    #[tokio::test]
    async fn update_changes_only_supplied_fields() {
        let svc = test_service().await;
        let audit = seed_audit(&svc, "Q1 Access Review").await;

        let update = AuditUpdateBuilder::new()
            .status(AuditStatus::InProgress)
            .department(Some("IT".into()))
            .build();
        let updated = svc.update_audit(audit.id, &update).await.unwrap();

        assert_eq!(updated.status, AuditStatus::InProgress);
        assert_eq!(updated.department.as_deref(), Some("IT"));
        assert_eq!(updated.title, audit.title);
        assert_eq!(updated.priority, audit.priority);
        assert_eq!(updated.created_at, audit.created_at);
        assert!(updated.updated_at > audit.updated_at);
    }

    #[tokio::test]
    async fn update_can_clear_nullable_field() {
        let svc = test_service().await;
        let mut new = NewAudit::new("t", AuditType::Security, due());
        new.scope = Some("prod".into());
        let audit = svc.create_audit(&new).await.unwrap();

        let update = AuditUpdateBuilder::new().scope(None).build();
        let updated = svc.update_audit(audit.id, &update).await.unwrap();
        assert_eq!(updated.scope, None);
    }

    #[tokio::test]
    async fn consecutive_updates_strictly_increase_updated_at() {
        let svc = test_service().await;
        let audit = seed_audit(&svc, "t").await;
        let mut last = audit.updated_at;
        for title in ["one", "two", "three"] {
            let update = AuditUpdateBuilder::new().title(title).build();
            let updated = svc.update_audit(audit.id, &update).await.unwrap();
            assert!(updated.updated_at > last);
            last = updated.updated_at;
        }
    }

    #[tokio::test]
    async fn empty_update_returns_record_unchanged() {
        let svc = test_service().await;
        let audit = seed_audit(&svc, "t").await;
        let same = svc
            .update_audit(audit.id, &AuditUpdate::default())
            .await
            .unwrap();
        assert_eq!(same, audit);
    }

    #[tokio::test]
    async fn update_missing_is_not_found() {
        let svc = test_service().await;
        let update = AuditUpdateBuilder::new().title("x").build();
        let err = svc.update_audit(9, &update).await.unwrap_err();
        assert!(matches!(err, DatabaseError::NotFound { id: 9, .. }));
    }

    #[tokio::test]
    async fn update_rejects_empty_title() {
        let svc = test_service().await;
        let audit = seed_audit(&svc, "t").await;
        let update = AuditUpdateBuilder::new().title("").build();
        let err = svc.update_audit(audit.id, &update).await.unwrap_err();
        assert!(matches!(err, DatabaseError::Validation(_)));
        assert_eq!(svc.get_audit(audit.id).await.unwrap().title, "t");
    }

    #[tokio::test]
    async fn delete_cascades_to_whole_subtree() {
        let svc = test_service().await;
        let audit = seed_audit(&svc, "Q1 Access Review").await;
        let finding = seed_finding(&svc, audit.id, "Stale admin accounts").await;
        svc.create_recommendation(&NewRecommendation::new(finding.id, "Disable them"))
            .await
            .unwrap();
        let mut linked = NewEvidence::new(audit.id, "screenshot");
        linked.finding_id = Some(finding.id);
        svc.create_evidence(&linked).await.unwrap();
        svc.create_evidence(&NewEvidence::new(audit.id, "policy pdf"))
            .await
            .unwrap();
        svc.create_metric(&NewMetric::new(audit.id, "coverage", 0.8))
            .await
            .unwrap();

        let deleted = svc.delete_audit(audit.id).await.unwrap();
        assert_eq!(deleted.id, audit.id);
        assert_eq!(deleted.cascaded_count(EntityType::Finding), 1);
        assert_eq!(deleted.cascaded_count(EntityType::Recommendation), 1);
        assert_eq!(deleted.cascaded_count(EntityType::Evidence), 2);
        assert_eq!(deleted.cascaded_count(EntityType::Metric), 1);

        assert!(matches!(
            svc.get_finding(finding.id).await,
            Err(DatabaseError::NotFound { .. })
        ));
        assert!(matches!(
            svc.get_audit(audit.id).await,
            Err(DatabaseError::NotFound { .. })
        ));
    }

    #[tokio::test]
    async fn delete_missing_is_not_found() {
        let svc = test_service().await;
        assert!(matches!(
            svc.delete_audit(3).await,
            Err(DatabaseError::NotFound { entity: EntityType::Audit, id: 3 })
        ));
    }

    #[tokio::test]
    async fn delete_leaves_other_audits_alone() {
        let svc = test_service().await;
        let a = seed_audit(&svc, "a").await;
        let b = seed_audit(&svc, "b").await;
        let kept = seed_finding(&svc, b.id, "kept").await;
        seed_finding(&svc, a.id, "gone").await;

        svc.delete_audit(a.id).await.unwrap();
        assert_eq!(svc.get_finding(kept.id).await.unwrap(), kept);
    }

    #[tokio::test]
    async fn list_filters_and_orders() {
        let svc = test_service().await;
        let mut security = NewAudit::new("Pen test", AuditType::Security, due());
        security.department = Some("IT".into());
        security.priority = Priority::High;
        svc.create_audit(&security).await.unwrap();
        seed_audit(&svc, "Inventory count").await;
        let mut finance = NewAudit::new("Payroll", AuditType::Financial, due());
        finance.status = AuditStatus::Completed;
        finance.department = Some("Finance".into());
        svc.create_audit(&finance).await.unwrap();

        let all = svc.list_audits(&AuditFilter::default()).await.unwrap();
        let ids: Vec<i64> = all.iter().map(|a| a.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);

        let by_type = AuditFilter {
            audit_type: Some(AuditType::Security),
            ..AuditFilter::default()
        };
        assert_eq!(svc.list_audits(&by_type).await.unwrap().len(), 1);

        let by_status = AuditFilter {
            status: Some(AuditStatus::Completed),
            ..AuditFilter::default()
        };
        assert_eq!(svc.list_audits(&by_status).await.unwrap()[0].title, "Payroll");

        let by_dept_and_priority = AuditFilter {
            department: Some("IT".into()),
            priority: Some(Priority::High),
            ..AuditFilter::default()
        };
        assert_eq!(
            svc.list_audits(&by_dept_and_priority).await.unwrap()[0].title,
            "Pen test"
        );
    }

    #[tokio::test]
    async fn list_search_is_case_insensitive_over_title_and_description() {
        let svc = test_service().await;
        seed_audit(&svc, "Q1 Access Review").await;
        let mut described = NewAudit::new("Quarterly", AuditType::Internal, due());
        described.description = Some("covers ACCESS logs".into());
        svc.create_audit(&described).await.unwrap();
        seed_audit(&svc, "Inventory").await;

        let filter = AuditFilter {
            search: Some("access".into()),
            ..AuditFilter::default()
        };
        assert_eq!(svc.list_audits(&filter).await.unwrap().len(), 2);

        let literal = AuditFilter {
            search: Some("%".into()),
            ..AuditFilter::default()
        };
        assert!(svc.list_audits(&literal).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn list_pages_with_limit_and_offset() {
        let svc = test_service().await;
        for i in 0..5 {
            seed_audit(&svc, &format!("audit {i}")).await;
        }
        let page = AuditFilter {
            limit: Some(2),
            offset: Some(1),
            ..AuditFilter::default()
        };
        let ids: Vec<i64> = svc
            .list_audits(&page)
            .await
            .unwrap()
            .iter()
            .map(|a| a.id)
            .collect();
        assert_eq!(ids, vec![2, 3]);

        let past_end = AuditFilter {
            offset: Some(10),
            ..AuditFilter::default()
        };
        assert!(svc.list_audits(&past_end).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn concrete_scenario() {
        let svc = test_service().await;
        let audit = seed_audit(&svc, "Q1 Access Review").await;
        assert_eq!(audit.status, AuditStatus::Planned);
        assert_eq!(audit.priority, Priority::Medium);

        let finding = seed_finding(&svc, audit.id, "Stale admin accounts").await;
        assert_eq!(finding.risk_level, Priority::Medium);
        assert_eq!(finding.status, FindingStatus::Open);

        svc.delete_audit(audit.id).await.unwrap();
        assert!(matches!(
            svc.get_finding(finding.id).await,
            Err(DatabaseError::NotFound { entity: EntityType::Finding, .. })
        ));
    }
}
