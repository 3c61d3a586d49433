//! Recommendation repository.

use aud_core::entities::{NewRecommendation, Recommendation};
use aud_core::enums::{EntityType, Priority, RecommendationStatus};
use aud_core::updates::RecommendationUpdate;
use serde::{Deserialize, Serialize};

use super::{Conditions, Page, integer, text};
use crate::error::DatabaseError;
use crate::service::{AudService, Deleted};

/// Filter criteria for listing recommendations.
///
/// Recommendations have no title, so `search` only looks at `description`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RecommendationFilter {
    pub finding_id: Option<i64>,
    pub status: Option<RecommendationStatus>,
    pub priority: Option<Priority>,
    pub search: Option<String>,
    pub limit: Option<u32>,
    pub offset: Option<u32>,
}

impl AudService {
    /// # Errors
    ///
    /// Returns `DatabaseError::Validation`, or `DatabaseError::ForeignKey` if
    /// the finding does not exist.
    pub async fn create_recommendation(
        &self,
        new: &NewRecommendation,
    ) -> Result<Recommendation, DatabaseError> {
        self.insert_record(new).await
    }

    /// # Errors
    ///
    /// Returns `DatabaseError::NotFound` if the recommendation does not exist.
    pub async fn get_recommendation(&self, id: i64) -> Result<Recommendation, DatabaseError> {
        self.get_record(id).await
    }

    /// # Errors
    ///
    /// Returns `DatabaseError::NotFound` or `DatabaseError::Validation`.
    pub async fn update_recommendation(
        &self,
        id: i64,
        update: &RecommendationUpdate,
    ) -> Result<Recommendation, DatabaseError> {
        self.update_record(id, update).await
    }

    /// # Errors
    ///
    /// Returns `DatabaseError::NotFound` if the recommendation does not exist.
    pub async fn delete_recommendation(&self, id: i64) -> Result<Deleted, DatabaseError> {
        self.delete_cascade(EntityType::Recommendation, id).await
    }

    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails.
    pub async fn list_recommendations(
        &self,
        filter: &RecommendationFilter,
    ) -> Result<Vec<Recommendation>, DatabaseError> {
        let mut conditions = Conditions::default();
        conditions.eq("finding_id", integer(filter.finding_id));
        conditions.eq("status", text(filter.status));
        conditions.eq("priority", text(filter.priority));
        conditions.search(&["description"], filter.search.as_deref());
        self.list_records(conditions, Page::new(filter.limit, filter.offset))
            .await
    }
}

#[cfg(test)]
mod tests {
    use aud_core::updates::RecommendationUpdateBuilder;
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::test_support::helpers::{seed_audit, seed_finding, test_service};

    #[tokio::test]
    async fn create_applies_defaults() {
        let svc = test_service().await;
        let audit = seed_audit(&svc, "a").await;
        let finding = seed_finding(&svc, audit.id, "f").await;
        let rec = svc
            .create_recommendation(&NewRecommendation::new(finding.id, "Rotate keys"))
            .await
            .unwrap();

        assert_eq!(rec.finding_id, finding.id);
        assert_eq!(rec.priority, Priority::Medium);
        assert_eq!(rec.status, RecommendationStatus::Pending);
    }

    #[tokio::test]
    async fn create_with_missing_finding_is_foreign_key_error() {
        let svc = test_service().await;
        let err = svc
            .create_recommendation(&NewRecommendation::new(5, "nowhere"))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            DatabaseError::ForeignKey {
                field: "findingId",
                entity: EntityType::Finding,
                id: 5
            }
        ));
    }

    #[tokio::test]
    async fn update_and_delete() {
        let svc = test_service().await;
        let audit = seed_audit(&svc, "a").await;
        let finding = seed_finding(&svc, audit.id, "f").await;
        let rec = svc
            .create_recommendation(&NewRecommendation::new(finding.id, "Rotate keys"))
            .await
            .unwrap();

        let update = RecommendationUpdateBuilder::new()
            .status(RecommendationStatus::Completed)
            .priority(Priority::High)
            .build();
        let updated = svc.update_recommendation(rec.id, &update).await.unwrap();
        assert_eq!(updated.status, RecommendationStatus::Completed);
        assert_eq!(updated.priority, Priority::High);
        assert_eq!(updated.description, "Rotate keys");

        let deleted = svc.delete_recommendation(rec.id).await.unwrap();
        assert!(deleted.cascaded.is_empty());
        assert!(svc.get_finding(finding.id).await.is_ok());
        assert!(matches!(
            svc.get_recommendation(rec.id).await,
            Err(DatabaseError::NotFound { .. })
        ));
    }

    #[tokio::test]
    async fn list_filters_and_searches_description() {
        let svc = test_service().await;
        let audit = seed_audit(&svc, "a").await;
        let f1 = seed_finding(&svc, audit.id, "f1").await;
        let f2 = seed_finding(&svc, audit.id, "f2").await;
        svc.create_recommendation(&NewRecommendation::new(f1.id, "Enable MFA"))
            .await
            .unwrap();
        let mut urgent = NewRecommendation::new(f1.id, "Revoke tokens");
        urgent.priority = Priority::Critical;
        svc.create_recommendation(&urgent).await.unwrap();
        svc.create_recommendation(&NewRecommendation::new(f2.id, "Enable logging"))
            .await
            .unwrap();

        let by_finding = RecommendationFilter {
            finding_id: Some(f1.id),
            ..RecommendationFilter::default()
        };
        assert_eq!(svc.list_recommendations(&by_finding).await.unwrap().len(), 2);

        let by_priority = RecommendationFilter {
            priority: Some(Priority::Critical),
            ..RecommendationFilter::default()
        };
        assert_eq!(
            svc.list_recommendations(&by_priority).await.unwrap()[0].description,
            "Revoke tokens"
        );

        let searched = RecommendationFilter {
            search: Some("enable".into()),
            ..RecommendationFilter::default()
        };
        assert_eq!(svc.list_recommendations(&searched).await.unwrap().len(), 2);
    }
}
