//! Shared test utilities for aud-db unit tests.

pub(crate) mod helpers {
    use aud_core::entities::{Audit, Finding, NewAudit, NewFinding};
    use aud_core::enums::AuditType;
    use chrono::{DateTime, TimeZone, Utc};

    use crate::service::AudService;

    /// Create an in-memory service.
    pub async fn test_service() -> AudService {
        AudService::new_local(":memory:").await.unwrap()
    }

    /// A fixed due date for seeded audits.
    pub fn due() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, 31, 0, 0, 0).unwrap()
    }

    /// Insert an internal audit with defaults for everything optional.
    pub async fn seed_audit(svc: &AudService, title: &str) -> Audit {
        svc.create_audit(&NewAudit::new(title, AuditType::Internal, due()))
            .await
            .unwrap()
    }

    /// Insert a finding under `audit_id` with defaults for everything optional.
    pub async fn seed_finding(svc: &AudService, audit_id: i64, title: &str) -> Finding {
        svc.create_finding(&NewFinding::new(audit_id, title, format!("{title} details")))
            .await
            .unwrap()
    }
}
