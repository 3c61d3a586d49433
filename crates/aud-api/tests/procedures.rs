//! End-to-end procedure calls through `AppRouter::call` with JSON inputs.

use aud_api::{AppRouter, RpcError};
use aud_config::{ApiConfig, AudConfig};
use aud_db::service::AudService;
use pretty_assertions::assert_eq;
use serde_json::{Value, json};

async fn app() -> AppRouter {
    app_with(ApiConfig::default()).await
}

async fn app_with(config: ApiConfig) -> AppRouter {
    let service = AudService::new_local(":memory:").await.unwrap();
    AppRouter::new(service, config)
}

async fn call(app: &AppRouter, path: &str, input: Value) -> Value {
    app.call(path, &input)
        .await
        .unwrap_or_else(|e| panic!("{path} failed: {}", serde_json::to_string(&e.body()).unwrap()))
}

async fn call_err(app: &AppRouter, path: &str, input: Value) -> RpcError {
    app.call(path, &input)
        .await
        .expect_err("call should fail")
}

async fn create_audit(app: &AppRouter, title: &str) -> Value {
    call(
        app,
        "audits.create",
        json!({ "title": title, "type": "internal", "dueDate": "2025-03-31" }),
    )
    .await
}

#[tokio::test]
async fn q1_access_review_scenario() {
    let app = app().await;

    let audit = create_audit(&app, "Q1 Access Review").await;
    assert_eq!(audit["status"], "planned");
    assert_eq!(audit["priority"], "medium");
    assert_eq!(audit["createdAt"], audit["updatedAt"]);

    let finding = call(
        &app,
        "findings.create",
        json!({
            "auditId": audit["id"],
            "title": "Stale admin accounts",
            "description": "3 accounts unused 90+ days"
        }),
    )
    .await;
    assert_eq!(finding["riskLevel"], "medium");
    assert_eq!(finding["status"], "open");

    let ack = call(&app, "audits.delete", json!({ "id": audit["id"] })).await;
    assert_eq!(ack, json!({ "success": true, "id": audit["id"] }));

    let err = call_err(&app, "findings.get", json!({ "id": finding["id"] })).await;
    assert_eq!(err.code(), "NOT_FOUND");

    let remaining = call(&app, "findings.list", json!({ "auditId": audit["id"] })).await;
    assert_eq!(remaining, json!([]));
}

#[tokio::test]
async fn get_returns_what_create_returned() {
    let app = app().await;
    let created = create_audit(&app, "roundtrip").await;
    let fetched = call(&app, "audits.get", json!({ "id": created["id"] })).await;
    assert_eq!(fetched, created);
}

#[tokio::test]
async fn create_reports_every_violation_and_writes_nothing() {
    let app = app().await;
    let err = call_err(
        &app,
        "audits.create",
        json!({ "title": "", "type": "hostile", "dueDate": "someday" }),
    )
    .await;

    let body = serde_json::to_value(err.body()).unwrap();
    assert_eq!(body["code"], "VALIDATION_ERROR");
    let fields: Vec<&str> = body["issues"]
        .as_array()
        .unwrap()
        .iter()
        .map(|i| i["field"].as_str().unwrap())
        .collect();
    assert_eq!(fields, vec!["title", "type", "dueDate"]);

    assert_eq!(call(&app, "audits.list", Value::Null).await, json!([]));
}

#[tokio::test]
async fn create_ignores_unknown_and_managed_keys() {
    let app = app().await;
    let audit = call(
        &app,
        "audits.create",
        json!({
            "title": "t",
            "type": "external",
            "dueDate": "2025-03-31T09:30:00Z",
            "id": 999,
            "createdAt": "1999-01-01T00:00:00Z",
            "colour": "blue"
        }),
    )
    .await;
    assert_eq!(audit["id"], 1);
    assert_ne!(audit["createdAt"], "1999-01-01T00:00:00Z");
    assert!(audit.get("colour").is_none());
}

#[tokio::test]
async fn create_under_missing_parent_is_foreign_key_error() {
    let app = app().await;
    let err = call_err(
        &app,
        "findings.create",
        json!({ "auditId": 41, "title": "t", "description": "d" }),
    )
    .await;
    assert_eq!(err.code(), "FOREIGN_KEY_ERROR");
    assert!(matches!(err, RpcError::ForeignKey { field: "auditId", id: 41, .. }));
}

#[tokio::test]
async fn update_is_partial_and_refreshes_updated_at() {
    let app = app().await;
    let audit = create_audit(&app, "before").await;

    let updated = call(
        &app,
        "audits.update",
        json!({ "id": audit["id"], "data": { "status": "in_progress", "scope": "HQ" } }),
    )
    .await;
    assert_eq!(updated["status"], "in_progress");
    assert_eq!(updated["scope"], "HQ");
    assert_eq!(updated["title"], "before");
    assert_eq!(updated["createdAt"], audit["createdAt"]);
    assert_ne!(updated["updatedAt"], audit["updatedAt"]);
}

#[tokio::test]
async fn update_rejects_read_only_fields() {
    let app = app().await;
    let audit = create_audit(&app, "a").await;
    let finding = call(
        &app,
        "findings.create",
        json!({ "auditId": audit["id"], "title": "t", "description": "d" }),
    )
    .await;

    let err = call_err(
        &app,
        "findings.update",
        json!({ "id": finding["id"], "data": { "auditId": 2, "createdAt": "2020-01-01" } }),
    )
    .await;
    let RpcError::Validation(errors) = err else {
        panic!("expected validation error");
    };
    let mut fields = errors.fields();
    fields.sort_unstable();
    assert_eq!(fields, vec!["auditId", "createdAt"]);
}

#[tokio::test]
async fn update_missing_record_is_not_found() {
    let app = app().await;
    let err = call_err(
        &app,
        "recommendations.update",
        json!({ "id": 5, "data": { "status": "completed" } }),
    )
    .await;
    assert_eq!(err.code(), "NOT_FOUND");
}

#[tokio::test]
async fn evidence_can_be_relinked_but_not_to_a_missing_finding() {
    let app = app().await;
    let audit = create_audit(&app, "a").await;
    let finding = call(
        &app,
        "findings.create",
        json!({ "auditId": audit["id"], "title": "t", "description": "d" }),
    )
    .await;
    let evidence = call(
        &app,
        "evidence.create",
        json!({ "auditId": audit["id"], "title": "export.csv" }),
    )
    .await;
    assert_eq!(evidence["status"], "submitted");
    assert_eq!(evidence["findingId"], Value::Null);

    let linked = call(
        &app,
        "evidence.update",
        json!({ "id": evidence["id"], "data": { "findingId": finding["id"] } }),
    )
    .await;
    assert_eq!(linked["findingId"], finding["id"]);

    let err = call_err(
        &app,
        "evidence.update",
        json!({ "id": evidence["id"], "data": { "findingId": 404 } }),
    )
    .await;
    assert_eq!(err.code(), "FOREIGN_KEY_ERROR");
}

#[tokio::test]
async fn list_limit_is_clamped_to_configured_maximum() {
    let app = app_with(ApiConfig {
        default_limit: 2,
        max_limit: 3,
        validate_output: true,
    })
    .await;
    for i in 0..5 {
        create_audit(&app, &format!("audit {i}")).await;
    }

    let default_page = call(&app, "audits.list", json!({})).await;
    assert_eq!(default_page.as_array().unwrap().len(), 2);

    let clamped = call(&app, "audits.list", json!({ "limit": 100 })).await;
    assert_eq!(clamped.as_array().unwrap().len(), 3);

    let offset = call(&app, "audits.list", json!({ "limit": 3, "offset": 4 })).await;
    assert_eq!(offset.as_array().unwrap().len(), 1);
    assert_eq!(offset[0]["title"], "audit 4");
}

#[tokio::test]
async fn list_search_and_filters() {
    let app = app().await;
    let audit = create_audit(&app, "a").await;
    for (title, risk) in [("Weak TLS", "high"), ("Open S3 bucket", "critical"), ("tls cert expiry", "low")] {
        call(
            &app,
            "findings.create",
            json!({ "auditId": audit["id"], "title": title, "description": "d", "riskLevel": risk }),
        )
        .await;
    }

    let tls = call(&app, "findings.list", json!({ "search": "TLS" })).await;
    assert_eq!(tls.as_array().unwrap().len(), 2);

    let critical = call(&app, "findings.list", json!({ "riskLevel": "critical" })).await;
    assert_eq!(critical[0]["title"], "Open S3 bucket");

    let err = call_err(&app, "findings.list", json!({ "riskLevel": "severe" })).await;
    let body = serde_json::to_value(err.body()).unwrap();
    assert_eq!(body["code"], "VALIDATION_ERROR");
    assert_eq!(body["issues"][0]["field"], "riskLevel");
    assert_eq!(body["issues"][0]["reason"], "malformed");
}

#[tokio::test]
async fn recommendation_delete_touches_nothing_else() {
    let app = app().await;
    let audit = create_audit(&app, "a").await;
    let finding = call(
        &app,
        "findings.create",
        json!({ "auditId": audit["id"], "title": "t", "description": "d" }),
    )
    .await;
    let rec = call(
        &app,
        "recommendations.create",
        json!({ "findingId": finding["id"], "description": "Rotate credentials" }),
    )
    .await;
    assert_eq!(rec["status"], "pending");

    call(&app, "recommendations.delete", json!({ "id": rec["id"] })).await;
    assert_eq!(call(&app, "findings.get", json!({ "id": finding["id"] })).await, finding);

    let err = call_err(&app, "recommendations.delete", json!({ "id": rec["id"] })).await;
    assert_eq!(err.code(), "NOT_FOUND");
}

#[tokio::test]
async fn metrics_and_stats() {
    let app = app().await;
    let audit = create_audit(&app, "a").await;
    call(
        &app,
        "audits.update",
        json!({ "id": audit["id"], "data": { "status": "completed" } }),
    )
    .await;
    create_audit(&app, "b").await;

    let metric = call(
        &app,
        "metrics.create",
        json!({ "auditId": audit["id"], "metricType": "coverage", "value": 92.5, "unit": "%" }),
    )
    .await;
    assert_eq!(metric["value"], 92.5);
    assert!(metric["recordedAt"].is_string());

    let listed = call(&app, "metrics.list", json!({ "auditId": audit["id"] })).await;
    assert_eq!(listed, json!([metric]));

    let stats = call(&app, "audits.stats", Value::Null).await;
    assert_eq!(stats["totalAudits"], 2);
    assert_eq!(stats["completedAudits"], 1);
    assert_eq!(stats["completionRate"], 50.0);

    let err = call_err(&app, "metrics.update", json!({ "id": metric["id"], "data": {} })).await;
    assert_eq!(err.code(), "UNKNOWN_PROCEDURE");
}

#[tokio::test]
async fn open_from_config_uses_database_path() {
    let dir = tempfile::TempDir::new().unwrap();
    let mut config = AudConfig::default();
    config.database.path = dir.path().join("api.db").to_string_lossy().into_owned();

    {
        let app = AppRouter::open(&config).await.unwrap();
        create_audit(&app, "persisted").await;
    }
    let app = AppRouter::open(&config).await.unwrap();
    let audits = call(&app, "audits.list", Value::Null).await;
    assert_eq!(audits[0]["title"], "persisted");
}
