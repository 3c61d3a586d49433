//! Top-level router: owns the service and dispatches dotted procedure paths.

use aud_config::{ApiConfig, AudConfig};
use aud_core::entities::Record;
use aud_db::service::AudService;
use serde::Serialize;
use serde_json::Value;

use crate::error::RpcError;
use crate::procedures::{
    AuditsRouter, EvidenceRouter, FindingsRouter, MetricsRouter, RecommendationsRouter,
};

/// Every callable procedure path.
pub const PROCEDURES: &[&str] = &[
    "healthCheck",
    "audits.list",
    "audits.get",
    "audits.create",
    "audits.update",
    "audits.delete",
    "audits.stats",
    "findings.list",
    "findings.get",
    "findings.create",
    "findings.update",
    "findings.delete",
    "recommendations.list",
    "recommendations.get",
    "recommendations.create",
    "recommendations.update",
    "recommendations.delete",
    "evidence.list",
    "evidence.get",
    "evidence.create",
    "evidence.update",
    "evidence.delete",
    "metrics.list",
    "metrics.get",
    "metrics.create",
    "metrics.delete",
];

/// Composes the procedure groups over one shared service.
pub struct AppRouter {
    service: AudService,
    config: ApiConfig,
}

impl AppRouter {
    #[must_use]
    pub const fn new(service: AudService, config: ApiConfig) -> Self {
        Self { service, config }
    }

    /// Open the configured database and build a router over it.
    ///
    /// # Errors
    ///
    /// Returns `RpcError::Store` if the database cannot be opened.
    pub async fn open(config: &AudConfig) -> Result<Self, RpcError> {
        let service = AudService::new_local(&config.database.path).await?;
        Ok(Self::new(service, config.api.clone()))
    }

    #[must_use]
    pub const fn service(&self) -> &AudService {
        &self.service
    }

    #[must_use]
    pub const fn config(&self) -> &ApiConfig {
        &self.config
    }

    /// Liveness probe. No side effects.
    #[must_use]
    pub const fn health_check(&self) -> &'static str {
        "OK"
    }

    #[must_use]
    pub const fn audits(&self) -> AuditsRouter<'_> {
        AuditsRouter::new(self)
    }

    #[must_use]
    pub const fn findings(&self) -> FindingsRouter<'_> {
        FindingsRouter::new(self)
    }

    #[must_use]
    pub const fn recommendations(&self) -> RecommendationsRouter<'_> {
        RecommendationsRouter::new(self)
    }

    #[must_use]
    pub const fn evidence(&self) -> EvidenceRouter<'_> {
        EvidenceRouter::new(self)
    }

    #[must_use]
    pub const fn metrics(&self) -> MetricsRouter<'_> {
        MetricsRouter::new(self)
    }

    /// Callable procedure paths.
    #[must_use]
    pub const fn procedures(&self) -> &'static [&'static str] {
        PROCEDURES
    }

    /// Invoke a procedure by dotted path with a JSON input.
    ///
    /// # Errors
    ///
    /// Returns `RpcError::UnknownProcedure` for a path not in [`PROCEDURES`],
    /// otherwise whatever the procedure returns.
    pub async fn call(&self, path: &str, input: &Value) -> Result<Value, RpcError> {
        tracing::debug!(procedure = path, "call");
        let unknown = || RpcError::UnknownProcedure(path.to_string());
        if path == "healthCheck" {
            return to_json(&self.health_check());
        }
        let (namespace, method) = path.split_once('.').ok_or_else(unknown)?;
        let result = match namespace {
            "audits" => self.audits().dispatch(method, input).await,
            "findings" => self.findings().dispatch(method, input).await,
            "recommendations" => self.recommendations().dispatch(method, input).await,
            "evidence" => self.evidence().dispatch(method, input).await,
            "metrics" => self.metrics().dispatch(method, input).await,
            _ => None,
        };
        let outcome = result.ok_or_else(unknown)?;
        if let Err(ref e) = outcome {
            tracing::debug!(procedure = path, code = e.code(), "call failed");
        }
        outcome
    }

    /// Limit actually applied to a list call.
    pub(crate) fn clamp_limit(&self, requested: Option<u32>) -> Option<u32> {
        Some(self.config.clamp_limit(requested))
    }

    /// Check a record read from the store against its select schema when
    /// output validation is enabled.
    pub(crate) fn checked<R: Record>(&self, record: R) -> Result<R, RpcError> {
        if self.config.validate_output {
            let value = serde_json::to_value(&record).map_err(|e| RpcError::store(e.to_string()))?;
            self.service
                .schema()
                .validate_record(R::ENTITY, &value)
                .map_err(|e| RpcError::store(format!("stored {} is malformed: {e}", R::ENTITY)))?;
        }
        Ok(record)
    }

    pub(crate) fn checked_all<R: Record>(&self, records: Vec<R>) -> Result<Vec<R>, RpcError> {
        records.into_iter().map(|r| self.checked(r)).collect()
    }
}

pub(crate) fn to_json<T: Serialize>(value: &T) -> Result<Value, RpcError> {
    serde_json::to_value(value).map_err(|e| RpcError::store(e.to_string()))
}
