use aud_core::entities::{Audit, NewAudit};
use aud_core::updates::AuditUpdate;
use aud_core::validation::InsertShape;
use aud_db::repos::{AuditFilter, AuditStats};
use serde_json::Value;

use crate::error::RpcError;
use crate::input::{DeleteAck, parse_filter, parse_id, parse_update};
use crate::router::{AppRouter, to_json};

/// `audits.*`
pub struct AuditsRouter<'a> {
    app: &'a AppRouter,
}

impl<'a> AuditsRouter<'a> {
    pub(crate) const fn new(app: &'a AppRouter) -> Self {
        Self { app }
    }

    /// # Errors
    ///
    /// Returns `RpcError::Store` if the query fails.
    pub async fn list(&self, filter: &AuditFilter) -> Result<Vec<Audit>, RpcError> {
        let filter = AuditFilter {
            limit: self.app.clamp_limit(filter.limit),
            ..filter.clone()
        };
        let audits = self.app.service().list_audits(&filter).await?;
        self.app.checked_all(audits)
    }

    /// # Errors
    ///
    /// Returns `RpcError::NotFound` if the audit does not exist.
    pub async fn get(&self, id: i64) -> Result<Audit, RpcError> {
        let audit = self.app.service().get_audit(id).await?;
        self.app.checked(audit)
    }

    /// # Errors
    ///
    /// Returns `RpcError::Validation` if the payload breaks a field rule.
    pub async fn create(&self, new: &NewAudit) -> Result<Audit, RpcError> {
        Ok(self.app.service().create_audit(new).await?)
    }

    /// # Errors
    ///
    /// Returns `RpcError::NotFound` or `RpcError::Validation`.
    pub async fn update(&self, id: i64, data: &AuditUpdate) -> Result<Audit, RpcError> {
        Ok(self.app.service().update_audit(id, data).await?)
    }

    /// Delete an audit and everything under it.
    ///
    /// # Errors
    ///
    /// Returns `RpcError::NotFound` if the audit does not exist.
    pub async fn delete(&self, id: i64) -> Result<DeleteAck, RpcError> {
        let deleted = self.app.service().delete_audit(id).await?;
        Ok(DeleteAck::new(deleted.id))
    }

    /// # Errors
    ///
    /// Returns `RpcError::Store` if a count query fails.
    pub async fn stats(&self) -> Result<AuditStats, RpcError> {
        Ok(self.app.service().audit_stats().await?)
    }

    pub(crate) async fn dispatch(
        &self,
        method: &str,
        input: &Value,
    ) -> Option<Result<Value, RpcError>> {
        let result = match method {
            "list" => self.dispatch_list(input).await,
            "get" => self.dispatch_get(input).await,
            "create" => self.dispatch_create(input).await,
            "update" => self.dispatch_update(input).await,
            "delete" => self.dispatch_delete(input).await,
            "stats" => self.stats().await.and_then(|s| to_json(&s)),
            _ => return None,
        };
        Some(result)
    }

    async fn dispatch_list(&self, input: &Value) -> Result<Value, RpcError> {
        let filter: AuditFilter = parse_filter(input)?;
        to_json(&self.list(&filter).await?)
    }

    async fn dispatch_get(&self, input: &Value) -> Result<Value, RpcError> {
        to_json(&self.get(parse_id(input)?).await?)
    }

    async fn dispatch_create(&self, input: &Value) -> Result<Value, RpcError> {
        to_json(&self.create(&NewAudit::parse(input)?).await?)
    }

    async fn dispatch_update(&self, input: &Value) -> Result<Value, RpcError> {
        let (id, data) = parse_update::<AuditUpdate>(input)?;
        to_json(&self.update(id, &data).await?)
    }

    async fn dispatch_delete(&self, input: &Value) -> Result<Value, RpcError> {
        to_json(&self.delete(parse_id(input)?).await?)
    }
}
