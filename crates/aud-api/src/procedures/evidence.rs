use aud_core::entities::{Evidence, NewEvidence};
use aud_core::updates::EvidenceUpdate;
use aud_core::validation::InsertShape;
use aud_db::repos::EvidenceFilter;
use serde_json::Value;

use crate::error::RpcError;
use crate::input::{DeleteAck, parse_filter, parse_id, parse_update};
use crate::router::{AppRouter, to_json};

/// `evidence.*`
pub struct EvidenceRouter<'a> {
    app: &'a AppRouter,
}

impl<'a> EvidenceRouter<'a> {
    pub(crate) const fn new(app: &'a AppRouter) -> Self {
        Self { app }
    }

    /// # Errors
    ///
    /// Returns `RpcError::Store` if the query fails.
    pub async fn list(&self, filter: &EvidenceFilter) -> Result<Vec<Evidence>, RpcError> {
        let filter = EvidenceFilter {
            limit: self.app.clamp_limit(filter.limit),
            ..filter.clone()
        };
        let records = self.app.service().list_evidence(&filter).await?;
        self.app.checked_all(records)
    }

    /// # Errors
    ///
    /// Returns `RpcError::NotFound` if the evidence does not exist.
    pub async fn get(&self, id: i64) -> Result<Evidence, RpcError> {
        let record = self.app.service().get_evidence(id).await?;
        self.app.checked(record)
    }

    /// # Errors
    ///
    /// Returns `RpcError::Validation`, or `RpcError::ForeignKey` if the audit or finding does not exist.
    pub async fn create(&self, new: &NewEvidence) -> Result<Evidence, RpcError> {
        Ok(self.app.service().create_evidence(new).await?)
    }

    /// `findingId` may be re-pointed or cleared; `auditId` is fixed.
    ///
    /// # Errors
    ///
    /// Returns `RpcError::NotFound`, `RpcError::Validation`, or
    /// `RpcError::ForeignKey` if the new finding does not exist.
    pub async fn update(&self, id: i64, data: &EvidenceUpdate) -> Result<Evidence, RpcError> {
        Ok(self.app.service().update_evidence(id, data).await?)
    }

    /// Delete one piece of evidence.
    ///
    /// # Errors
    ///
    /// Returns `RpcError::NotFound` if the evidence does not exist.
    pub async fn delete(&self, id: i64) -> Result<DeleteAck, RpcError> {
        let deleted = self.app.service().delete_evidence(id).await?;
        Ok(DeleteAck::new(deleted.id))
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
            _ => return None,
        };
        Some(result)
    }

    async fn dispatch_list(&self, input: &Value) -> Result<Value, RpcError> {
        let filter: EvidenceFilter = parse_filter(input)?;
        to_json(&self.list(&filter).await?)
    }

    async fn dispatch_get(&self, input: &Value) -> Result<Value, RpcError> {
        to_json(&self.get(parse_id(input)?).await?)
    }

    async fn dispatch_create(&self, input: &Value) -> Result<Value, RpcError> {
        to_json(&self.create(&NewEvidence::parse(input)?).await?)
    }

    async fn dispatch_update(&self, input: &Value) -> Result<Value, RpcError> {
        let (id, data) = parse_update::<EvidenceUpdate>(input)?;
        to_json(&self.update(id, &data).await?)
    }

    async fn dispatch_delete(&self, input: &Value) -> Result<Value, RpcError> {
        to_json(&self.delete(parse_id(input)?).await?)
    }
}
