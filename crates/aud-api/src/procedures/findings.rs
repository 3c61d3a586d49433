use aud_core::entities::{Finding, NewFinding};
use aud_core::updates::FindingUpdate;
use aud_core::validation::InsertShape;
use aud_db::repos::FindingFilter;
use serde_json::Value;

use crate::error::RpcError;
use crate::input::{DeleteAck, parse_filter, parse_id, parse_update};
use crate::router::{AppRouter, to_json};

/// `findings.*`
pub struct FindingsRouter<'a> {
    app: &'a AppRouter,
}

impl<'a> FindingsRouter<'a> {
    pub(crate) const fn new(app: &'a AppRouter) -> Self {
        Self { app }
    }

    /// # Errors
    ///
    /// Returns `RpcError::Store` if the query fails.
    pub async fn list(&self, filter: &FindingFilter) -> Result<Vec<Finding>, RpcError> {
        let filter = FindingFilter {
            limit: self.app.clamp_limit(filter.limit),
            ..filter.clone()
        };
        let records = self.app.service().list_findings(&filter).await?;
        self.app.checked_all(records)
    }

    /// # Errors
    ///
    /// Returns `RpcError::NotFound` if the finding does not exist.
    pub async fn get(&self, id: i64) -> Result<Finding, RpcError> {
        let record = self.app.service().get_finding(id).await?;
        self.app.checked(record)
    }

    /// # Errors
    ///
    /// Returns `RpcError::Validation`, or `RpcError::ForeignKey` if the audit does not exist.
    pub async fn create(&self, new: &NewFinding) -> Result<Finding, RpcError> {
        Ok(self.app.service().create_finding(new).await?)
    }

    /// # Errors
    ///
    /// Returns `RpcError::NotFound` or `RpcError::Validation`.
    pub async fn update(&self, id: i64, data: &FindingUpdate) -> Result<Finding, RpcError> {
        Ok(self.app.service().update_finding(id, data).await?)
    }

    /// Delete a finding with its recommendations and the evidence linked to it.
    ///
    /// # Errors
    ///
    /// Returns `RpcError::NotFound` if the finding does not exist.
    pub async fn delete(&self, id: i64) -> Result<DeleteAck, RpcError> {
        let deleted = self.app.service().delete_finding(id).await?;
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
        let filter: FindingFilter = parse_filter(input)?;
        to_json(&self.list(&filter).await?)
    }

    async fn dispatch_get(&self, input: &Value) -> Result<Value, RpcError> {
        to_json(&self.get(parse_id(input)?).await?)
    }

    async fn dispatch_create(&self, input: &Value) -> Result<Value, RpcError> {
        to_json(&self.create(&NewFinding::parse(input)?).await?)
    }

    async fn dispatch_update(&self, input: &Value) -> Result<Value, RpcError> {
        let (id, data) = parse_update::<FindingUpdate>(input)?;
        to_json(&self.update(id, &data).await?)
    }

    async fn dispatch_delete(&self, input: &Value) -> Result<Value, RpcError> {
        to_json(&self.delete(parse_id(input)?).await?)
    }
}
