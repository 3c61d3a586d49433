use aud_core::entities::{Metric, NewMetric};
use aud_core::validation::InsertShape;
use aud_db::repos::MetricFilter;
use serde_json::Value;

use crate::error::RpcError;
use crate::input::{DeleteAck, parse_filter, parse_id};
use crate::router::{AppRouter, to_json};

/// `metrics.*`
///
/// Measurements are immutable once recorded, so there is no `update`.
pub struct MetricsRouter<'a> {
    app: &'a AppRouter,
}

impl<'a> MetricsRouter<'a> {
    pub(crate) const fn new(app: &'a AppRouter) -> Self {
        Self { app }
    }

    /// # Errors
    ///
    /// Returns `RpcError::Store` if the query fails.
    pub async fn list(&self, filter: &MetricFilter) -> Result<Vec<Metric>, RpcError> {
        let filter = MetricFilter {
            limit: self.app.clamp_limit(filter.limit),
            ..filter.clone()
        };
        let records = self.app.service().list_metrics(&filter).await?;
        self.app.checked_all(records)
    }

    /// # Errors
    ///
    /// Returns `RpcError::NotFound` if the metric does not exist.
    pub async fn get(&self, id: i64) -> Result<Metric, RpcError> {
        let record = self.app.service().get_metric(id).await?;
        self.app.checked(record)
    }

    /// # Errors
    ///
    /// Returns `RpcError::Validation`, or `RpcError::ForeignKey` if the audit
    /// does not exist.
    pub async fn create(&self, new: &NewMetric) -> Result<Metric, RpcError> {
        Ok(self.app.service().create_metric(new).await?)
    }

    /// # Errors
    ///
    /// Returns `RpcError::NotFound` if the metric does not exist.
    pub async fn delete(&self, id: i64) -> Result<DeleteAck, RpcError> {
        let deleted = self.app.service().delete_metric(id).await?;
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
            "delete" => self.dispatch_delete(input).await,
            _ => return None,
        };
        Some(result)
    }

    async fn dispatch_list(&self, input: &Value) -> Result<Value, RpcError> {
        let filter: MetricFilter = parse_filter(input)?;
        to_json(&self.list(&filter).await?)
    }

    async fn dispatch_get(&self, input: &Value) -> Result<Value, RpcError> {
        to_json(&self.get(parse_id(input)?).await?)
    }

    async fn dispatch_create(&self, input: &Value) -> Result<Value, RpcError> {
        to_json(&self.create(&NewMetric::parse(input)?).await?)
    }

    async fn dispatch_delete(&self, input: &Value) -> Result<Value, RpcError> {
        to_json(&self.delete(parse_id(input)?).await?)
    }
}
