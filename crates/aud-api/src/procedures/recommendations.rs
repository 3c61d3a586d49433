use aud_core::entities::{Recommendation, NewRecommendation};
use aud_core::updates::RecommendationUpdate;
use aud_core::validation::InsertShape;
use aud_db::repos::RecommendationFilter;
use serde_json::Value;

use crate::error::RpcError;
use crate::input::{DeleteAck, parse_filter, parse_id, parse_update};
use crate::router::{AppRouter, to_json};

/// `recommendations.*`
pub struct RecommendationsRouter<'a> {
    app: &'a AppRouter,
}

impl<'a> RecommendationsRouter<'a> {
    pub(crate) const fn new(app: &'a AppRouter) -> Self {
        Self { app }
    }

    /// # Errors
    ///
    /// Returns `RpcError::Store` if the query fails.
    pub async fn list(&self, filter: &RecommendationFilter) -> Result<Vec<Recommendation>, RpcError> {
        let filter = RecommendationFilter {
            limit: self.app.clamp_limit(filter.limit),
            ..filter.clone()
        };
        let records = self.app.service().list_recommendations(&filter).await?;
        self.app.checked_all(records)
    }

    /// # Errors
    ///
    /// Returns `RpcError::NotFound` if the recommendation does not exist.
    pub async fn get(&self, id: i64) -> Result<Recommendation, RpcError> {
        let record = self.app.service().get_recommendation(id).await?;
        self.app.checked(record)
    }

    /// # Errors
    ///
    /// Returns `RpcError::Validation`, or `RpcError::ForeignKey` if the finding does not exist.
    pub async fn create(&self, new: &NewRecommendation) -> Result<Recommendation, RpcError> {
        Ok(self.app.service().create_recommendation(new).await?)
    }

    /// # Errors
    ///
    /// Returns `RpcError::NotFound` or `RpcError::Validation`.
    pub async fn update(&self, id: i64, data: &RecommendationUpdate) -> Result<Recommendation, RpcError> {
        Ok(self.app.service().update_recommendation(id, data).await?)
    }

    /// Delete one recommendation.
    ///
    /// # Errors
    ///
    /// Returns `RpcError::NotFound` if the recommendation does not exist.
    pub async fn delete(&self, id: i64) -> Result<DeleteAck, RpcError> {
        let deleted = self.app.service().delete_recommendation(id).await?;
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
        let filter: RecommendationFilter = parse_filter(input)?;
        to_json(&self.list(&filter).await?)
    }

    async fn dispatch_get(&self, input: &Value) -> Result<Value, RpcError> {
        to_json(&self.get(parse_id(input)?).await?)
    }

    async fn dispatch_create(&self, input: &Value) -> Result<Value, RpcError> {
        to_json(&self.create(&NewRecommendation::parse(input)?).await?)
    }

    async fn dispatch_update(&self, input: &Value) -> Result<Value, RpcError> {
        let (id, data) = parse_update::<RecommendationUpdate>(input)?;
        to_json(&self.update(id, &data).await?)
    }

    async fn dispatch_delete(&self, input: &Value) -> Result<Value, RpcError> {
        to_json(&self.delete(parse_id(input)?).await?)
    }
}
