use async_trait::async_trait;
use serde::de::DeserializeOwned;
use smartinvo_types::{
    HealthStatus, ModelInfo, RecommendationRequest, RecommendationResult, ShelfLifeResult,
    TransformationStep, WasteStatEntry, WeatherReport,
};

use crate::{Operation, Result, ServiceError};

/// Prediction service operations
///
/// Responsibilities:
/// - One method per endpoint, typed in and out
/// - Any non-success status or transport failure is a [`ServiceError`]
/// - No caching and no retries; coordinators decide what to do on failure
#[async_trait]
pub trait Backend: Send + Sync {
    /// `POST /inventory`
    async fn recommend(&self, request: &RecommendationRequest) -> Result<RecommendationResult>;

    /// `GET /shelf_life?item=`
    async fn shelf_life(&self, item: &str) -> Result<ShelfLifeResult>;

    /// `GET /global_waste`
    async fn global_waste(&self) -> Result<Vec<WasteStatEntry>>;

    /// `GET /global_waste_steps`
    async fn global_waste_steps(&self) -> Result<Vec<TransformationStep>>;

    /// `GET /store_spoiled?city=`
    async fn store_spoiled(&self, city: &str) -> Result<Vec<WasteStatEntry>>;

    /// `DELETE /store_spoiled` with `{city, item}`; only the status matters
    async fn delete_store_spoiled(&self, city: &str, item: &str) -> Result<()>;

    /// `GET /model_info`
    async fn model_info(&self) -> Result<ModelInfo>;

    /// `GET /weather?city=`
    async fn weather(&self, city: &str) -> Result<WeatherReport>;

    /// `GET /`
    async fn health(&self) -> Result<HealthStatus>;
}

/// Decode a JSON response body for `operation`
pub fn decode_body<T: DeserializeOwned>(operation: Operation, body: &[u8]) -> Result<T> {
    serde_json::from_slice(body).map_err(|e| ServiceError::Decode {
        operation,
        message: e.to_string(),
    })
}
