use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Url};
use serde::Serialize;
use serde::de::DeserializeOwned;
use smartinvo_types::{
    HealthStatus, ModelInfo, RecommendationRequest, RecommendationResult, ShelfLifeResult,
    TransformationStep, WasteStatEntry, WeatherReport,
};
use std::time::Duration;
use tracing::{debug, instrument};

use crate::{Backend, Operation, Result, ServiceError, decode_body, upstream_message};

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(15);

/// Strip surrounding whitespace and trailing slashes, then check the URL parses.
pub fn normalize_base_url(raw: &str) -> Result<String> {
    let trimmed = raw.trim().trim_end_matches('/');
    let parsed = Url::parse(trimmed).map_err(|_| ServiceError::InvalidBaseUrl(raw.to_string()))?;
    if !matches!(parsed.scheme(), "http" | "https") || parsed.host_str().is_none() {
        return Err(ServiceError::InvalidBaseUrl(raw.to_string()));
    }
    Ok(trimmed.to_string())
}

#[derive(Serialize)]
struct DeleteStoreItem<'a> {
    city: &'a str,
    item: &'a str,
}

/// [`Backend`] over HTTP
#[derive(Debug, Clone)]
pub struct HttpBackend {
    base_url: String,
    client: Client,
}

impl HttpBackend {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let base_url = normalize_base_url(base_url)?;
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ServiceError::Client(e.to_string()))?;
        Ok(Self { base_url, client })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn request(&self, operation: Operation) -> RequestBuilder {
        let url = format!("{}{}", self.base_url, operation.path());
        self.client.request(operation.method().into(), url)
    }

    #[instrument(name = "backend_request", skip(self, request), fields(base_url = %self.base_url))]
    async fn send(&self, operation: Operation, request: RequestBuilder) -> Result<Vec<u8>> {
        let response = request.send().await.map_err(|e| ServiceError::Transport {
            operation,
            message: e.to_string(),
        })?;

        let status = response.status();
        let body = response.bytes().await.map_err(|e| ServiceError::Transport {
            operation,
            message: format!("read body failed: {e}"),
        })?;

        if !status.is_success() {
            let mut message = upstream_message(&String::from_utf8_lossy(&body));
            if message.is_empty() {
                message = status
                    .canonical_reason()
                    .unwrap_or("request failed")
                    .to_string();
            }
            debug!(status = status.as_u16(), %message, "service returned failure");
            return Err(ServiceError::Status {
                operation,
                status: status.as_u16(),
                message,
            });
        }

        debug!(status = status.as_u16(), bytes = body.len(), "service responded");
        Ok(body.to_vec())
    }

    async fn fetch<T: DeserializeOwned>(
        &self,
        operation: Operation,
        request: RequestBuilder,
    ) -> Result<T> {
        let body = self.send(operation, request).await?;
        decode_body(operation, &body)
    }
}

#[async_trait]
impl Backend for HttpBackend {
    async fn recommend(&self, request: &RecommendationRequest) -> Result<RecommendationResult> {
        let op = Operation::Recommend;
        self.fetch(op, self.request(op).json(request)).await
    }

    async fn shelf_life(&self, item: &str) -> Result<ShelfLifeResult> {
        let op = Operation::ShelfLife;
        self.fetch(op, self.request(op).query(&[("item", item)]))
            .await
    }

    async fn global_waste(&self) -> Result<Vec<WasteStatEntry>> {
        let op = Operation::GlobalWaste;
        self.fetch(op, self.request(op)).await
    }

    async fn global_waste_steps(&self) -> Result<Vec<TransformationStep>> {
        let op = Operation::GlobalWasteSteps;
        self.fetch(op, self.request(op)).await
    }

    async fn store_spoiled(&self, city: &str) -> Result<Vec<WasteStatEntry>> {
        let op = Operation::StoreSpoiled;
        self.fetch(op, self.request(op).query(&[("city", city)]))
            .await
    }

    async fn delete_store_spoiled(&self, city: &str, item: &str) -> Result<()> {
        let op = Operation::DeleteStoreSpoiled;
        let body = DeleteStoreItem { city, item };
        self.send(op, self.request(op).json(&body)).await?;
        Ok(())
    }

    async fn model_info(&self) -> Result<ModelInfo> {
        let op = Operation::ModelInfo;
        self.fetch(op, self.request(op)).await
    }

    async fn weather(&self, city: &str) -> Result<WeatherReport> {
        let op = Operation::Weather;
        self.fetch(op, self.request(op).query(&[("city", city)]))
            .await
    }

    async fn health(&self) -> Result<HealthStatus> {
        let op = Operation::Health;
        self.fetch(op, self.request(op)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_strips_trailing_slashes() {
        assert_eq!(
            normalize_base_url(" http://localhost:8000/// ").unwrap(),
            "http://localhost:8000"
        );
        assert_eq!(
            normalize_base_url("https://api.example.com/v1/").unwrap(),
            "https://api.example.com/v1"
        );
    }

    #[test]
    fn test_normalize_rejects_garbage() {
        assert!(matches!(
            normalize_base_url("localhost:8000"),
            Err(ServiceError::InvalidBaseUrl(_))
        ));
        assert!(normalize_base_url("").is_err());
        assert!(normalize_base_url("ftp://files.example.com").is_err());
    }

    #[test]
    fn test_request_urls() {
        let backend = HttpBackend::new("http://localhost:8000/", DEFAULT_TIMEOUT).unwrap();
        let request = backend
            .request(Operation::StoreSpoiled)
            .query(&[("city", "São Paulo")])
            .build()
            .unwrap();
        assert_eq!(request.method(), reqwest::Method::GET);
        assert_eq!(
            request.url().as_str(),
            "http://localhost:8000/store_spoiled?city=S%C3%A3o+Paulo"
        );

        let health = backend.request(Operation::Health).build().unwrap();
        assert_eq!(health.url().as_str(), "http://localhost:8000/");
    }

    #[tokio::test]
    async fn test_transport_failure() {
        let backend = HttpBackend::new("http://127.0.0.1:1", Duration::from_secs(2)).unwrap();
        let err = backend.model_info().await.unwrap_err();
        assert!(matches!(
            err,
            ServiceError::Transport {
                operation: Operation::ModelInfo,
                ..
            }
        ));
    }
}
