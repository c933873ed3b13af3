use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde_json::json;
use thiserror::Error;
use tracing::debug;

use crate::model::{AnalysisResult, AnalyzeOutcome, GenerateKind, GeneratedPassword};

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("request failed: {0}")]
    Transport(#[source] reqwest::Error),
    #[error("unexpected status {0}")]
    Status(StatusCode),
    #[error("malformed response: {0}")]
    Decode(#[source] reqwest::Error),
}

/// The analysis/generation service as seen by the controller.
#[async_trait]
pub trait PasswordBackend: Send + Sync {
    async fn analyze(&self, password: &str) -> Result<AnalyzeOutcome, ApiError>;
    async fn generate(&self, kind: GenerateKind) -> Result<String, ApiError>;
}

pub struct HttpBackend {
    client: Client,
    base_url: String,
}

impl HttpBackend {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, ApiError> {
        // the service keeps its rate-limit counter in a session cookie
        let client = Client::builder()
            .cookie_store(true)
            .timeout(timeout)
            .build()
            .map_err(ApiError::Transport)?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }
}

#[async_trait]
impl PasswordBackend for HttpBackend {
    async fn analyze(&self, password: &str) -> Result<AnalyzeOutcome, ApiError> {
        let url = format!("{}/analyze", self.base_url);
        debug!("POST {} ({} chars)", url, password.chars().count());
        let resp = self
            .client
            .post(&url)
            .json(&json!({ "password": password }))
            .send()
            .await
            .map_err(ApiError::Transport)?;

        // body is not inspected when rate limited
        if resp.status() == StatusCode::TOO_MANY_REQUESTS {
            return Ok(AnalyzeOutcome::RateLimited);
        }
        if !resp.status().is_success() {
            return Err(ApiError::Status(resp.status()));
        }
        let report: AnalysisResult = resp.json().await.map_err(ApiError::Decode)?;
        Ok(AnalyzeOutcome::Report(report))
    }

    async fn generate(&self, kind: GenerateKind) -> Result<String, ApiError> {
        let url = format!("{}/generate", self.base_url);
        debug!("POST {} (type={})", url, kind.label());
        let resp = self
            .client
            .post(&url)
            .json(&json!({ "type": kind }))
            .send()
            .await
            .map_err(ApiError::Transport)?;
        if !resp.status().is_success() {
            return Err(ApiError::Status(resp.status()));
        }
        let body: GeneratedPassword = resp.json().await.map_err(ApiError::Decode)?;
        Ok(body.password)
    }
}
