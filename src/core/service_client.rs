// src/core/service_client.rs
//! HTTP client for the AlignCV backend - multipart uploads for analyze/optimize

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::Response;
use serde::de::DeserializeOwned;
use tracing::{error, info, trace};

use crate::error::ApiError;
use crate::selection::{SelectedFile, UploadPair};
use crate::types::{AnalysisResult, ErrorDetail, OptimizationResult, WelcomeResponse};

const ANALYZE_ENDPOINT: &str = "/analyze/";
const OPTIMIZE_ENDPOINT: &str = "/optimize/";
const ROOT_ENDPOINT: &str = "/";

/// Threshold sent with both calls, as a fraction.
pub const MATCH_THRESHOLD_PARAM: &str = "0.40";

pub const DEFAULT_TIMEOUT_SECS: u64 = 400;

/// The backend as seen by the workflow controller.
#[async_trait]
pub trait ResumeApi: Send + Sync {
    async fn analyze(&self, files: &UploadPair) -> Result<AnalysisResult, ApiError>;
    async fn optimize(&self, files: &UploadPair) -> Result<OptimizationResult, ApiError>;
}

pub struct ServiceClient {
    client: reqwest::Client,
    base_url: String,
}

impl ServiceClient {
    /// Create new service client with configuration
    pub fn new(base_url: &str, timeout_seconds: u64) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(timeout_seconds))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Welcome message served at the backend root
    pub async fn welcome(&self) -> Result<WelcomeResponse> {
        let url = self.endpoint(ROOT_ENDPOINT);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .with_context(|| format!("Failed to GET from {}", url))?;

        let status = response.status();
        if status.is_success() {
            response
                .json::<WelcomeResponse>()
                .await
                .context("Failed to parse JSON response")
        } else {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            anyhow::bail!("HTTP {} error: {}", status, error_text)
        }
    }

    fn upload_form(files: &UploadPair, param: &'static str) -> Result<Form, ApiError> {
        Ok(Form::new()
            .part("resume_file", Self::file_part(&files.resume)?)
            .part("jd_file", Self::file_part(&files.job_description)?)
            .text(param, MATCH_THRESHOLD_PARAM))
    }

    fn file_part(file: &SelectedFile) -> Result<Part, ApiError> {
        Part::bytes(file.content.to_vec())
            .file_name(file.file_name.clone())
            .mime_str(file.content_type())
            .map_err(|e| ApiError::Transport(format!("Failed to create multipart: {}", e)))
    }

    async fn post_form<R>(&self, endpoint: &str, form: Form) -> Result<R, ApiError>
    where
        R: DeserializeOwned,
    {
        let url = self.endpoint(endpoint);
        info!("Calling AlignCV backend: {}", url);

        let response = self
            .client
            .post(&url)
            .multipart(form)
            .send()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?;

        let status = response.status();
        trace!("Response status: {}", status);

        if status.is_success() {
            let response_text = response
                .text()
                .await
                .map_err(|e| ApiError::Transport(e.to_string()))?;

            serde_json::from_str(&response_text).map_err(|e| {
                error!("Failed to parse backend response: {}", e);
                ApiError::Decode(e.to_string())
            })
        } else {
            Err(Self::rejection(response).await)
        }
    }

    /// `detail` of a JSON error body when there is one.
    async fn rejection(response: Response) -> ApiError {
        let status = response.status().as_u16();
        let error_text = response.text().await.unwrap_or_default();

        error!("Backend error response {}: {}", status, error_text);

        let detail = serde_json::from_str::<ErrorDetail>(&error_text)
            .ok()
            .and_then(|body| body.detail);

        ApiError::Rejected { status, detail }
    }
}

#[async_trait]
impl ResumeApi for ServiceClient {
    async fn analyze(&self, files: &UploadPair) -> Result<AnalysisResult, ApiError> {
        let form = Self::upload_form(files, "min_match_percentage")?;
        self.post_form(ANALYZE_ENDPOINT, form).await
    }

    async fn optimize(&self, files: &UploadPair) -> Result<OptimizationResult, ApiError> {
        let form = Self::upload_form(files, "required_match_for_optimization")?;
        self.post_form(OPTIMIZE_ENDPOINT, form).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_trailing_slash() {
        let client = ServiceClient::new("https://api.example.com/", 5).unwrap();
        assert_eq!(client.base_url(), "https://api.example.com");
        assert_eq!(client.endpoint(ANALYZE_ENDPOINT), "https://api.example.com/analyze/");
    }

    #[test]
    fn test_empty_base_url_keeps_relative_paths() {
        let client = ServiceClient::new("", 5).unwrap();
        assert_eq!(client.endpoint(OPTIMIZE_ENDPOINT), "/optimize/");
    }
}
