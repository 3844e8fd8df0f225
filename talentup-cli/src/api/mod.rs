use anyhow::{Context, Result};
use reqwest::multipart::Form;
use reqwest::{Client, Response, Url};
use serde::de::DeserializeOwned;
use std::time::Duration;

use crate::auth::SessionContext;
use crate::config::ApiConfig;

mod cache;
mod error;
pub mod payload;
mod source;

pub use cache::{QueryClient, QueryKey};
pub use error::ApiError;
pub use payload::{resolve_media, RemoteWebinar};
pub use source::{build_source, HttpSource, MockSource, Submission, WebinarSource};

/// HTTP client for the webinar backend; every call carries the session's bearer token
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
    session: SessionContext,
}

impl ApiClient {
    /// Create a new API client
    pub fn new(config: &ApiConfig, session: SessionContext) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            session,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn bearer(&self) -> Result<String, ApiError> {
        self.session
            .snapshot()
            .await
            .access_token
            .ok_or_else(|| ApiError::Unauthorized("Not logged in".to_string()))
    }

    async fn check(response: Response) -> Result<Response, ApiError> {
        let status = response.status();
        if status.is_success() {
            Ok(response)
        } else {
            let error_text = response.text().await.unwrap_or_default();
            Err(ApiError::from_status(status, error_text))
        }
    }

    /// `base_url` plus each segment, percent-encoded
    pub fn segment_url(&self, segments: &[&str]) -> Result<Url, ApiError> {
        let mut url = Url::parse(&self.base_url)
            .map_err(|e| ApiError::BadRequest(format!("Invalid base URL {}: {}", self.base_url, e)))?;
        url.path_segments_mut()
            .map_err(|_| ApiError::BadRequest(format!("Invalid base URL {}", self.base_url)))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// Authenticated GET decoding a JSON body. One attempt, no retry.
    pub async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let url = format!("{}{}", self.base_url, path);
        self.fetch_json(&url).await
    }

    /// Same as `get_json` for a path built from encoded segments
    pub async fn get_json_at<T: DeserializeOwned>(&self, segments: &[&str]) -> Result<T, ApiError> {
        let url = self.segment_url(segments)?;
        self.fetch_json(url.as_str()).await
    }

    async fn fetch_json<T: DeserializeOwned>(&self, url: &str) -> Result<T, ApiError> {
        let token = self.bearer().await?;

        tracing::debug!("GET {}", url);

        let response = self
            .client
            .get(url)
            .bearer_auth(token)
            .send()
            .await?;

        let response = Self::check(response).await?;
        let body = response.text().await?;

        serde_json::from_str(&body).map_err(|e| ApiError::Decode(format!("{}: {}", url, e)))
    }

    /// Authenticated multipart POST
    pub async fn post_multipart(&self, path: &str, form: Form) -> Result<serde_json::Value, ApiError> {
        let url = format!("{}{}", self.base_url, path);
        let token = self.bearer().await?;

        tracing::debug!("POST {} (multipart)", url);

        let response = self
            .client
            .post(&url)
            .bearer_auth(token)
            .multipart(form)
            .send()
            .await?;

        let response = Self::check(response).await?;
        let body = response.text().await?;

        if body.trim().is_empty() {
            return Ok(serde_json::Value::Null);
        }
        serde_json::from_str(&body).map_err(|e| ApiError::Decode(format!("{}: {}", path, e)))
    }
}
