use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

use super::AuthError;
use crate::config::IdentityConfig;

/// Token endpoint response
#[derive(Debug, Clone, Deserialize)]
pub struct TokenSet {
    pub access_token: String,
    #[serde(default)]
    pub refresh_token: Option<String>,
    #[serde(default)]
    pub expires_in: Option<u64>,
}

#[derive(Debug, Deserialize)]
struct ProviderError {
    error: String,
    #[serde(default)]
    error_description: Option<String>,
}

/// OpenID Connect operations the client relies on
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Resource-owner password grant
    async fn login(&self, username: &str, password: &str) -> Result<TokenSet, AuthError>;

    /// Refresh-token grant
    async fn refresh(&self, refresh_token: &str) -> Result<TokenSet, AuthError>;

    /// End the provider-side session
    async fn logout(&self, refresh_token: &str) -> Result<(), AuthError>;
}

/// Keycloak-compatible provider reached over HTTP
pub struct OidcProvider {
    client: Client,
    token_url: String,
    logout_url: String,
    client_id: String,
}

impl OidcProvider {
    pub fn new(config: &IdentityConfig, timeout_seconds: u64) -> Result<Self, AuthError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_seconds))
            .build()
            .map_err(|e| AuthError::Provider(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            token_url: config.token_endpoint(),
            logout_url: config.logout_endpoint(),
            client_id: config.client_id.clone(),
        })
    }

    async fn token_request(&self, form: &[(&str, &str)]) -> Result<TokenSet, String> {
        let response = self
            .client
            .post(&self.token_url)
            .form(form)
            .send()
            .await
            .map_err(|e| format!("Failed to reach identity provider: {}", e))?;

        let status = response.status();
        if status.is_success() {
            response
                .json::<TokenSet>()
                .await
                .map_err(|e| format!("Failed to parse token response: {}", e))
        } else {
            let body = response.text().await.unwrap_or_default();
            Err(describe_error(status, &body))
        }
    }
}

fn describe_error(status: reqwest::StatusCode, body: &str) -> String {
    match serde_json::from_str::<ProviderError>(body) {
        Ok(err) => match err.error_description {
            Some(description) => format!("{} ({})", description, err.error),
            None => err.error,
        },
        Err(_) if body.is_empty() => status.to_string(),
        Err(_) => format!("{}: {}", status, body),
    }
}

#[async_trait]
impl IdentityProvider for OidcProvider {
    async fn login(&self, username: &str, password: &str) -> Result<TokenSet, AuthError> {
        tracing::debug!("Requesting password grant for {}", username);

        self.token_request(&[
            ("grant_type", "password"),
            ("client_id", &self.client_id),
            ("username", username),
            ("password", password),
            ("scope", "openid"),
        ])
        .await
        .map_err(AuthError::InvalidCredentials)
    }

    async fn refresh(&self, refresh_token: &str) -> Result<TokenSet, AuthError> {
        tracing::debug!("Requesting refresh-token grant");

        self.token_request(&[
            ("grant_type", "refresh_token"),
            ("client_id", &self.client_id),
            ("refresh_token", refresh_token),
        ])
        .await
        .map_err(AuthError::RefreshFailed)
    }

    async fn logout(&self, refresh_token: &str) -> Result<(), AuthError> {
        let response = self
            .client
            .post(&self.logout_url)
            .form(&[("client_id", self.client_id.as_str()), ("refresh_token", refresh_token)])
            .send()
            .await
            .map_err(|e| AuthError::Provider(e.to_string()))?;

        let status = response.status();
        if status.is_success() {
            Ok(())
        } else {
            let body = response.text().await.unwrap_or_default();
            Err(AuthError::Provider(describe_error(status, &body)))
        }
    }
}
