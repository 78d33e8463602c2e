use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use tracing::{debug, warn};

use super::{ApiConfig, ReceptionApi, ReceptionResponse, extract_token, parse_reception_body};
use crate::core::FacturaError;

/// Token requests fail fast; a slow endpoint should not hold a
/// submission open for long.
const TOKEN_TIMEOUT: Duration = Duration::from_secs(30);
/// Reception can be slow under load at month end.
const RECEPTION_TIMEOUT: Duration = Duration::from_secs(60);

/// HTTP client for the Hacienda reception API.
#[derive(Debug, Clone)]
pub struct HaciendaClient {
    http: reqwest::Client,
}

impl HaciendaClient {
    pub fn new() -> Self {
        Self {
            http: reqwest::Client::new(),
        }
    }

    pub fn with_client(http: reqwest::Client) -> Self {
        Self { http }
    }
}

impl Default for HaciendaClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ReceptionApi for HaciendaClient {
    async fn authenticate(&self, config: &ApiConfig) -> Result<String, FacturaError> {
        config.validate()?;
        let url = config.token_url();
        debug!(%url, "requesting bearer token");

        let response = self
            .http
            .post(&url)
            .timeout(TOKEN_TIMEOUT)
            .json(&serde_json::json!({
                "username": config.username,
                "password": config.password,
            }))
            .send()
            .await
            .map_err(|e| FacturaError::Auth(format!("token request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!(%status, %body, "token endpoint returned an error");
            return Err(FacturaError::Auth(format!(
                "token endpoint returned {status}"
            )));
        }

        let body: serde_json::Value = response
            .json()
            .await
            .map_err(|e| FacturaError::Auth(format!("token response is not JSON: {e}")))?;
        extract_token(&body)
            .ok_or_else(|| FacturaError::Auth("token response carries no bearer token".into()))
    }

    async fn submit(
        &self,
        config: &ApiConfig,
        token: &str,
        xml: &str,
    ) -> Result<ReceptionResponse, FacturaError> {
        let url = config.reception_url();
        debug!(%url, bytes = xml.len(), "submitting document");

        let response = self
            .http
            .post(&url)
            .timeout(RECEPTION_TIMEOUT)
            .header(AUTHORIZATION, format!("Bearer {token}"))
            .header(CONTENT_TYPE, "application/xml")
            .body(xml.to_string())
            .send()
            .await
            .map_err(|e| FacturaError::Api(format!("reception request failed: {e}")))?;

        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        if !status.is_success() {
            warn!(%status, %body, "reception endpoint returned an error");
            return Err(FacturaError::Api(format!(
                "reception endpoint returned {status}"
            )));
        }

        Ok(parse_reception_body(&body))
    }
}
