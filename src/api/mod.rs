//! Hacienda reception API: token endpoint, document submission, and
//! taxpayer identification lookup.

mod client;
mod identification;
mod mock;

pub use client::HaciendaClient;
pub use identification::{AddressDetail, PartyAddress, PartyRecord, lookup_identification};
pub use mock::MockApi;

use async_trait::async_trait;

use crate::core::FacturaError;

/// Hacienda sandbox (staging) reception base URL.
pub const SANDBOX_BASE_URL: &str = "https://api-sandbox.comprobanteselectronicos.go.cr/recepcion/v1";
/// Hacienda production reception base URL.
pub const PRODUCTION_BASE_URL: &str = "https://api.comprobanteselectronicos.go.cr/recepcion/v1";

/// Connection settings for the reception API.
///
/// An explicit value object; nothing is read from the process
/// environment or any ambient configuration.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub base_url: String,
    pub username: String,
    pub password: String,
}

impl ApiConfig {
    pub fn new(
        base_url: impl Into<String>,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            username: username.into(),
            password: password.into(),
        }
    }

    pub fn sandbox(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self::new(SANDBOX_BASE_URL, username, password)
    }

    pub fn production(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self::new(PRODUCTION_BASE_URL, username, password)
    }

    /// Fail early when credentials are missing, before any network call.
    pub fn validate(&self) -> Result<(), FacturaError> {
        if self.base_url.trim().is_empty() {
            return Err(FacturaError::Config("API base URL is required".into()));
        }
        if self.username.trim().is_empty() || self.password.trim().is_empty() {
            return Err(FacturaError::Config(
                "Hacienda API username and password are required".into(),
            ));
        }
        Ok(())
    }

    pub fn token_url(&self) -> String {
        format!("{}/token", self.base_url)
    }

    pub fn reception_url(&self) -> String {
        format!("{}/recepcion", self.base_url)
    }

    pub fn identification_url(&self, identification: &str) -> String {
        format!("{}/identificacion/{identification}", self.base_url)
    }
}

/// How Hacienda classified a submitted document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReceptionOutcome {
    /// Final: document accepted.
    Accepted,
    /// Final: document rejected.
    Rejected,
    /// Final: processing error reported by Hacienda.
    Error,
    /// Received but not yet resolved; the document stays in its sent state.
    Acknowledged,
}

/// Parsed response from a submission.
#[derive(Debug, Clone)]
pub struct ReceptionResponse {
    pub outcome: ReceptionOutcome,
    /// The raw status string Hacienda reported, when present.
    pub status: Option<String>,
    /// Detail message accompanying the status, when present.
    pub message: Option<String>,
    /// Response body verbatim, kept for the document audit trail.
    pub body: String,
}

/// The reception API surface, kept as a trait so the lifecycle layer can
/// be driven by [`MockApi`] in tests.
#[async_trait]
pub trait ReceptionApi: Send + Sync {
    /// Obtain a bearer token from the token endpoint.
    async fn authenticate(&self, config: &ApiConfig) -> Result<String, FacturaError>;

    /// Submit a signed document. `Ok` means Hacienda answered with a
    /// success status code; transport failures and non-2xx responses
    /// are errors.
    async fn submit(
        &self,
        config: &ApiConfig,
        token: &str,
        xml: &str,
    ) -> Result<ReceptionResponse, FacturaError>;
}

/// Pull the bearer token out of a token-endpoint response. The endpoint
/// has shipped it under different keys over time.
pub(crate) fn extract_token(body: &serde_json::Value) -> Option<String> {
    for key in ["access_token", "token", "id_token"] {
        if let Some(token) = body.get(key).and_then(|v| v.as_str()) {
            if !token.is_empty() {
                return Some(token.to_string());
            }
        }
    }
    None
}

/// Map the status vocabulary (Spanish or English, case-insensitive) onto
/// a [`ReceptionOutcome`]. Unknown strings count as an acknowledgement.
pub(crate) fn classify_status(status: &str) -> ReceptionOutcome {
    match status.trim().to_ascii_lowercase().as_str() {
        "aceptado" | "accepted" => ReceptionOutcome::Accepted,
        "rechazado" | "rejected" => ReceptionOutcome::Rejected,
        "error" => ReceptionOutcome::Error,
        _ => ReceptionOutcome::Acknowledged,
    }
}

/// Parse a reception response body. JSON bodies carry `status`/`estado`
/// (plus the `ind-estado` variant) and `message`/`detalle`; anything else
/// counts as a plain acknowledgement with the bytes preserved.
pub(crate) fn parse_reception_body(body: &str) -> ReceptionResponse {
    let json = serde_json::from_str::<serde_json::Value>(body).ok();
    let field = |keys: &[&str]| {
        json.as_ref().and_then(|v| {
            keys.iter()
                .find_map(|k| v.get(*k))
                .and_then(|s| s.as_str())
                .map(str::to_string)
        })
    };
    let status = field(&["status", "estado", "ind-estado"]);
    let message = field(&["message", "detalle"]);
    let outcome = status
        .as_deref()
        .map(classify_status)
        .unwrap_or(ReceptionOutcome::Acknowledged);
    ReceptionResponse {
        outcome,
        status,
        message,
        body: body.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn token_key_variants() {
        assert_eq!(
            extract_token(&json!({"access_token": "abc"})),
            Some("abc".into())
        );
        assert_eq!(extract_token(&json!({"token": "t"})), Some("t".into()));
        assert_eq!(extract_token(&json!({"id_token": "i"})), Some("i".into()));
        assert_eq!(extract_token(&json!({"access_token": ""})), None);
        assert_eq!(extract_token(&json!({"other": "x"})), None);
    }

    #[test]
    fn status_classification_is_bilingual() {
        assert_eq!(classify_status("aceptado"), ReceptionOutcome::Accepted);
        assert_eq!(classify_status(" Accepted "), ReceptionOutcome::Accepted);
        assert_eq!(classify_status("rechazado"), ReceptionOutcome::Rejected);
        assert_eq!(classify_status("REJECTED"), ReceptionOutcome::Rejected);
        assert_eq!(classify_status("error"), ReceptionOutcome::Error);
        assert_eq!(classify_status("recibido"), ReceptionOutcome::Acknowledged);
        assert_eq!(classify_status("procesando"), ReceptionOutcome::Acknowledged);
    }

    #[test]
    fn reception_body_parsing() {
        let r = parse_reception_body(r#"{"status": "aceptado", "detalle": "ok"}"#);
        assert_eq!(r.outcome, ReceptionOutcome::Accepted);
        assert_eq!(r.status.as_deref(), Some("aceptado"));
        assert_eq!(r.message.as_deref(), Some("ok"));

        let r = parse_reception_body(r#"{"ind-estado": "rechazado"}"#);
        assert_eq!(r.outcome, ReceptionOutcome::Rejected);

        let r = parse_reception_body("");
        assert_eq!(r.outcome, ReceptionOutcome::Acknowledged);
        assert_eq!(r.status, None);

        let r = parse_reception_body("<xml>raw</xml>");
        assert_eq!(r.outcome, ReceptionOutcome::Acknowledged);
        assert_eq!(r.body, "<xml>raw</xml>");
    }

    #[test]
    fn config_validation() {
        let mut config = ApiConfig::sandbox("user@stag", "secret");
        assert!(config.validate().is_ok());
        config.password = " ".into();
        assert!(matches!(
            config.validate().unwrap_err(),
            FacturaError::Config(_)
        ));
    }

    #[test]
    fn urls_are_derived_from_the_base() {
        let config = ApiConfig::new("https://example.test/v1/", "u", "p");
        assert_eq!(config.token_url(), "https://example.test/v1/token");
        assert_eq!(config.reception_url(), "https://example.test/v1/recepcion");
        assert_eq!(
            config.identification_url("3101123456"),
            "https://example.test/v1/identificacion/3101123456"
        );
    }

    #[test]
    fn environment_presets() {
        assert!(ApiConfig::sandbox("u", "p").base_url.contains("sandbox"));
        assert!(!ApiConfig::production("u", "p").base_url.contains("sandbox"));
    }
}
