//! In-memory stand-in for the reception API, used by lifecycle tests.

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;

use super::{ApiConfig, ReceptionApi, ReceptionOutcome, ReceptionResponse};
use crate::core::FacturaError;

/// Scripted reception API. Responses are consumed in order; when the
/// script runs out, submissions are accepted.
#[derive(Debug, Default)]
pub struct MockApi {
    fail_auth: bool,
    responses: Mutex<VecDeque<Result<ReceptionResponse, FacturaError>>>,
    submitted: Mutex<Vec<String>>,
}

impl MockApi {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every `authenticate` call fail.
    pub fn failing_auth() -> Self {
        Self {
            fail_auth: true,
            ..Self::default()
        }
    }

    pub fn push_outcome(&self, outcome: ReceptionOutcome, status: &str) {
        self.push(Ok(ReceptionResponse {
            outcome,
            status: Some(status.to_string()),
            message: None,
            body: format!(r#"{{"status": "{status}"}}"#),
        }));
    }

    pub fn push_error(&self, error: FacturaError) {
        self.push(Err(error));
    }

    fn push(&self, response: Result<ReceptionResponse, FacturaError>) {
        self.responses
            .lock()
            .expect("mock lock poisoned")
            .push_back(response);
    }

    /// Documents submitted so far, in order.
    pub fn submitted(&self) -> Vec<String> {
        self.submitted.lock().expect("mock lock poisoned").clone()
    }
}

#[async_trait]
impl ReceptionApi for MockApi {
    async fn authenticate(&self, config: &ApiConfig) -> Result<String, FacturaError> {
        config.validate()?;
        if self.fail_auth {
            return Err(FacturaError::Auth("token endpoint returned 401".into()));
        }
        Ok("mock-bearer-token".into())
    }

    async fn submit(
        &self,
        _config: &ApiConfig,
        _token: &str,
        xml: &str,
    ) -> Result<ReceptionResponse, FacturaError> {
        self.submitted
            .lock()
            .expect("mock lock poisoned")
            .push(xml.to_string());
        self.responses
            .lock()
            .expect("mock lock poisoned")
            .pop_front()
            .unwrap_or_else(|| {
                Ok(ReceptionResponse {
                    outcome: ReceptionOutcome::Accepted,
                    status: Some("aceptado".into()),
                    message: None,
                    body: r#"{"status": "aceptado"}"#.into(),
                })
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn scripted_responses_in_order() {
        let mock = MockApi::new();
        mock.push_outcome(ReceptionOutcome::Rejected, "rechazado");
        let config = ApiConfig::sandbox("u", "p");
        let token = mock.authenticate(&config).await.unwrap();

        let first = mock.submit(&config, &token, "<A/>").await.unwrap();
        assert_eq!(first.outcome, ReceptionOutcome::Rejected);

        // Script exhausted: default to accepted.
        let second = mock.submit(&config, &token, "<B/>").await.unwrap();
        assert_eq!(second.outcome, ReceptionOutcome::Accepted);

        assert_eq!(mock.submitted(), vec!["<A/>", "<B/>"]);
    }

    #[tokio::test]
    async fn failing_auth() {
        let mock = MockApi::failing_auth();
        let err = mock
            .authenticate(&ApiConfig::sandbox("u", "p"))
            .await
            .unwrap_err();
        assert!(matches!(err, FacturaError::Auth(_)));
    }
}
