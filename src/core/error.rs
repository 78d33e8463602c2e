use thiserror::Error;

/// Errors that can occur while building, signing, or submitting a document.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum FacturaError {
    /// One or more validation rules failed.
    #[error("validation failed: {0}")]
    Validation(String),

    /// Builder encountered invalid or missing configuration.
    #[error("builder error: {0}")]
    Builder(String),

    /// Clave / consecutive-number synthesis error.
    #[error("numbering error: {0}")]
    Numbering(String),

    /// XML generation error.
    #[error("XML error: {0}")]
    Xml(String),

    /// Certificate handling or signing failure.
    #[error("signing error: {0}")]
    Firma(String),

    /// Missing API credentials, certificate, or pin.
    #[error("configuration error: {0}")]
    Config(String),

    /// Token endpoint failure or missing bearer token.
    #[error("authentication error: {0}")]
    Auth(String),

    /// HTTP transport failure or non-success response from Hacienda.
    #[error("communication error: {0}")]
    Api(String),
}

/// A single validation error with field path and message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// Dot-separated path to the invalid field (e.g. "payments[2].amount").
    pub field: String,
    /// Human-readable error description.
    pub message: String,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

impl ValidationError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}
