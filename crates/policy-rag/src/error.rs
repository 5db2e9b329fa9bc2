//! Error types for the question-answering pipeline

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Result type alias for pipeline operations
pub type Result<T> = std::result::Result<T, Error>;

/// Pipeline errors
///
/// Every stage failure maps to exactly one variant; the ingress layer turns
/// the variant into a client-visible status + message once, at the boundary.
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration error (startup-time, never per-request)
    #[error("Configuration error: {0}")]
    Config(String),

    /// Malformed or incomplete request body
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Locator cannot be resolved to a fetchable target
    #[error("Invalid document locator: {0}")]
    InvalidLocator(String),

    /// Transport failure or non-success status while fetching the document
    #[error("Document fetch failed: {0}")]
    Fetch(String),

    /// Document type could not be determined, or yielded no usable text
    #[error("Unsupported document format: {0}")]
    UnsupportedFormat(String),

    /// A recognized format failed to parse
    #[error("Failed to extract text from {format} document: {message}")]
    Extract { format: &'static str, message: String },

    /// Embedding collaborator failure
    #[error("Embedding generation failed: {0}")]
    Embedding(String),

    /// Text-generation collaborator failure
    #[error("Generation failed: {0}")]
    Generation(String),

    /// Generation collaborator failure during question normalization
    #[error("Question rephrasing failed: {0}")]
    Rephrase(String),

    /// Embedding or index build failure during chunk indexing
    #[error("Index build failed: {0}")]
    Index(String),

    /// Retrieval or generation failure while answering a question
    #[error("Answer generation failed: {0}")]
    Answer(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// HTTP request error
    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),
}

impl Error {
    /// Create an extraction error for a recognized format
    pub fn extract(format: &'static str, message: impl Into<String>) -> Self {
        Self::Extract {
            format,
            message: message.into(),
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            Error::Config(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg.clone()),
            Error::InvalidRequest(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            Error::InvalidLocator(msg) => (
                StatusCode::BAD_REQUEST,
                format!("Invalid document locator: {}", msg),
            ),
            Error::Fetch(msg) => (
                StatusCode::BAD_GATEWAY,
                format!("Document fetch failed: {}", msg),
            ),
            Error::UnsupportedFormat(msg) => (
                StatusCode::BAD_REQUEST,
                format!("Unsupported document format: {}", msg),
            ),
            Error::Extract { format, message } => (
                StatusCode::UNPROCESSABLE_ENTITY,
                format!("Failed to extract text from {} document: {}", format, message),
            ),
            Error::Embedding(msg) | Error::Generation(msg) => {
                (StatusCode::SERVICE_UNAVAILABLE, msg.clone())
            }
            Error::Rephrase(msg) => (
                StatusCode::SERVICE_UNAVAILABLE,
                format!("Question rephrasing failed: {}", msg),
            ),
            Error::Index(msg) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Index build failed: {}", msg),
            ),
            Error::Answer(msg) => (
                StatusCode::SERVICE_UNAVAILABLE,
                format!("Answer generation failed: {}", msg),
            ),
            Error::Io(err) => (StatusCode::INTERNAL_SERVER_ERROR, err.to_string()),
            Error::Json(err) => (StatusCode::BAD_REQUEST, err.to_string()),
            Error::Http(err) => (StatusCode::BAD_GATEWAY, err.to_string()),
        };

        let body = Json(json!({ "error": message }));

        (status, body).into_response()
    }
}
