use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::analysis::ingest::IngestError;
use crate::scrape::browser::AgentError;
use crate::scrape::orchestrator::CandidateParseError;
use crate::storage::StorageError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
///
/// Input problems map to 400. Everything else collapses into a 500 that carries
/// the underlying failure text.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Unsupported media type: {0}")]
    UnsupportedMediaType(String),

    #[error("Malformed input: {0}")]
    MalformedInput(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("LLM error: {0}")]
    Llm(String),

    #[error("Error parsing JSON: {0}")]
    ResponseParse(String),

    #[error("Browser agent error: {0}")]
    Agent(String),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl From<IngestError> for AppError {
    fn from(err: IngestError) -> Self {
        match err {
            IngestError::UnsupportedMediaType(_) => AppError::UnsupportedMediaType(err.to_string()),
            IngestError::Malformed(_) => AppError::MalformedInput(err.to_string()),
        }
    }
}

impl From<AgentError> for AppError {
    fn from(err: AgentError) -> Self {
        AppError::Agent(err.to_string())
    }
}

impl From<CandidateParseError> for AppError {
    fn from(err: CandidateParseError) -> Self {
        AppError::ResponseParse(err.to_string())
    }
}

impl AppError {
    fn status_and_code(&self) -> (StatusCode, &'static str) {
        match self {
            AppError::UnsupportedMediaType(_) => (StatusCode::BAD_REQUEST, "UNSUPPORTED_MEDIA_TYPE"),
            AppError::MalformedInput(_) => (StatusCode::BAD_REQUEST, "MALFORMED_INPUT"),
            AppError::Validation(_) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR"),
            AppError::Llm(_) => (StatusCode::INTERNAL_SERVER_ERROR, "LLM_ERROR"),
            AppError::ResponseParse(_) => (StatusCode::INTERNAL_SERVER_ERROR, "RESPONSE_PARSE_ERROR"),
            AppError::Agent(_) => (StatusCode::INTERNAL_SERVER_ERROR, "AGENT_ERROR"),
            AppError::Storage(_) => (StatusCode::INTERNAL_SERVER_ERROR, "STORAGE_ERROR"),
            AppError::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR"),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code) = self.status_and_code();

        let message = match &self {
            AppError::UnsupportedMediaType(msg)
            | AppError::MalformedInput(msg)
            | AppError::Validation(msg) => msg.clone(),
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                self.to_string()
            }
            _ => {
                tracing::error!("{self}");
                self.to_string()
            }
        };

        let body = Json(json!({
            "error": {
                "code": code,
                "message": message
            }
        }));

        (status, body).into_response()
    }
}
