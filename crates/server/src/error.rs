//! Errors surfaced by the question-answering pipeline and their HTTP mapping.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use llm_client::LlmClientError;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::error;

#[derive(Error, Debug)]
pub enum AskError {
    /// Empty or whitespace-only query; the pipeline never ran
    #[error("Query cannot be empty")]
    EmptyQuery,

    /// The model was unreachable, timed out, failed, or answered garbage
    #[error("AI Error: {0}")]
    Upstream(LlmClientError),

    /// Anything else, e.g. a panicked selection task
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AskError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::EmptyQuery => StatusCode::BAD_REQUEST,
            Self::Upstream(_) => StatusCode::BAD_GATEWAY,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Message safe to show to API clients
    pub fn detail(&self) -> String {
        match self {
            Self::Internal(_) => "Internal server error".to_string(),
            other => other.to_string(),
        }
    }
}

impl From<LlmClientError> for AskError {
    fn from(e: LlmClientError) -> Self {
        match e {
            // Local failure; the model was never called
            LlmClientError::PromptEncoding(_) => Self::Internal(e.to_string()),
            other => Self::Upstream(other),
        }
    }
}

/// Error body, `{"detail": "..."}`
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub detail: String,
}

impl IntoResponse for AskError {
    fn into_response(self) -> Response {
        if let Self::Internal(reason) = &self {
            error!("Request failed: {}", reason);
        }
        let status = self.status_code();
        (status, Json(ErrorResponse { detail: self.detail() })).into_response()
    }
}
