//! Errors that can occur when talking to the language model service.

use std::time::Duration;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LlmClientError {
    /// The configured base URL is not a valid URL
    #[error("Invalid AI service address {addr}: {reason}")]
    InvalidAddress { addr: String, reason: String },

    /// The request could not be sent, or the connection dropped
    #[error("Failed to reach AI service: {0}")]
    ConnectionError(String),

    /// The candidate list could not be encoded into the prompt
    #[error("Failed to build prompt: {0}")]
    PromptEncoding(#[from] serde_json::Error),

    /// No complete response within the configured timeout
    #[error("AI service timed out after {}s", .0.as_secs_f64())]
    Timeout(Duration),

    /// The endpoint answered with a non-success status
    #[error("AI service unavailable (HTTP {status})")]
    ServiceUnavailable { status: u16 },

    /// The model answered, but not with the expected JSON object
    ///
    /// `raw` keeps the offending text for logging; it is never shown to users.
    #[error("AI returned invalid data format")]
    InvalidFormat { raw: String },
}

impl LlmClientError {
    /// True when the model was reached and replied, but the reply was unusable.
    pub fn is_malformed(&self) -> bool {
        matches!(self, Self::InvalidFormat { .. })
    }
}
