//! Client for the language model that makes the final recommendation.
//!
//! This crate provides:
//! - Prompt construction from the query and the retrieved candidates
//! - One non-streaming call to an Ollama-compatible `/api/generate` endpoint,
//!   bounded by a timeout
//! - Strict parsing of the model's answer into a [`Recommendation`]
//!
//! The model is treated as an untrusted text generator: whatever it sends
//! back either parses into the expected JSON object or becomes
//! [`LlmClientError::InvalidFormat`]. Only two fields have defaults
//! (`productIds` → `[]`, `summary` → a generic acknowledgment).

pub mod client;
pub mod error;
pub mod prompt;
pub mod recommendation;

pub use client::{DEFAULT_TIMEOUT, LlmClient};
pub use error::LlmClientError;
pub use prompt::build_prompt;
pub use recommendation::{
    DEFAULT_SUMMARY, FALLBACK_SUMMARY, Recommendation, parse_recommendation,
};
