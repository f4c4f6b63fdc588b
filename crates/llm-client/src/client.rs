//! HTTP client for an Ollama-compatible `/api/generate` endpoint.

use crate::error::LlmClientError;
use crate::prompt::build_prompt;
use crate::recommendation::{Recommendation, parse_recommendation};
use catalog::Product;
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};
use tracing::{debug, error, info, instrument};

/// Default bound on one model call
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

#[derive(Serialize)]
struct GenerateRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    stream: bool,
    format: &'a str,
}

#[derive(Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    response: String,
}

/// Client for the recommendation model.
///
/// Cheap to clone: the underlying `reqwest::Client` shares its connection pool.
#[derive(Debug, Clone)]
pub struct LlmClient {
    client: reqwest::Client,
    base_url: String,
    model: String,
    timeout: Duration,
}

impl LlmClient {
    /// Create a client with the default 60 second timeout.
    ///
    /// # Arguments
    /// * `base_url` - Address of the model server (e.g. "http://localhost:11434")
    /// * `model` - Model identifier (e.g. "gemma3:1b")
    pub fn new(
        base_url: impl Into<String>,
        model: impl Into<String>,
    ) -> Result<Self, LlmClientError> {
        Self::with_timeout(base_url, model, DEFAULT_TIMEOUT)
    }

    /// Create a client with an explicit timeout for each model call.
    pub fn with_timeout(
        base_url: impl Into<String>,
        model: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, LlmClientError> {
        let base_url = base_url.into().trim_end_matches('/').to_string();

        reqwest::Url::parse(&base_url).map_err(|e| LlmClientError::InvalidAddress {
            addr: base_url.clone(),
            reason: e.to_string(),
        })?;

        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| LlmClientError::ConnectionError(e.to_string()))?;

        Ok(Self {
            client,
            base_url,
            model: model.into(),
            timeout,
        })
    }

    /// Ask the model to pick from `candidates` and summarize.
    ///
    /// Performs exactly one request, or none at all when `candidates` is
    /// empty: in that case the fixed fallback is returned. No retries.
    #[instrument(skip(self, candidates), fields(candidates = candidates.len()))]
    pub async fn generate_recommendation(
        &self,
        query: &str,
        candidates: &[Product],
    ) -> Result<Recommendation, LlmClientError> {
        if candidates.is_empty() {
            info!("No candidates for query, returning fallback recommendation");
            return Ok(Recommendation::fallback());
        }

        let prompt = build_prompt(query, candidates).map_err(|e| {
            error!("Failed to serialize candidates: {}", e);
            LlmClientError::PromptEncoding(e)
        })?;

        let answer = self.generate(&prompt).await?;
        let recommendation = parse_recommendation(&answer)?;

        debug!(
            "Model picked {} product ids",
            recommendation.product_ids.len()
        );
        Ok(recommendation)
    }

    /// Send one non-streaming generate request and return the trimmed answer text.
    async fn generate(&self, prompt: &str) -> Result<String, LlmClientError> {
        let url = format!("{}/api/generate", self.base_url);
        let request = GenerateRequest {
            model: &self.model,
            prompt,
            stream: false,
            format: "json",
        };

        let start = Instant::now();
        let response = self
            .client
            .post(&url)
            .json(&request)
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;

        let status = response.status();
        if !status.is_success() {
            error!("AI service error: HTTP {} from {}", status, url);
            return Err(LlmClientError::ServiceUnavailable {
                status: status.as_u16(),
            });
        }

        let body = response.text().await.map_err(|e| self.transport_error(e))?;
        info!("Model {} answered in {:.2?}", self.model, start.elapsed());

        let envelope: GenerateResponse = serde_json::from_str(&body).map_err(|e| {
            error!(error = %e, body = %body, "AI service returned a malformed envelope");
            LlmClientError::InvalidFormat { raw: body.clone() }
        })?;

        Ok(envelope.response.trim().to_string())
    }

    fn transport_error(&self, e: reqwest::Error) -> LlmClientError {
        if e.is_timeout() {
            error!("AI service timed out after {:?}", self.timeout);
            LlmClientError::Timeout(self.timeout)
        } else {
            error!("LLM connection error: {}", e);
            LlmClientError::ConnectionError(e.to_string())
        }
    }

    /// Base address of the model server, without a trailing slash
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }
}
