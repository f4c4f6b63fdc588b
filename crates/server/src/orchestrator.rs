//! # Ask Orchestrator
//!
//! Runs one question through the pipeline:
//! 1. Reject empty queries
//! 2. Select candidates (keyword scoring + price ceiling)
//! 3. Ask the model to choose among them and summarize
//! 4. Map the chosen ids back to full catalog products
//!
//! The only suspension point is the model call. Candidate selection is CPU
//! work and runs on the blocking pool.

use std::sync::Arc;
use std::time::Instant;

use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, instrument, warn};

use catalog::{Catalog, Product};
use llm_client::{LlmClient, Recommendation};
use retrieval::{CandidateSelector, DEFAULT_TOP_N};

use crate::error::AskError;

/// Final answer for one query
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AskResponse {
    pub products: Vec<Product>,
    pub summary: String,
}

/// Coordinates candidate selection and model generation.
///
/// Holds no per-request state, so a single instance is cloned into every
/// request handler.
#[derive(Debug, Clone)]
pub struct AskOrchestrator {
    catalog: Arc<Catalog>,
    selector: CandidateSelector,
    llm_client: LlmClient,
    top_n: usize,
}

impl AskOrchestrator {
    /// Create an orchestrator over a loaded catalog
    ///
    /// # Arguments
    /// * `catalog` - Shared, read-only product catalog
    /// * `llm_client` - Client for the recommendation model
    pub fn new(catalog: Arc<Catalog>, llm_client: LlmClient) -> Self {
        let selector = CandidateSelector::new(catalog.clone());
        Self {
            catalog,
            selector,
            llm_client,
            top_n: DEFAULT_TOP_N,
        }
    }

    /// Configure how many candidates are sent to the model (default: 3)
    pub fn with_top_n(mut self, top_n: usize) -> Self {
        self.top_n = top_n;
        self
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// All products, optionally restricted to one category (case-insensitive)
    pub fn list_products(&self, category: Option<&str>) -> Vec<Product> {
        self.selector.list_all(category)
    }

    /// Main entry point: answer a natural-language product question.
    #[instrument(skip(self))]
    pub async fn answer_query(&self, query: &str) -> Result<AskResponse, AskError> {
        if query.trim().is_empty() {
            warn!("Rejected empty query");
            return Err(AskError::EmptyQuery);
        }

        let start_time = Instant::now();

        // Step 1: keyword retrieval
        let candidates = self.select_candidates(query).await?;
        info!("Retrieved {} candidates", candidates.len());

        // Step 2: model selection and summary
        let recommendation = self
            .llm_client
            .generate_recommendation(query, &candidates)
            .await
            .map_err(|e| {
                if e.is_malformed() {
                    error!("Model returned malformed output: {}", e);
                } else {
                    error!("Model call failed: {}", e);
                }
                AskError::from(e)
            })?;

        // Step 3: ids back to products
        let products = self.resolve_products(&recommendation);
        debug!(
            "Model returned {} ids, {} matched the catalog",
            recommendation.product_ids.len(),
            products.len()
        );

        info!(
            "Answered query with {} products in {:.2?}",
            products.len(),
            start_time.elapsed()
        );
        Ok(AskResponse {
            products,
            summary: recommendation.summary,
        })
    }

    /// Run candidate selection on the blocking pool
    async fn select_candidates(&self, query: &str) -> Result<Vec<Product>, AskError> {
        let selector = self.selector.clone();
        let query = query.to_string();
        let top_n = self.top_n;

        tokio::task::spawn_blocking(move || selector.select_candidates(&query, top_n))
            .await
            .map_err(|e| AskError::Internal(format!("Candidate selection task failed: {}", e)))
    }

    /// Catalog products whose ids the model picked, in catalog order.
    ///
    /// Unknown ids are dropped silently.
    fn resolve_products(&self, recommendation: &Recommendation) -> Vec<Product> {
        self.catalog
            .resolve_ids(&recommendation.product_ids)
            .into_iter()
            .cloned()
            .collect()
    }
}
