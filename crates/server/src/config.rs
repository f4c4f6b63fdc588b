//! Runtime configuration shared by the server and the CLI.
//!
//! Values come from command-line flags, then environment variables (a `.env`
//! file is loaded first by the binaries), then defaults. They are read once
//! at startup and never change afterwards.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Args;
use tracing::info;

use catalog::Catalog;
use llm_client::LlmClient;
use retrieval::DEFAULT_TOP_N;

use crate::orchestrator::AskOrchestrator;

#[derive(Args, Debug, Clone)]
pub struct Settings {
    /// Base URL of the Ollama-compatible model server
    #[arg(long, env = "OLLAMA_BASE_URL", default_value = "http://localhost:11434")]
    pub ollama_base_url: String,

    /// Model identifier passed to the model server
    #[arg(long, env = "OLLAMA_MODEL", default_value = "gemma3:1b")]
    pub ollama_model: String,

    /// Path to the JSON product catalog
    #[arg(long, env = "CATALOG_PATH", default_value = "data/products.json")]
    pub catalog_path: PathBuf,

    /// Upper bound on one model call, in seconds
    #[arg(
        long,
        env = "LLM_TIMEOUT_SECS",
        default_value_t = 60,
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    pub llm_timeout_secs: u64,

    /// Number of candidates handed to the model
    #[arg(long, env = "TOP_N", default_value_t = DEFAULT_TOP_N)]
    pub top_n: usize,
}

impl Settings {
    pub fn llm_timeout(&self) -> Duration {
        Duration::from_secs(self.llm_timeout_secs)
    }

    /// Load the catalog once; the result is shared read-only from here on.
    pub fn load_catalog(&self) -> Result<Arc<Catalog>> {
        let catalog = Catalog::load_from_file(&self.catalog_path).with_context(|| {
            format!(
                "Failed to load product catalog from {}",
                self.catalog_path.display()
            )
        })?;
        Ok(Arc::new(catalog))
    }

    pub fn llm_client(&self) -> Result<LlmClient> {
        LlmClient::with_timeout(
            self.ollama_base_url.as_str(),
            self.ollama_model.as_str(),
            self.llm_timeout(),
        )
        .context("Failed to create model client")
    }

    /// Wire up the full pipeline from these settings.
    pub fn build_orchestrator(&self) -> Result<AskOrchestrator> {
        let catalog = self.load_catalog()?;
        let llm_client = self.llm_client()?;

        info!(
            "Using model {} at {} (timeout {}s, top_n {})",
            self.ollama_model, self.ollama_base_url, self.llm_timeout_secs, self.top_n
        );
        Ok(AskOrchestrator::new(catalog, llm_client).with_top_n(self.top_n))
    }
}
