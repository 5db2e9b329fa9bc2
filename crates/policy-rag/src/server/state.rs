//! Application state for the question-answering server

use std::sync::Arc;

use crate::config::Config;
use crate::error::Result;
use crate::pipeline::Pipeline;
use crate::providers::{
    EmbeddingProvider, GroqClient, HfEmbedder, InMemoryIndexBuilder, LlmProvider,
    VectorIndexBuilder,
};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    /// Configuration
    config: Config,
    /// The assembled pipeline, shared across requests
    pipeline: Pipeline,
}

impl AppState {
    /// Create new application state with the production collaborators
    pub fn new(config: Config) -> Result<Self> {
        tracing::info!("initializing pipeline state...");

        let embedder: Arc<dyn EmbeddingProvider> = Arc::new(HfEmbedder::new(&config.embeddings));
        tracing::info!("embedding provider initialized (model: {})", config.embeddings.model);

        let llm: Arc<dyn LlmProvider> = Arc::new(GroqClient::new(&config.llm));
        tracing::info!("generation provider initialized (model: {})", config.llm.model);

        let index_builder: Arc<dyn VectorIndexBuilder> = Arc::new(InMemoryIndexBuilder);

        let pipeline = Pipeline::new(&config, embedder, llm, index_builder);

        Ok(Self {
            inner: Arc::new(AppStateInner { config, pipeline }),
        })
    }

    /// Get configuration
    pub fn config(&self) -> &Config {
        &self.inner.config
    }

    /// Get the pipeline
    pub fn pipeline(&self) -> &Pipeline {
        &self.inner.pipeline
    }
}
