//! Per-question retrieval and grounded answering

use std::sync::Arc;

use crate::error::{Error, Result};
use crate::generation::PromptBuilder;
use crate::providers::{EmbeddingProvider, LlmProvider, VectorIndex};

/// Answers one question at a time against a built index.
///
/// Retrieves the `top_k` nearest chunks, assembles the grounding context,
/// and invokes the generation collaborator once. The model output is
/// returned verbatim: no retries here, no post-validation.
pub struct Answerer {
    embedder: Arc<dyn EmbeddingProvider>,
    llm: Arc<dyn LlmProvider>,
    top_k: usize,
}

impl Answerer {
    /// Create a new answerer
    pub fn new(
        embedder: Arc<dyn EmbeddingProvider>,
        llm: Arc<dyn LlmProvider>,
        top_k: usize,
    ) -> Self {
        Self {
            embedder,
            llm,
            top_k,
        }
    }

    /// Answer a question from the indexed document
    pub async fn answer(&self, index: &Arc<dyn VectorIndex>, question: &str) -> Result<String> {
        let query_embedding = self
            .embedder
            .embed(question)
            .await
            .map_err(|e| Error::Answer(format!("query embedding failed: {}", e)))?;

        let results = index
            .search(&query_embedding, self.top_k)
            .await
            .map_err(|e| Error::Answer(format!("retrieval failed: {}", e)))?;

        tracing::debug!("retrieved {} chunks for \"{}\"", results.len(), question);

        let context = PromptBuilder::build_context(&results);
        let prompt = PromptBuilder::build_answer_prompt(&context, question);

        self.llm
            .generate(&prompt)
            .await
            .map_err(|e| Error::Answer(format!("\"{}\": {}", question, e)))
    }
}
