//! Stage orchestration: rephrase, fetch and extract, chunk and index,
//! retrieve and answer
//!
//! The pipeline is linear. Each stage fully materializes its output before
//! the next begins, because each stage's input is the complete output of
//! the previous one. No stage is re-entered and a failure in any stage
//! aborts the run; partial answers are never returned.

use futures::stream::{self, StreamExt, TryStreamExt};
use std::sync::Arc;

use crate::config::Config;
use crate::error::{Error, Result};
use crate::fetch::DocumentFetcher;
use crate::ingestion::{DocumentFormat, TextChunker, TextExtractor};
use crate::providers::{EmbeddingProvider, LlmProvider, VectorIndexBuilder};
use crate::rephrase::QueryRephraser;
use crate::retrieval::Answerer;

use super::state::PipelineState;

/// The question-answering pipeline.
///
/// Holds every collaborator it needs; all of them are injected at
/// construction, none reached as ambient globals.
pub struct Pipeline {
    fetcher: DocumentFetcher,
    chunker: TextChunker,
    rephraser: QueryRephraser,
    answerer: Answerer,
    embedder: Arc<dyn EmbeddingProvider>,
    index_builder: Arc<dyn VectorIndexBuilder>,
    answer_concurrency: usize,
}

impl Pipeline {
    /// Assemble a pipeline from configuration and collaborators
    pub fn new(
        config: &Config,
        embedder: Arc<dyn EmbeddingProvider>,
        llm: Arc<dyn LlmProvider>,
        index_builder: Arc<dyn VectorIndexBuilder>,
    ) -> Self {
        Self {
            fetcher: DocumentFetcher::new(config.fetch.timeout_secs),
            chunker: TextChunker::new(config.chunking.chunk_size, config.chunking.chunk_overlap),
            rephraser: QueryRephraser::new(Arc::clone(&llm)),
            answerer: Answerer::new(Arc::clone(&embedder), llm, config.retrieval.top_k),
            embedder,
            index_builder,
            answer_concurrency: config.retrieval.answer_concurrency.max(1),
        }
    }

    /// Run the full pipeline for one document and its questions.
    ///
    /// Returns one answer per input question, in input order.
    pub async fn run(&self, document_locator: &str, questions: Vec<String>) -> Result<Vec<String>> {
        let mut state = PipelineState::new(document_locator.to_string(), questions);

        self.rephrase_stage(&mut state).await?;
        self.fetch_and_extract_stage(&mut state).await?;
        self.chunk_and_index_stage(&mut state).await?;
        self.retrieve_and_answer_stage(&mut state).await?;

        Ok(state.answers)
    }

    /// Normalize questions in place. Runs before the document is fetched;
    /// rephrasing does not depend on document content.
    async fn rephrase_stage(&self, state: &mut PipelineState) -> Result<()> {
        tracing::info!("rephrasing {} questions", state.questions.len());
        state.questions = self.rephraser.rephrase_all(&state.questions).await?;
        Ok(())
    }

    /// Resolve the locator, classify the byte stream, and extract its text
    async fn fetch_and_extract_stage(&self, state: &mut PipelineState) -> Result<()> {
        let document = self.fetcher.fetch(&state.document_locator).await?;

        let format = DocumentFormat::detect(document.content_type.as_deref(), &document.locator)
            .ok_or_else(|| {
                Error::UnsupportedFormat(format!(
                    "cannot determine document type (content-type: {}, locator: {})",
                    document.content_type.as_deref().unwrap_or("none"),
                    document.locator
                ))
            })?;

        tracing::info!(
            "extracting text from {} document ({} bytes)",
            format.name(),
            document.data.len()
        );

        state.raw_text = TextExtractor::extract(format, &document.data)?;
        Ok(())
    }

    /// Chunk the extracted text and build the per-request vector index
    async fn chunk_and_index_stage(&self, state: &mut PipelineState) -> Result<()> {
        let chunks = self.chunker.chunk(&state.raw_text);
        tracing::info!("indexing {} chunks", chunks.len());

        let index = self
            .index_builder
            .build(chunks, self.embedder.as_ref())
            .await?;
        state.index = Some(index);
        Ok(())
    }

    /// Answer every rephrased question against the built index.
    ///
    /// Questions are independent of each other, so they run with bounded
    /// concurrency; answers still come back in question order.
    async fn retrieve_and_answer_stage(&self, state: &mut PipelineState) -> Result<()> {
        let index = state
            .index
            .as_ref()
            .ok_or_else(|| Error::Index("index was not built".to_string()))?;

        let answerer = &self.answerer;
        let answers: Vec<String> = stream::iter(state.questions.clone())
            .map(|question| async move { answerer.answer(index, &question).await })
            .buffered(self.answer_concurrency)
            .try_collect()
            .await?;

        state.answers = answers;
        Ok(())
    }
}
