//! Typed pipeline state threaded through the orchestrator

use std::sync::Arc;

use crate::providers::VectorIndex;

/// The single mutable record owned by one pipeline run.
///
/// Each field is written exactly once, by exactly one stage, in a fixed
/// order. `answers[i]` always corresponds to `questions[i]` (post-rephrase)
/// in the original question order; reordering is never permitted. Created
/// once per request and discarded after the answers are returned.
pub struct PipelineState {
    /// Document locator, set at creation and never mutated
    pub document_locator: String,
    /// Extracted document text; empty until the fetch-and-extract stage
    pub raw_text: String,
    /// Questions, rephrased in place by the first stage; length is invariant
    pub questions: Vec<String>,
    /// Chunk vector index; absent until the chunk-and-index stage
    pub index: Option<Arc<dyn VectorIndex>>,
    /// One answer per question, populated only by the final stage
    pub answers: Vec<String>,
}

impl PipelineState {
    /// Create fresh state for one run
    pub fn new(document_locator: String, questions: Vec<String>) -> Self {
        Self {
            document_locator,
            raw_text: String::new(),
            questions,
            index: None,
            answers: Vec::new(),
        }
    }
}
