//! Chunk types produced by the chunker and returned by retrieval

use serde::{Deserialize, Serialize};

/// A contiguous fragment of document text, the unit of embedding and retrieval.
///
/// Chunks are position-ordered by `index`, but order carries no meaning
/// downstream: retrieval is similarity-based, not positional.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextChunk {
    /// Text content
    pub content: String,
    /// Position within the source document
    pub index: usize,
}

impl TextChunk {
    /// Create a new chunk
    pub fn new(content: String, index: usize) -> Self {
        Self { content, index }
    }
}

/// A chunk returned from a similarity search, with its score
#[derive(Debug, Clone)]
pub struct ScoredChunk {
    /// The retrieved chunk
    pub chunk: TextChunk,
    /// Similarity score (higher is more similar)
    pub score: f32,
}
