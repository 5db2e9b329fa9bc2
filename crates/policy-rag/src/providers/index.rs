//! Per-request vector index over chunk embeddings
//!
//! The index is rebuilt from scratch for every request and discarded with
//! the request's pipeline state; nothing persists across requests.

use async_trait::async_trait;
use std::sync::Arc;

use crate::error::{Error, Result};
use crate::types::{ScoredChunk, TextChunk};

use super::embedding::EmbeddingProvider;

/// Similarity search over an immutable set of embedded chunks
#[async_trait]
pub trait VectorIndex: Send + Sync {
    /// Return the `top_k` chunks nearest to the query embedding, nearest first
    async fn search(&self, query_embedding: &[f32], top_k: usize) -> Result<Vec<ScoredChunk>>;

    /// Number of indexed chunks
    fn len(&self) -> usize;

    /// Whether the index holds no chunks
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Builds a vector index from chunks, delegating embedding computation to
/// the embedding collaborator
#[async_trait]
pub trait VectorIndexBuilder: Send + Sync {
    /// Embed all chunks and build a searchable index over them
    async fn build(
        &self,
        chunks: Vec<TextChunk>,
        embedder: &dyn EmbeddingProvider,
    ) -> Result<Arc<dyn VectorIndex>>;
}

/// Exact cosine-similarity index held in memory
pub struct InMemoryIndex {
    entries: Vec<(TextChunk, Vec<f32>)>,
}

#[async_trait]
impl VectorIndex for InMemoryIndex {
    async fn search(&self, query_embedding: &[f32], top_k: usize) -> Result<Vec<ScoredChunk>> {
        let mut scored: Vec<ScoredChunk> = self
            .entries
            .iter()
            .map(|(chunk, embedding)| ScoredChunk {
                chunk: chunk.clone(),
                score: cosine_similarity(embedding, query_embedding),
            })
            .collect();

        scored.sort_by(|a, b| b.score.total_cmp(&a.score));
        scored.truncate(top_k);

        Ok(scored)
    }

    fn len(&self) -> usize {
        self.entries.len()
    }
}

/// Builder for the in-memory index
pub struct InMemoryIndexBuilder;

#[async_trait]
impl VectorIndexBuilder for InMemoryIndexBuilder {
    async fn build(
        &self,
        chunks: Vec<TextChunk>,
        embedder: &dyn EmbeddingProvider,
    ) -> Result<Arc<dyn VectorIndex>> {
        let texts: Vec<String> = chunks.iter().map(|chunk| chunk.content.clone()).collect();

        let embeddings = embedder
            .embed_batch(&texts)
            .await
            .map_err(|e| Error::Index(format!("embedding chunks failed: {}", e)))?;

        if embeddings.len() != chunks.len() {
            return Err(Error::Index(format!(
                "embedded {} of {} chunks",
                embeddings.len(),
                chunks.len()
            )));
        }

        Ok(Arc::new(InMemoryIndex {
            entries: chunks.into_iter().zip(embeddings).collect(),
        }))
    }
}

/// Cosine similarity between two vectors
fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    let dot: f32 = a.iter().zip(b).map(|(x, y)| x * y).sum();
    let norm_a = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b = b.iter().map(|x| x * x).sum::<f32>().sqrt();

    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }

    dot / (norm_a * norm_b)
}

#[cfg(test)]
mod tests {
    use super::*;

    struct AxisEmbedder;

    /// Maps each known keyword to its own axis, so similarity is exact.
    #[async_trait]
    impl EmbeddingProvider for AxisEmbedder {
        async fn embed(&self, text: &str) -> Result<Vec<f32>> {
            let keywords = ["knee", "maternity", "dental"];
            Ok(keywords
                .iter()
                .map(|k| if text.contains(k) { 1.0 } else { 0.0 })
                .collect())
        }

        fn dimensions(&self) -> usize {
            3
        }

        fn name(&self) -> &str {
            "axis"
        }
    }

    #[tokio::test]
    async fn search_returns_nearest_first() {
        let chunks = vec![
            TextChunk::new("knee surgery is covered".to_string(), 0),
            TextChunk::new("maternity has a waiting period".to_string(), 1),
            TextChunk::new("dental is excluded".to_string(), 2),
        ];

        let index = InMemoryIndexBuilder
            .build(chunks, &AxisEmbedder)
            .await
            .unwrap();
        assert_eq!(index.len(), 3);

        let query = AxisEmbedder.embed("knee replacement").await.unwrap();
        let results = index.search(&query, 2).await.unwrap();

        assert_eq!(results.len(), 2);
        assert_eq!(results[0].chunk.index, 0);
        assert!(results[0].score > results[1].score);
    }

    #[tokio::test]
    async fn empty_chunk_set_builds_empty_index() {
        let index = InMemoryIndexBuilder
            .build(Vec::new(), &AxisEmbedder)
            .await
            .unwrap();
        assert!(index.is_empty());
        assert!(index.search(&[1.0, 0.0, 0.0], 3).await.unwrap().is_empty());
    }

    #[test]
    fn cosine_of_orthogonal_vectors_is_zero() {
        assert_eq!(cosine_similarity(&[1.0, 0.0], &[0.0, 1.0]), 0.0);
    }
}
