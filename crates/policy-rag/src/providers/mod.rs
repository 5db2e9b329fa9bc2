//! Collaborator abstractions for embeddings, text generation, and the
//! per-request vector index
//!
//! The pipeline consumes these through narrow traits; concrete clients are
//! built once at startup and injected, never reached as ambient globals.

pub mod embedding;
pub mod groq;
pub mod hf;
pub mod index;
pub mod llm;

pub use embedding::EmbeddingProvider;
pub use groq::GroqClient;
pub use hf::HfEmbedder;
pub use index::{InMemoryIndexBuilder, VectorIndex, VectorIndexBuilder};
pub use llm::LlmProvider;

use std::future::Future;
use std::time::Duration;

use crate::error::Result;

/// Retry an operation with exponential backoff.
///
/// Collaborator calls are the dominant failure source; retries live here,
/// inside the clients, never in the orchestrator.
pub(crate) async fn retry_with_backoff<F, Fut, T>(max_retries: u32, operation: F) -> Result<T>
where
    F: Fn() -> Fut,
    Fut: Future<Output = Result<T>>,
{
    let mut last_error = None;

    for attempt in 0..=max_retries {
        match operation().await {
            Ok(value) => return Ok(value),
            Err(e) => {
                last_error = Some(e);
                if attempt < max_retries {
                    let delay = Duration::from_secs(2u64.pow(attempt));
                    tracing::warn!(
                        "request failed (attempt {}/{}), retrying in {:?}",
                        attempt + 1,
                        max_retries + 1,
                        delay
                    );
                    tokio::time::sleep(delay).await;
                }
            }
        }
    }

    Err(last_error
        .unwrap_or_else(|| crate::error::Error::Generation("request failed with no error recorded".to_string())))
}
