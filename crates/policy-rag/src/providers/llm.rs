//! Text-generation provider trait

use async_trait::async_trait;

use crate::error::Result;

/// Trait for single-turn text generation.
///
/// Stateless: each call carries its full prompt and returns the model's text
/// output verbatim. Used for both question rephrasing and answer synthesis.
#[async_trait]
pub trait LlmProvider: Send + Sync {
    /// Generate text for a prompt
    async fn generate(&self, prompt: &str) -> Result<String>;

    /// Provider name for logging
    fn name(&self) -> &str;

    /// Model being used
    fn model(&self) -> &str;
}
