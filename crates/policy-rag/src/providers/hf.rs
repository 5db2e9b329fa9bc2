//! Hugging Face Inference API embedding client

use async_trait::async_trait;
use reqwest::Client;
use serde_json::json;
use std::time::Duration;

use crate::config::EmbeddingConfig;
use crate::error::{Error, Result};

use super::embedding::EmbeddingProvider;
use super::retry_with_backoff;

/// Feature-extraction client for sentence-embedding models
pub struct HfEmbedder {
    client: Client,
    config: EmbeddingConfig,
}

impl HfEmbedder {
    /// Create a new embedder with retry support
    pub fn new(config: &EmbeddingConfig) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .expect("failed to create HTTP client");

        Self {
            client,
            config: config.clone(),
        }
    }

    async fn request_embeddings(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        let url = format!(
            "{}/pipeline/feature-extraction/{}",
            self.config.base_url, self.config.model
        );

        retry_with_backoff(self.config.max_retries, || {
            let url = url.clone();
            let texts = texts.to_vec();
            let client = self.client.clone();
            let api_token = self.config.api_token.clone();

            async move {
                let request = json!({
                    "inputs": texts,
                    "options": { "wait_for_model": true },
                });

                let response = client
                    .post(&url)
                    .bearer_auth(&api_token)
                    .json(&request)
                    .send()
                    .await
                    .map_err(|e| Error::Embedding(format!("embedding request failed: {}", e)))?;

                if !response.status().is_success() {
                    let status = response.status();
                    let body = response.text().await.unwrap_or_default();
                    return Err(Error::Embedding(format!(
                        "embedding failed: HTTP {} - {}",
                        status, body
                    )));
                }

                let embeddings: Vec<Vec<f32>> = response.json().await.map_err(|e| {
                    Error::Embedding(format!("failed to parse embedding response: {}", e))
                })?;

                if embeddings.len() != texts.len() {
                    return Err(Error::Embedding(format!(
                        "expected {} embeddings, got {}",
                        texts.len(),
                        embeddings.len()
                    )));
                }

                Ok(embeddings.into_iter().map(l2_normalize).collect())
            }
        })
        .await
    }
}

#[async_trait]
impl EmbeddingProvider for HfEmbedder {
    async fn embed(&self, text: &str) -> Result<Vec<f32>> {
        let mut embeddings = self.request_embeddings(&[text.to_string()]).await?;
        embeddings
            .pop()
            .ok_or_else(|| Error::Embedding("embedding response was empty".to_string()))
    }

    async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        if texts.is_empty() {
            return Ok(Vec::new());
        }
        self.request_embeddings(texts).await
    }

    fn dimensions(&self) -> usize {
        self.config.dimensions
    }

    fn name(&self) -> &str {
        "huggingface"
    }
}

/// Scale a vector to unit length
fn l2_normalize(mut vector: Vec<f32>) -> Vec<f32> {
    let norm = vector.iter().map(|x| x * x).sum::<f32>().sqrt();
    if norm > 0.0 {
        for value in &mut vector {
            *value /= norm;
        }
    }
    vector
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_scales_to_unit_length() {
        let normalized = l2_normalize(vec![3.0, 4.0]);
        assert!((normalized[0] - 0.6).abs() < 1e-6);
        assert!((normalized[1] - 0.8).abs() < 1e-6);
    }

    #[test]
    fn normalize_leaves_zero_vector_alone() {
        assert_eq!(l2_normalize(vec![0.0, 0.0]), vec![0.0, 0.0]);
    }
}
