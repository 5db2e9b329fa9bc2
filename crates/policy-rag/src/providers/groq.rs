//! Groq chat-completions client for text generation

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::config::LlmConfig;
use crate::error::{Error, Result};

use super::llm::LlmProvider;
use super::retry_with_backoff;

/// OpenAI-compatible chat client against the Groq API
pub struct GroqClient {
    client: Client,
    config: LlmConfig,
}

#[derive(Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
    temperature: f32,
}

#[derive(Serialize)]
struct ChatMessage {
    role: &'static str,
    content: String,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Deserialize)]
struct ChatChoiceMessage {
    content: String,
}

impl GroqClient {
    /// Create a new client with retry support
    pub fn new(config: &LlmConfig) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .expect("failed to create HTTP client");

        Self {
            client,
            config: config.clone(),
        }
    }
}

#[async_trait]
impl LlmProvider for GroqClient {
    async fn generate(&self, prompt: &str) -> Result<String> {
        let url = format!("{}/chat/completions", self.config.base_url);

        retry_with_backoff(self.config.max_retries, || {
            let url = url.clone();
            let prompt = prompt.to_string();
            let client = self.client.clone();
            let model = self.config.model.clone();
            let api_key = self.config.api_key.clone();
            let temperature = self.config.temperature;

            async move {
                let request = ChatRequest {
                    model,
                    messages: vec![ChatMessage {
                        role: "user",
                        content: prompt,
                    }],
                    temperature,
                };

                let response = client
                    .post(&url)
                    .bearer_auth(&api_key)
                    .json(&request)
                    .send()
                    .await
                    .map_err(|e| Error::Generation(format!("chat request failed: {}", e)))?;

                if !response.status().is_success() {
                    let status = response.status();
                    let body = response.text().await.unwrap_or_default();
                    return Err(Error::Generation(format!(
                        "chat completion failed: HTTP {} - {}",
                        status, body
                    )));
                }

                let chat: ChatResponse = response.json().await.map_err(|e| {
                    Error::Generation(format!("failed to parse chat response: {}", e))
                })?;

                chat.choices
                    .into_iter()
                    .next()
                    .map(|choice| choice.message.content)
                    .ok_or_else(|| Error::Generation("chat response contained no choices".to_string()))
            }
        })
        .await
    }

    fn name(&self) -> &str {
        "groq"
    }

    fn model(&self) -> &str {
        &self.config.model
    }
}
