//! Question normalization before retrieval
//!
//! Shorthand inputs like "46M, knee surgery, Pune, 3-month policy" are
//! rewritten into complete coverage questions before the document is even
//! fetched; rephrasing is independent of document content.

use std::sync::Arc;

use crate::error::{Error, Result};
use crate::generation::PromptBuilder;
use crate::providers::LlmProvider;

/// Rewrites shorthand questions into canonical coverage questions
pub struct QueryRephraser {
    llm: Arc<dyn LlmProvider>,
}

impl QueryRephraser {
    /// Create a new rephraser around a generation collaborator
    pub fn new(llm: Arc<dyn LlmProvider>) -> Self {
        Self { llm }
    }

    /// Rephrase a single question.
    ///
    /// Collaborator failure or empty output is a `Rephrase` error; the
    /// pipeline treats it as fatal for the whole run.
    pub async fn rephrase(&self, question: &str) -> Result<String> {
        let prompt = PromptBuilder::build_rephrase_prompt(question);

        let output = self
            .llm
            .generate(&prompt)
            .await
            .map_err(|e| Error::Rephrase(format!("\"{}\": {}", question, e)))?;

        let rephrased = output.trim();
        if rephrased.is_empty() {
            return Err(Error::Rephrase(format!(
                "collaborator returned empty output for \"{}\"",
                question
            )));
        }

        Ok(rephrased.to_string())
    }

    /// Rephrase every question, preserving count and order.
    ///
    /// Exactly one output per input; questions are never dropped, merged,
    /// or reordered.
    pub async fn rephrase_all(&self, questions: &[String]) -> Result<Vec<String>> {
        let mut rephrased = Vec::with_capacity(questions.len());
        for question in questions {
            rephrased.push(self.rephrase(question).await?);
        }
        Ok(rephrased)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;

    struct EchoLlm;

    #[async_trait]
    impl LlmProvider for EchoLlm {
        async fn generate(&self, prompt: &str) -> Result<String> {
            // Return the line after the rephrase marker, like a model would.
            let input = prompt
                .rsplit("Now rephrase this input:")
                .next()
                .unwrap_or("")
                .trim();
            Ok(format!("Is {} covered?", input))
        }

        fn name(&self) -> &str {
            "echo"
        }

        fn model(&self) -> &str {
            "echo"
        }
    }

    struct EmptyLlm;

    #[async_trait]
    impl LlmProvider for EmptyLlm {
        async fn generate(&self, _prompt: &str) -> Result<String> {
            Ok("   ".to_string())
        }

        fn name(&self) -> &str {
            "empty"
        }

        fn model(&self) -> &str {
            "empty"
        }
    }

    #[tokio::test]
    async fn rephrases_one_output_per_input_in_order() {
        let rephraser = QueryRephraser::new(Arc::new(EchoLlm));
        let questions = vec!["46M, knee surgery".to_string(), "30F, pregnancy".to_string()];

        let rephrased = rephraser.rephrase_all(&questions).await.unwrap();

        assert_eq!(rephrased.len(), 2);
        assert!(rephrased[0].contains("46M, knee surgery"));
        assert!(rephrased[1].contains("30F, pregnancy"));
    }

    #[tokio::test]
    async fn empty_collaborator_output_is_a_rephrase_error() {
        let rephraser = QueryRephraser::new(Arc::new(EmptyLlm));
        let result = rephraser.rephrase("46M, knee surgery").await;
        assert!(matches!(result, Err(Error::Rephrase(_))));
    }
}
