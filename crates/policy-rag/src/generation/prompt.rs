//! Prompt templates for question rephrasing and grounded answers

use crate::types::ScoredChunk;

/// Prompt builder for the generation collaborator
pub struct PromptBuilder;

impl PromptBuilder {
    /// Build the few-shot prompt that normalizes a shorthand query into a
    /// complete coverage question.
    ///
    /// The instructions require every factual detail in the input (age,
    /// gender, condition, location, policy duration) to survive rewriting.
    pub fn build_rephrase_prompt(query: &str) -> String {
        format!(
            r#"You are a helpful assistant that rephrases shorthand or fragmented user queries into clear, complete English questions to check **whether a specific medical case is covered under an insurance policy**.
The original input may include age, gender, medical condition, location, and policy duration in a shorthand format.
Your job is to **preserve all key details** and rewrite the query as a **natural language yes/no question** that helps determine if the scenario is covered by the insurance policy.
Only return the final rephrased question.

### Examples:

Input: "46M, knee surgery, Pune, 3-month policy"
Output: "Is a 46-year-old male who had knee surgery in Pune covered under a 3-month-old insurance policy?"

Input: "30F, pregnancy, Delhi, new policy"
Output: "Is a 30-year-old pregnant female in Delhi covered under a newly issued insurance policy?"

Input: "65M, bypass surgery, Mumbai, 1-year policy"
Output: "Is a 65-year-old male who underwent bypass surgery in Mumbai covered under a 1-year-old insurance policy?"

Now rephrase this input:
{query}
"#,
            query = query
        )
    }

    /// Join retrieved chunk texts into a single grounding context
    pub fn build_context(results: &[ScoredChunk]) -> String {
        results
            .iter()
            .map(|result| result.chunk.content.as_str())
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Build the grounded answering prompt.
    ///
    /// The instructions constrain the model to the retrieved context: coverage
    /// questions get "Yes"/"No"/"It depends" plus an explanation, condition
    /// questions get an accurate summary, and missing information must be
    /// stated rather than guessed.
    pub fn build_answer_prompt(context: &str, question: &str) -> String {
        format!(
            r#"You are a helpful insurance advisor. Based only on the given context, answer the user's question about insurance coverage.

Instructions:
- If the question asks whether something is covered, answer with "Yes", "No", or "It depends", followed by a clear explanation.
- If the question asks about conditions, limitations, or requirements, summarize them accurately.
- If the context does not contain enough information, say so - do not guess or assume.
- Do not use any knowledge beyond the context provided.
- Keep the response clear and specific.

### Context:
{context}

### User Question:
{question}

Answer:
"#,
            context = context,
            question = question
        )
    }
}
