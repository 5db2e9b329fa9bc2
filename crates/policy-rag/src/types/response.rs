//! Ingress response types

use serde::Serialize;

/// Response body for a successful pipeline run.
///
/// `answers[i]` corresponds to the i-th input question; the pipeline never
/// reorders, drops, or merges questions.
#[derive(Debug, Clone, Serialize)]
pub struct RunResponse {
    /// One answer per input question, in input order
    pub answers: Vec<String>,
}
