//! Ingress request types

use serde::Deserialize;

/// Request body for a pipeline run.
///
/// `documents` is a single document locator (URL or local path);
/// `questions` may be shorthand fragments, normalized before retrieval.
#[derive(Debug, Clone, Deserialize)]
pub struct RunRequest {
    /// Document locator
    #[serde(default)]
    pub documents: String,
    /// Questions to answer against the document
    #[serde(default)]
    pub questions: Vec<String>,
}
