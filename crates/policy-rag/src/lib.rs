//! policy-rag: retrieval-augmented question answering over policy documents
//!
//! Fetches a single document (PDF, DOCX, plain text, or email), splits it
//! into overlapping chunks, indexes the chunks through an embedding
//! collaborator, and answers natural-language questions grounded in the
//! retrieved passages. Shorthand questions are normalized into complete
//! coverage questions before retrieval.

pub mod config;
pub mod error;
pub mod fetch;
pub mod generation;
pub mod ingestion;
pub mod pipeline;
pub mod providers;
pub mod rephrase;
pub mod retrieval;
pub mod server;
pub mod types;

pub use config::Config;
pub use error::{Error, Result};
pub use pipeline::{Pipeline, PipelineState};
pub use types::{
    chunk::{ScoredChunk, TextChunk},
    query::RunRequest,
    response::RunResponse,
};
