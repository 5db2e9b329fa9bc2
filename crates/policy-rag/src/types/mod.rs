//! Shared request, response, and chunk types

pub mod chunk;
pub mod query;
pub mod response;

pub use chunk::{ScoredChunk, TextChunk};
pub use query::RunRequest;
pub use response::RunResponse;
