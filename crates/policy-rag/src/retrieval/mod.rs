//! Retrieval-grounded answer generation

pub mod answer;

pub use answer::Answerer;
