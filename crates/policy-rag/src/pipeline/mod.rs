//! The four-stage question-answering pipeline

pub mod orchestrator;
pub mod state;

pub use orchestrator::Pipeline;
pub use state::PipelineState;
