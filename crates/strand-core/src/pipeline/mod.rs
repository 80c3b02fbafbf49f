//! Linear, single-pass composition of typed async steps.

pub mod builtin;
pub mod step;

pub use builtin::{LlmStep, MapStep, ParseStep, RetrievalStep, TemplateStep};
pub use step::{Compose, Pipeline, Step};

#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error(transparent)]
    Llm(#[from] strand_llm::LlmError),

    #[error(transparent)]
    Prompt(#[from] crate::prompt::PromptError),

    #[error(transparent)]
    Store(#[from] strand_memory::VectorStoreError),

    #[error("parse failed: {0}")]
    Parse(String),

    #[error("{0}")]
    Custom(String),
}
