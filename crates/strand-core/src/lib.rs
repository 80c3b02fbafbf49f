//! Orchestration building blocks: prompt templates, pipelines, summarization,
//! conversational chains, and configuration.

pub mod config;
pub mod conversation;
pub mod pipeline;
pub mod prompt;
pub mod summarize;

pub use config::Config;
pub use conversation::ConversationalChain;
pub use pipeline::{Pipeline, PipelineError, Step};
pub use prompt::{ChatPromptTemplate, PromptError, PromptTemplate};
pub use summarize::{SummarizeStrategy, Summarizer};
