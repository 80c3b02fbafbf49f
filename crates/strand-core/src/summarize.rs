//! Chunked-text summarization.

use std::sync::Arc;

use strand_llm::{LlmProvider, Message};
use strand_memory::document::Chunk;

use crate::pipeline::PipelineError;

const STUFF_PROMPT: &str = "Write a concise summary of the following text:\n\n";
const MAP_PROMPT: &str = "Write a concise summary of the following text:\n\n";
const REDUCE_PROMPT: &str = "Combine the following summaries into a single concise summary:\n\n";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SummarizeStrategy {
    /// All chunks in one prompt. Fast, bounded by the context window.
    Stuff,
    /// Summarize each chunk, then combine the partial summaries.
    MapReduce,
}

impl std::str::FromStr for SummarizeStrategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "stuff" => Ok(Self::Stuff),
            "map-reduce" | "map_reduce" => Ok(Self::MapReduce),
            other => Err(format!("unknown strategy: {other}")),
        }
    }
}

pub struct Summarizer<P> {
    provider: Arc<P>,
    strategy: SummarizeStrategy,
}

impl<P: LlmProvider> Summarizer<P> {
    #[must_use]
    pub fn new(provider: Arc<P>, strategy: SummarizeStrategy) -> Self {
        Self { provider, strategy }
    }

    /// Summarize the chunks with the configured strategy. Empty input
    /// yields an empty summary without a model call.
    ///
    /// # Errors
    ///
    /// Returns an error when a model call fails.
    pub async fn summarize(&self, chunks: &[Chunk]) -> Result<String, PipelineError> {
        if chunks.is_empty() {
            return Ok(String::new());
        }
        match self.strategy {
            SummarizeStrategy::Stuff => self.stuff(chunks).await,
            SummarizeStrategy::MapReduce => self.map_reduce(chunks).await,
        }
    }

    async fn stuff(&self, chunks: &[Chunk]) -> Result<String, PipelineError> {
        let text = chunks
            .iter()
            .map(|c| c.content.as_str())
            .collect::<Vec<_>>()
            .join("\n\n");
        self.complete(format!("{STUFF_PROMPT}{text}")).await
    }

    async fn map_reduce(&self, chunks: &[Chunk]) -> Result<String, PipelineError> {
        let mut partials = Vec::with_capacity(chunks.len());
        for chunk in chunks {
            let partial = self.complete(format!("{MAP_PROMPT}{}", chunk.content)).await?;
            tracing::debug!(chunk_index = chunk.chunk_index, "summarized chunk");
            partials.push(partial);
        }

        if partials.len() == 1 {
            return Ok(partials.remove(0));
        }
        self.complete(format!("{REDUCE_PROMPT}{}", partials.join("\n")))
            .await
    }

    async fn complete(&self, prompt: String) -> Result<String, PipelineError> {
        self.provider
            .chat(&[Message::user(prompt)])
            .await
            .map_err(PipelineError::Llm)
    }
}
