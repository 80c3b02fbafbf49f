#[derive(Debug, thiserror::Error)]
pub enum AgentError {
    #[error("LLM error: {0}")]
    Llm(#[from] strand_llm::LlmError),

    #[error("prompt error: {0}")]
    Prompt(#[from] strand_core::PromptError),

    #[error("tool {name} failed: {message}")]
    Tool { name: String, message: String },
}
