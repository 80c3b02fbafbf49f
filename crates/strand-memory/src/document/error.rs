#[derive(Debug, thiserror::Error)]
pub enum DocumentError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("file too large: {0} bytes")]
    FileTooLarge(u64),

    #[cfg(feature = "pdf")]
    #[error("PDF error: {0}")]
    Pdf(String),

    #[cfg(feature = "web")]
    #[error("fetch failed: {0}")]
    Fetch(#[from] reqwest::Error),

    #[cfg(feature = "web")]
    #[error("invalid URL: {0}")]
    InvalidUrl(String),

    #[error("embedding failed: {0}")]
    Embedding(#[from] strand_llm::LlmError),

    #[error("storage error: {0}")]
    Storage(#[from] crate::vector_store::VectorStoreError),
}
