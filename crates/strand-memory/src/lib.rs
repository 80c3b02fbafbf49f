//! Conversation history, document ingestion, and vector search.

pub mod document;
pub mod error;
pub mod history;
pub mod in_memory_store;
pub mod pg_store;
pub mod trim;
pub mod vector_store;

pub use error::MemoryError;
pub use history::{ChatHistory, SessionStore};
pub use pg_store::PgVectorStore;
pub use trim::{TokenCounter, TrimConfig, estimate_tokens, trim_messages};
pub use vector_store::{ScoredPoint, VectorPoint, VectorStore, VectorStoreError};
