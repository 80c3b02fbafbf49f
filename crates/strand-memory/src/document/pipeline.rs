use std::sync::Arc;

use serde_json::json;
use strand_llm::LlmProvider;

use super::splitter::TextSplitter;
use super::types::{Chunk, Document};
use super::{DocumentError, DocumentLoader};
use crate::vector_store::{VectorPoint, VectorStore};

/// Split → embed → upsert. Chunk ids are sequential within a batch
/// (`doc-0`, `doc-1`, …), so re-ingesting the same source overwrites
/// the previous rows.
pub struct IngestionPipeline<P, V> {
    splitter: TextSplitter,
    store: Arc<V>,
    provider: Arc<P>,
    collection: String,
}

impl<P: LlmProvider, V: VectorStore> IngestionPipeline<P, V> {
    pub fn new(
        splitter: TextSplitter,
        store: Arc<V>,
        provider: Arc<P>,
        collection: impl Into<String>,
    ) -> Self {
        Self {
            splitter,
            store,
            provider,
            collection: collection.into(),
        }
    }

    /// Ingest one document. Returns the number of chunks stored; an empty
    /// document short-circuits to 0 without touching the store.
    ///
    /// # Errors
    ///
    /// Returns an error if embedding or storage fails.
    pub async fn ingest(&self, document: &Document) -> Result<usize, DocumentError> {
        let chunks = self.splitter.split(document);
        if chunks.is_empty() {
            return Ok(0);
        }

        let mut points = Vec::with_capacity(chunks.len());
        for (i, chunk) in chunks.iter().enumerate() {
            let vector = self.provider.embed(&chunk.content).await?;
            points.push(VectorPoint {
                id: format!("doc-{i}"),
                vector,
                payload: chunk_payload(chunk),
            });
        }

        let vector_size = u64::try_from(points[0].vector.len()).unwrap_or(1536);
        self.store
            .ensure_collection(&self.collection, vector_size)
            .await?;

        let count = points.len();
        self.store.upsert(&self.collection, points).await?;
        tracing::info!(count, collection = %self.collection, "ingested document chunks");
        Ok(count)
    }

    /// # Errors
    ///
    /// Returns an error if loading, embedding, or storage fails.
    pub async fn load_and_ingest(
        &self,
        loader: &(dyn DocumentLoader + '_),
        source: &str,
    ) -> Result<usize, DocumentError> {
        let documents = loader.load(source).await?;
        let mut total = 0;
        for doc in documents {
            total += self.ingest(&doc).await?;
        }
        Ok(total)
    }
}

fn chunk_payload(chunk: &Chunk) -> std::collections::HashMap<String, serde_json::Value> {
    let metadata = chunk.metadata.clone().cleaned();
    let mut payload = std::collections::HashMap::from([
        ("content".to_owned(), json!(chunk.content)),
        ("source".to_owned(), json!(metadata.source)),
        ("content_type".to_owned(), json!(metadata.content_type)),
        ("chunk_index".to_owned(), json!(chunk.chunk_index)),
    ]);
    for (key, value) in metadata.extra {
        payload.entry(key).or_insert_with(|| json!(value));
    }
    payload
}
