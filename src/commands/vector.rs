//! pgvector ingestion, search, and retrieval-augmented answering.

use std::path::Path;
use std::sync::Arc;

use strand_core::pipeline::{LlmStep, MapStep, Pipeline, RetrievalStep, TemplateStep};
use strand_core::{Config, PromptTemplate};
use strand_memory::document::{
    IngestionPipeline, PdfLoader, SplitMode, SplitterConfig, TextSplitter,
};
use strand_memory::{PgVectorStore, ScoredPoint};

const RETRIEVAL_LIMIT: u64 = 3;

const ANSWER_TEMPLATE: &str = "\
Answer the question using only the context below. If the context does not
contain the answer, say you don't know. Do not use outside knowledge.

Context:
{context}

Question: {question}";

pub async fn ingest(config: &Config, path: &Path) -> anyhow::Result<()> {
    let pg = config.require_pgvector()?;
    let provider = Arc::new(super::embedding_provider(config)?);
    let store = Arc::new(PgVectorStore::connect(&pg.url).await?);

    let splitter = TextSplitter::new(SplitterConfig {
        chunk_size: 1000,
        chunk_overlap: 150,
        mode: SplitMode::Sentences,
    });
    let pipeline = IngestionPipeline::new(splitter, store, provider, pg.collection.clone());

    let count = pipeline
        .load_and_ingest(&PdfLoader::default(), &path.display().to_string())
        .await?;
    println!("Stored {count} chunk(s) in collection {}", pg.collection);
    Ok(())
}

pub async fn search(config: &Config, query: &str, limit: u64) -> anyhow::Result<()> {
    let pg = config.require_pgvector()?;
    let provider = Arc::new(super::embedding_provider(config)?);
    let store = Arc::new(PgVectorStore::connect(&pg.url).await?);

    let step = RetrievalStep::new(store, provider, pg.collection.clone(), limit);
    let results = Pipeline::start(step).run(query.to_owned()).await?;

    for (i, hit) in results.iter().enumerate() {
        println!("{}", "=".repeat(50));
        println!("Result {} (score: {:.2}):", i + 1, hit.score);
        println!("{}", "=".repeat(50));
        println!("\n{}\n", payload_content(hit));
        println!("Metadata:");
        for (key, value) in &hit.payload {
            if key != "content" {
                println!("{key}: {value}");
            }
        }
    }
    Ok(())
}

pub async fn ask(config: &Config, question: &str) -> anyhow::Result<()> {
    let pg = config.require_pgvector()?;
    let provider = Arc::new(super::embedding_provider(config)?);
    let store = Arc::new(PgVectorStore::connect(&pg.url).await?);

    let question_owned = question.to_owned();
    let answer = Pipeline::start(RetrievalStep::new(
        store,
        Arc::clone(&provider),
        pg.collection.clone(),
        RETRIEVAL_LIMIT,
    ))
    .step(MapStep::new(move |hits: Vec<ScoredPoint>| {
        vec![
            ("context".to_owned(), format_context(&hits)),
            ("question".to_owned(), question_owned.clone()),
        ]
    }))
    .step(TemplateStep::new(PromptTemplate::new(ANSWER_TEMPLATE)))
    .step(LlmStep::new(provider))
    .run(question.to_owned())
    .await?;

    println!("{answer}");
    Ok(())
}

fn payload_content(hit: &ScoredPoint) -> String {
    hit.payload
        .get("content")
        .and_then(|v| v.as_str())
        .unwrap_or_default()
        .trim()
        .to_owned()
}

fn format_context(hits: &[ScoredPoint]) -> String {
    hits.iter()
        .map(payload_content)
        .collect::<Vec<_>>()
        .join("\n\n---\n\n")
}
