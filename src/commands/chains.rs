//! Pipeline composition demos.

use std::sync::Arc;

use strand_core::pipeline::{LlmStep, MapStep, Pipeline, TemplateStep};
use strand_core::{Config, PromptTemplate};

/// map → template → model: square the input, then talk about the result.
pub async fn chain(config: &Config, x: i64) -> anyhow::Result<()> {
    let provider = Arc::new(super::chat_provider(config)?);
    let template = PromptTemplate::new("Tell me about the number {square_result}");

    let result = Pipeline::start(MapStep::new(|x: i64| {
        vec![("square_result".to_owned(), (x * x).to_string())]
    }))
    .step(TemplateStep::new(template))
    .step(LlmStep::new(provider))
    .run(x)
    .await?;

    println!("{result}");
    Ok(())
}

/// Two chained model calls: translate to English, then compress to four words.
pub async fn pipeline(config: &Config, text: &str) -> anyhow::Result<()> {
    let provider = Arc::new(super::chat_provider(config)?);

    let translate = PromptTemplate::new("Translate the following text to English:\n```{initial_text}```");
    let summarize = PromptTemplate::new("Summarize the following text in 4 words:\n```{text}```");

    let result = Pipeline::start(MapStep::new(|text: String| {
        vec![("initial_text".to_owned(), text)]
    }))
    .step(TemplateStep::new(translate))
    .step(LlmStep::new(Arc::clone(&provider)))
    .step(MapStep::new(|translated: String| {
        vec![("text".to_owned(), translated)]
    }))
    .step(TemplateStep::new(summarize))
    .step(LlmStep::new(provider))
    .run(text.to_owned())
    .await?;

    println!("{result}");
    Ok(())
}
