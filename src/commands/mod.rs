pub mod agent;
pub mod chains;
pub mod chat;
pub mod fundamentals;
pub mod load;
pub mod summarize;
pub mod vector;

use strand_core::Config;
use strand_llm::openai::OpenAiProvider;

/// Chat-model provider from config; fails fast when the API key is missing.
pub(crate) fn chat_provider(config: &Config) -> anyhow::Result<OpenAiProvider> {
    let openai = config.require_openai()?;
    let mut provider = OpenAiProvider::new(openai.api_key.clone(), openai.chat_model.clone())
        .with_base_url(openai.base_url.clone());
    if let Some(temperature) = openai.temperature {
        provider = provider.with_temperature(temperature);
    }
    Ok(provider)
}

/// Provider wired for embeddings as well as chat.
pub(crate) fn embedding_provider(config: &Config) -> anyhow::Result<OpenAiProvider> {
    let openai = config.require_openai()?;
    Ok(
        OpenAiProvider::new(openai.api_key.clone(), openai.chat_model.clone())
            .with_base_url(openai.base_url.clone())
            .with_embedding_model(openai.embedding_model.clone()),
    )
}
