use std::marker::PhantomData;
use std::str::FromStr;
use std::sync::Arc;

use strand_llm::{LlmProvider, Message};
use strand_memory::vector_store::{ScoredPoint, VectorStore};

use super::PipelineError;
use super::step::Step;
use crate::prompt::PromptTemplate;

/// Renders a [`PromptTemplate`] from `(name, value)` pairs.
pub struct TemplateStep {
    template: PromptTemplate,
}

impl TemplateStep {
    #[must_use]
    pub fn new(template: PromptTemplate) -> Self {
        Self { template }
    }
}

impl Step for TemplateStep {
    type Input = Vec<(String, String)>;
    type Output = String;

    async fn run(&self, input: Self::Input) -> Result<Self::Output, PipelineError> {
        let vars: Vec<(&str, &str)> = input
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_str()))
            .collect();
        Ok(self.template.format(&vars)?)
    }
}

/// Sends the input as a user message, optionally behind a system prompt.
pub struct LlmStep<P> {
    provider: Arc<P>,
    system_prompt: Option<String>,
}

impl<P> LlmStep<P> {
    #[must_use]
    pub fn new(provider: Arc<P>) -> Self {
        Self {
            provider,
            system_prompt: None,
        }
    }

    #[must_use]
    pub fn with_system_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.system_prompt = Some(prompt.into());
        self
    }
}

impl<P: LlmProvider> Step for LlmStep<P> {
    type Input = String;
    type Output = String;

    async fn run(&self, input: Self::Input) -> Result<Self::Output, PipelineError> {
        let mut messages = Vec::with_capacity(2);
        if let Some(sys) = &self.system_prompt {
            messages.push(Message::system(sys.clone()));
        }
        messages.push(Message::user(input));
        self.provider
            .chat(&messages)
            .await
            .map_err(PipelineError::Llm)
    }
}

/// Wraps a plain synchronous function as a step.
pub struct MapStep<F, In, Out> {
    f: F,
    _marker: PhantomData<fn(In) -> Out>,
}

impl<F, In, Out> MapStep<F, In, Out> {
    #[must_use]
    pub fn new(f: F) -> Self {
        Self {
            f,
            _marker: PhantomData,
        }
    }
}

impl<F, In, Out> Step for MapStep<F, In, Out>
where
    F: Fn(In) -> Out + Send + Sync,
    In: Send,
    Out: Send,
{
    type Input = In;
    type Output = Out;

    async fn run(&self, input: Self::Input) -> Result<Self::Output, PipelineError> {
        Ok((self.f)(input))
    }
}

/// Trims the input and parses it with [`FromStr`].
pub struct ParseStep<T> {
    _marker: PhantomData<T>,
}

impl<T> ParseStep<T> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            _marker: PhantomData,
        }
    }
}

impl<T> Default for ParseStep<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Step for ParseStep<T>
where
    T: FromStr + Send + Sync,
    T::Err: std::fmt::Display,
{
    type Input = String;
    type Output = T;

    async fn run(&self, input: Self::Input) -> Result<Self::Output, PipelineError> {
        input
            .trim()
            .parse()
            .map_err(|e: T::Err| PipelineError::Parse(e.to_string()))
    }
}

/// Embeds the query and returns the nearest stored points.
pub struct RetrievalStep<P, V> {
    store: Arc<V>,
    provider: Arc<P>,
    collection: String,
    limit: u64,
}

impl<P, V> RetrievalStep<P, V> {
    #[must_use]
    pub fn new(store: Arc<V>, provider: Arc<P>, collection: impl Into<String>, limit: u64) -> Self {
        Self {
            store,
            provider,
            collection: collection.into(),
            limit,
        }
    }
}

impl<P: LlmProvider, V: VectorStore> Step for RetrievalStep<P, V> {
    type Input = String;
    type Output = Vec<ScoredPoint>;

    async fn run(&self, input: Self::Input) -> Result<Self::Output, PipelineError> {
        let embedding = self
            .provider
            .embed(&input)
            .await
            .map_err(PipelineError::Llm)?;
        self.store
            .search(&self.collection, embedding, self.limit)
            .await
            .map_err(PipelineError::Store)
    }
}
