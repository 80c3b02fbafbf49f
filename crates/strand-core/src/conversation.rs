//! Chains with per-session conversation memory.

use std::sync::Arc;

use strand_llm::{LlmProvider, Message};
use strand_memory::{SessionStore, TrimConfig, trim_messages};

use crate::pipeline::PipelineError;
use crate::prompt::ChatPromptTemplate;

/// A prompt + provider pair that threads session history through each call.
///
/// The full history is always recorded; trimming (when configured) only
/// affects what the model sees.
pub struct ConversationalChain<P> {
    prompt: ChatPromptTemplate,
    provider: Arc<P>,
    store: Arc<SessionStore>,
    trim: Option<TrimConfig>,
}

impl<P: LlmProvider> ConversationalChain<P> {
    #[must_use]
    pub fn new(prompt: ChatPromptTemplate, provider: Arc<P>, store: Arc<SessionStore>) -> Self {
        Self {
            prompt,
            provider,
            store,
            trim: None,
        }
    }

    /// Apply a sliding window to the history before each model call.
    #[must_use]
    pub fn with_trim(mut self, trim: TrimConfig) -> Self {
        self.trim = Some(trim);
        self
    }

    /// Send one user turn for `session_id` and record both sides.
    ///
    /// # Errors
    ///
    /// Returns an error if prompt formatting or the model call fails; the
    /// failed turn is not recorded.
    pub async fn send(&self, session_id: &str, input: &str) -> Result<String, PipelineError> {
        let history = self.store.history(session_id);
        let window = match &self.trim {
            Some(config) => trim_messages(&history, config),
            None => history,
        };

        let messages = self.prompt.format_messages(&[("input", input)], &window)?;
        let response = self.provider.chat(&messages).await?;

        self.store.append(session_id, Message::user(input));
        self.store
            .append(session_id, Message::assistant(response.clone()));
        Ok(response)
    }
}
