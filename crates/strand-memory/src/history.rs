use std::collections::HashMap;
use std::sync::RwLock;

use strand_llm::{Message, Role};

/// Ordered role-tagged messages for one conversation. Append-only.
#[derive(Debug, Clone, Default)]
pub struct ChatHistory {
    messages: Vec<Message>,
}

impl ChatHistory {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, message: Message) {
        self.messages.push(message);
    }

    pub fn push_user(&mut self, content: impl Into<String>) {
        self.push(Message::new(Role::User, content));
    }

    pub fn push_assistant(&mut self, content: impl Into<String>) {
        self.push(Message::new(Role::Assistant, content));
    }

    #[must_use]
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.messages.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}

/// In-process store mapping session ids to chat histories.
///
/// Sessions are created on first use and live for the lifetime of the
/// process; there is no persistence and no teardown.
#[derive(Debug, Default)]
pub struct SessionStore {
    sessions: RwLock<HashMap<String, ChatHistory>>,
}

impl SessionStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of a session's messages; empty when the session is unknown.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn history(&self, session_id: &str) -> Vec<Message> {
        self.sessions
            .read()
            .expect("session lock poisoned")
            .get(session_id)
            .map(|h| h.messages.clone())
            .unwrap_or_default()
    }

    /// Append a message, creating the session if needed.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    pub fn append(&self, session_id: &str, message: Message) {
        self.sessions
            .write()
            .expect("session lock poisoned")
            .entry(session_id.to_owned())
            .or_default()
            .push(message);
    }

    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn session_count(&self) -> usize {
        self.sessions.read().expect("session lock poisoned").len()
    }
}
