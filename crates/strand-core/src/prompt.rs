//! String and chat prompt templates with `{name}` placeholders.

use strand_llm::{Message, Role};

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum PromptError {
    #[error("missing template variable: {0}")]
    MissingVariable(String),

    #[error("unclosed placeholder in template")]
    UnclosedPlaceholder,
}

/// A text template where `{name}` is replaced at format time.
/// `{{` and `}}` escape literal braces.
#[derive(Debug, Clone)]
pub struct PromptTemplate {
    template: String,
}

impl PromptTemplate {
    #[must_use]
    pub fn new(template: impl Into<String>) -> Self {
        Self {
            template: template.into(),
        }
    }

    /// Substitute `vars` into the template.
    ///
    /// # Errors
    ///
    /// Returns [`PromptError::MissingVariable`] for a placeholder with no
    /// matching entry, or [`PromptError::UnclosedPlaceholder`] for a `{`
    /// that never closes.
    pub fn format(&self, vars: &[(&str, &str)]) -> Result<String, PromptError> {
        let mut out = String::with_capacity(self.template.len());
        let mut chars = self.template.chars().peekable();

        while let Some(c) = chars.next() {
            match c {
                '{' if chars.peek() == Some(&'{') => {
                    chars.next();
                    out.push('{');
                }
                '}' if chars.peek() == Some(&'}') => {
                    chars.next();
                    out.push('}');
                }
                '{' => {
                    let mut name = String::new();
                    loop {
                        match chars.next() {
                            Some('}') => break,
                            Some(c) => name.push(c),
                            None => return Err(PromptError::UnclosedPlaceholder),
                        }
                    }
                    let value = vars
                        .iter()
                        .find(|(k, _)| *k == name)
                        .map(|(_, v)| *v)
                        .ok_or(PromptError::MissingVariable(name))?;
                    out.push_str(value);
                }
                c => out.push(c),
            }
        }

        Ok(out)
    }
}

enum ChatItem {
    Template { role: Role, template: PromptTemplate },
    History,
}

/// An ordered list of role-tagged message templates with an optional
/// history slot spliced in verbatim at format time.
pub struct ChatPromptTemplate {
    items: Vec<ChatItem>,
}

impl Default for ChatPromptTemplate {
    fn default() -> Self {
        Self::new()
    }
}

impl ChatPromptTemplate {
    #[must_use]
    pub fn new() -> Self {
        Self { items: Vec::new() }
    }

    #[must_use]
    pub fn system(self, template: impl Into<String>) -> Self {
        self.message(Role::System, template)
    }

    #[must_use]
    pub fn user(self, template: impl Into<String>) -> Self {
        self.message(Role::User, template)
    }

    #[must_use]
    pub fn message(mut self, role: Role, template: impl Into<String>) -> Self {
        self.items.push(ChatItem::Template {
            role,
            template: PromptTemplate::new(template),
        });
        self
    }

    /// Mark where conversation history is spliced in.
    #[must_use]
    pub fn history(mut self) -> Self {
        self.items.push(ChatItem::History);
        self
    }

    /// Render all message templates, splicing `history` into the history slot.
    ///
    /// # Errors
    ///
    /// Propagates template formatting errors.
    pub fn format_messages(
        &self,
        vars: &[(&str, &str)],
        history: &[Message],
    ) -> Result<Vec<Message>, PromptError> {
        let mut messages = Vec::with_capacity(self.items.len() + history.len());
        for item in &self.items {
            match item {
                ChatItem::Template { role, template } => {
                    messages.push(Message::new(*role, template.format(vars)?));
                }
                ChatItem::History => messages.extend_from_slice(history),
            }
        }
        Ok(messages)
    }
}
