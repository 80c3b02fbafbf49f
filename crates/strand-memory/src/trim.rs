//! Sliding-window trimming of chat histories.

use strand_llm::{Message, Role};

/// Estimate token count using the chars/4 heuristic.
#[must_use]
pub fn estimate_tokens(text: &str) -> usize {
    text.chars().count() / 4
}

/// How a message's cost is measured against the window budget.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenCounter {
    /// Each message costs 1. Useful for keep-last-N windows.
    Messages,
    /// Each message costs `estimate_tokens(content)`.
    EstimatedTokens,
}

impl TokenCounter {
    fn cost(self, message: &Message) -> usize {
        match self {
            Self::Messages => 1,
            Self::EstimatedTokens => estimate_tokens(&message.content),
        }
    }
}

#[derive(Debug, Clone)]
pub struct TrimConfig {
    pub max_tokens: usize,
    pub counter: TokenCounter,
    /// Keep a leading system message even when the budget is exhausted.
    pub keep_system: bool,
    /// Drop leading assistant messages so the window opens on a user turn.
    pub start_on_user: bool,
}

impl Default for TrimConfig {
    fn default() -> Self {
        Self {
            max_tokens: 1024,
            counter: TokenCounter::EstimatedTokens,
            keep_system: true,
            start_on_user: true,
        }
    }
}

/// Trim a history to the most recent messages that fit the budget.
///
/// Messages are never truncated mid-way: a message that does not fit is
/// dropped whole along with everything older than it. The leading system
/// message (if any, and if `keep_system`) is always retained and its cost
/// counts against the budget.
#[must_use]
pub fn trim_messages(messages: &[Message], config: &TrimConfig) -> Vec<Message> {
    let (system, rest) = match messages.first() {
        Some(first) if config.keep_system && first.role == Role::System => {
            (Some(first.clone()), &messages[1..])
        }
        _ => (None, messages),
    };

    let mut budget = config.max_tokens;
    if let Some(ref sys) = system {
        budget = budget.saturating_sub(config.counter.cost(sys));
    }

    // Walk backwards from the newest message until the budget runs out.
    let mut start = rest.len();
    let mut used = 0;
    for (idx, message) in rest.iter().enumerate().rev() {
        let cost = config.counter.cost(message);
        if used + cost > budget {
            break;
        }
        used += cost;
        start = idx;
    }

    let mut window = &rest[start..];
    if config.start_on_user {
        while let Some(first) = window.first() {
            if first.role == Role::User {
                break;
            }
            window = &window[1..];
        }
    }

    let mut out = Vec::with_capacity(window.len() + 1);
    if let Some(sys) = system {
        out.push(sys);
    }
    out.extend_from_slice(window);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Vec<Message> {
        vec![
            Message::system("be brief"),
            Message::user("my name is Wesley"),
            Message::assistant("OK"),
            Message::user("tell me a fun fact"),
            Message::assistant("bees can count"),
        ]
    }

    #[test]
    fn estimate_tokens_basic() {
        assert_eq!(estimate_tokens(""), 0);
        assert_eq!(estimate_tokens("test"), 1);
        assert_eq!(estimate_tokens("Hello world"), 2);
    }

    #[test]
    fn message_counter_keeps_last_n() {
        let config = TrimConfig {
            max_tokens: 3,
            counter: TokenCounter::Messages,
            ..TrimConfig::default()
        };
        let trimmed = trim_messages(&sample(), &config);
        // budget 3 = system + last user/assistant pair
        assert_eq!(trimmed.len(), 3);
        assert_eq!(trimmed[0].role, Role::System);
        assert_eq!(trimmed[1].content, "tell me a fun fact");
        assert_eq!(trimmed[2].content, "bees can count");
    }

    #[test]
    fn early_turns_are_forgotten() {
        let config = TrimConfig {
            max_tokens: 3,
            counter: TokenCounter::Messages,
            ..TrimConfig::default()
        };
        let trimmed = trim_messages(&sample(), &config);
        assert!(trimmed.iter().all(|m| !m.content.contains("Wesley")));
    }

    #[test]
    fn window_starts_on_user_turn() {
        let config = TrimConfig {
            max_tokens: 2,
            counter: TokenCounter::Messages,
            ..TrimConfig::default()
        };
        let trimmed = trim_messages(&sample(), &config);
        // budget 2 = system + assistant tail; the assistant message is then
        // dropped so the window opens on a user turn (leaving none).
        assert_eq!(trimmed.len(), 1);
        assert_eq!(trimmed[0].role, Role::System);
    }

    #[test]
    fn no_system_message() {
        let messages = vec![Message::user("a"), Message::assistant("b")];
        let config = TrimConfig {
            max_tokens: 10,
            counter: TokenCounter::Messages,
            ..TrimConfig::default()
        };
        let trimmed = trim_messages(&messages, &config);
        assert_eq!(trimmed.len(), 2);
    }

    #[test]
    fn keep_system_disabled() {
        let config = TrimConfig {
            max_tokens: 1,
            counter: TokenCounter::Messages,
            keep_system: false,
            start_on_user: false,
        };
        let trimmed = trim_messages(&sample(), &config);
        assert_eq!(trimmed.len(), 1);
        assert_eq!(trimmed[0].content, "bees can count");
    }

    #[test]
    fn zero_budget_keeps_only_system() {
        let config = TrimConfig {
            max_tokens: 0,
            counter: TokenCounter::Messages,
            ..TrimConfig::default()
        };
        let trimmed = trim_messages(&sample(), &config);
        assert_eq!(trimmed.len(), 1);
        assert_eq!(trimmed[0].role, Role::System);
    }

    #[test]
    fn token_counter_respects_budget() {
        let messages = vec![
            Message::user("aaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa"), // 8 tokens
            Message::user("bbbb"),                              // 1 token
        ];
        let config = TrimConfig {
            max_tokens: 4,
            counter: TokenCounter::EstimatedTokens,
            keep_system: true,
            start_on_user: true,
        };
        let trimmed = trim_messages(&messages, &config);
        assert_eq!(trimmed.len(), 1);
        assert_eq!(trimmed[0].content, "bbbb");
    }

    mod proptest_trim {
        use super::*;
        use proptest::prelude::*;

        fn arb_message() -> impl Strategy<Value = Message> {
            ("[a-z ]{0,40}", 0..3u8).prop_map(|(content, role)| {
                let role = match role {
                    0 => Role::System,
                    1 => Role::User,
                    _ => Role::Assistant,
                };
                Message::new(role, content)
            })
        }

        proptest! {
            #[test]
            fn output_is_suffix_of_input_modulo_system(
                messages in proptest::collection::vec(arb_message(), 0..20),
                max_tokens in 0usize..30,
                counter in proptest::bool::ANY,
            ) {
                let config = TrimConfig {
                    max_tokens,
                    counter: if counter { TokenCounter::Messages } else { TokenCounter::EstimatedTokens },
                    ..TrimConfig::default()
                };
                let trimmed = trim_messages(&messages, &config);

                // Everything retained (past any leading system message) must
                // appear in the same order at the end of the input.
                let tail: Vec<_> = trimmed
                    .iter()
                    .skip_while(|m| m.role == Role::System)
                    .cloned()
                    .collect();
                prop_assert!(tail.len() <= messages.len());
                if !tail.is_empty() {
                    let suffix = &messages[messages.len() - tail.len()..];
                    prop_assert_eq!(&tail[..], suffix);
                }
            }

            #[test]
            fn message_budget_never_exceeded(
                messages in proptest::collection::vec(arb_message(), 0..20),
                max_tokens in 0usize..10,
            ) {
                let config = TrimConfig {
                    max_tokens,
                    counter: TokenCounter::Messages,
                    keep_system: false,
                    start_on_user: false,
                };
                let trimmed = trim_messages(&messages, &config);
                prop_assert!(trimmed.len() <= max_tokens);
            }
        }
    }
}
