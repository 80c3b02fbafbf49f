//! Interactive conversation with per-session memory.

use std::io::Write;
use std::sync::Arc;

use strand_core::{ChatPromptTemplate, Config, ConversationalChain};
use strand_memory::{SessionStore, TokenCounter, TrimConfig};

const SESSION_ID: &str = "cli";

pub async fn run(config: &Config, window: Option<usize>) -> anyhow::Result<()> {
    let provider = Arc::new(super::chat_provider(config)?);
    let store = Arc::new(SessionStore::new());

    let prompt = ChatPromptTemplate::new()
        .system("You are a helpful assistant.")
        .history()
        .user("{input}");

    let mut chain = ConversationalChain::new(prompt, provider, store);
    if let Some(max_messages) = window {
        chain = chain.with_trim(TrimConfig {
            max_tokens: max_messages,
            counter: TokenCounter::Messages,
            keep_system: true,
            start_on_user: true,
        });
    }

    println!("Chatting with session memory; empty line to quit.");
    let stdin = std::io::stdin();
    loop {
        print!("> ");
        std::io::stdout().flush()?;

        let mut line = String::new();
        if stdin.read_line(&mut line)? == 0 {
            break;
        }
        let input = line.trim();
        if input.is_empty() {
            break;
        }

        let reply = chain.send(SESSION_ID, input).await?;
        println!("{reply}");
    }

    Ok(())
}
