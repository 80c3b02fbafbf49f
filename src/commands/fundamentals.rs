//! Single completions and prompt-template demos.

use strand_core::{ChatPromptTemplate, Config, PromptTemplate};
use strand_llm::{LlmProvider, Message};

pub async fn complete(config: &Config, text: &str) -> anyhow::Result<()> {
    let provider = super::chat_provider(config)?;
    let reply = provider.chat(&[Message::user(text)]).await?;
    println!("{reply}");
    Ok(())
}

pub async fn template(config: &Config, name: &str) -> anyhow::Result<()> {
    let template = PromptTemplate::new("Hi, I'm {name}! Tell me a joke with my name!");
    let prompt = template.format(&[("name", name)])?;
    println!("{prompt}");

    let provider = super::chat_provider(config)?;
    let reply = provider.chat(&[Message::user(prompt)]).await?;
    println!("{reply}");
    Ok(())
}

pub async fn chat_template(config: &Config, style: &str, question: &str) -> anyhow::Result<()> {
    let chat = ChatPromptTemplate::new()
        .system("you are an assistant that answers questions in a {style} style")
        .user("{question}");
    let messages = chat.format_messages(&[("style", style), ("question", question)], &[])?;

    for message in &messages {
        println!("{}: {}", message.role.as_str(), message.content);
    }

    let provider = super::chat_provider(config)?;
    let reply = provider.chat(&messages).await?;
    println!("{reply}");
    Ok(())
}
