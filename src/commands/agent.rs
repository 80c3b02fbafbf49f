//! ReAct agent demo with the builtin tools.

use std::sync::Arc;

use strand_agent::{Calculator, CapitalLookup, ReactAgent, ToolRegistry, TraceEvent};
use strand_core::Config;

pub async fn run(config: &Config, question: &str) -> anyhow::Result<()> {
    let provider = Arc::new(super::chat_provider(config)?);
    let registry = ToolRegistry::new().with(Calculator).with(CapitalLookup);
    let agent = ReactAgent::new(provider, registry);

    let run = agent.run(question).await?;
    for event in &run.trace {
        match event {
            TraceEvent::Thought(t) => println!("Thought: {t}"),
            TraceEvent::Action { tool, input } => {
                println!("Action: {tool}");
                println!("Action Input: {input}");
            }
            TraceEvent::Observation(o) => println!("Observation: {o}"),
            TraceEvent::FinalAnswer(_) => {}
        }
    }
    println!("Final Answer: {}", run.answer);
    Ok(())
}
