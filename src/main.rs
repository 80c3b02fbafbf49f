mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use strand_core::Config;

#[derive(Parser)]
#[command(name = "strand", version, about = "LLM orchestration demos: templates, chains, agents, memory, and retrieval")]
struct Cli {
    /// TOML config file; environment variables override it.
    #[arg(long, global = true, default_value = "strand.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Send a single prompt to the chat model and print the reply
    Complete {
        text: String,
    },
    /// Format a joke prompt for a name and run it through the model
    Template {
        #[arg(long, default_value = "Wesley")]
        name: String,
    },
    /// Render a role-tagged chat template and ask the model
    ChatTemplate {
        question: String,
        #[arg(long, default_value = "funny")]
        style: String,
    },
    /// Square a number, then have the model talk about the result
    Chain {
        x: i64,
    },
    /// Translate to English, then summarize in four words
    Pipeline {
        text: String,
    },
    /// Split a long text into chunks and summarize it
    Summarize {
        /// "stuff" or "map-reduce"
        #[arg(long, default_value = "stuff")]
        strategy: String,
        /// Text file to summarize; a built-in sample is used when omitted
        #[arg(long)]
        file: Option<PathBuf>,
    },
    /// Ask the ReAct agent a question, printing the reasoning trace
    Agent {
        question: String,
    },
    /// Interactive conversation with per-session memory
    Chat {
        /// Sliding-window size in messages; unlimited when omitted
        #[arg(long)]
        window: Option<usize>,
    },
    /// Load a file or URL and print its chunks
    Load {
        /// File path or http(s) URL
        source: String,
        #[arg(long, default_value_t = 500)]
        chunk_size: usize,
        #[arg(long, default_value_t = 100)]
        chunk_overlap: usize,
    },
    /// Ingest a PDF into the pgvector collection
    Ingest {
        path: PathBuf,
    },
    /// Similarity-search the pgvector collection
    Search {
        query: String,
        #[arg(long, default_value_t = 3)]
        limit: u64,
    },
    /// Answer a question using only the ingested documents
    Ask {
        question: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let cli = Cli::parse();
    let config = Config::load(&cli.config)?;

    match cli.command {
        Command::Complete { text } => commands::fundamentals::complete(&config, &text).await,
        Command::Template { name } => commands::fundamentals::template(&config, &name).await,
        Command::ChatTemplate { question, style } => {
            commands::fundamentals::chat_template(&config, &style, &question).await
        }
        Command::Chain { x } => commands::chains::chain(&config, x).await,
        Command::Pipeline { text } => commands::chains::pipeline(&config, &text).await,
        Command::Summarize { strategy, file } => {
            commands::summarize::run(&config, &strategy, file.as_deref()).await
        }
        Command::Agent { question } => commands::agent::run(&config, &question).await,
        Command::Chat { window } => commands::chat::run(&config, window).await,
        Command::Load {
            source,
            chunk_size,
            chunk_overlap,
        } => commands::load::run(&source, chunk_size, chunk_overlap).await,
        Command::Ingest { path } => commands::vector::ingest(&config, &path).await,
        Command::Search { query, limit } => commands::vector::search(&config, &query, limit).await,
        Command::Ask { question } => commands::vector::ask(&config, &question).await,
    }
}
