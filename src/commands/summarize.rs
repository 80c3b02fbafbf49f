//! Splitter + summarizer demo.

use std::path::Path;
use std::sync::Arc;

use strand_core::{Config, SummarizeStrategy, Summarizer};
use strand_memory::document::{Document, DocumentMetadata, SplitMode, SplitterConfig, TextSplitter};

const SAMPLE_TEXT: &str = "\
Dawn threads a pale gold through the alley of glass.
The city yawns in a chorus of brakes and distant sirens.
Windows blink awake, one by one, like sleepy eyes.
Streetcloth of steam curls from manholes, a quiet river.
Coffee steam spirals above a newspaper's pale print.
Pedestrians sketch light on sidewalks, hurried, loud with umbrellas.
Buses swallow the morning with their loud yawns.
A sparrow perches on a steel beam, surveying the grid.
The subway sighs somewhere underground, a heartbeat rising.
Neon still glows in the corners where night refused to retire.
A cyclist cuts through the chorus, bright with chrome and momentum.
The city clears its throat, the air turning a little less electric.
Shoes hiss on concrete, a thousand small verbs of arriving.
Dawn keeps its promises in the quiet rhythm of a waking metropolis.
The morning light cascades through towering windows of steel and glass,
casting geometric shadows on busy streets below.
Traffic flows like rivers of metal and light,
while pedestrians weave through crosswalks with purpose.
Coffee shops exhale warmth and the aroma of fresh bread,
as commuters clutch their cups like talismans against the cold.
Street vendors call out in a symphony of languages,
their voices mixing with the distant hum of construction.
Pigeons dance between the feet of hurried workers,
finding crumbs of breakfast pastries on concrete sidewalks.
The city breathes in rhythm with a million heartbeats,
each person carrying dreams and deadlines in equal measure.
Skyscrapers reach toward clouds that drift like cotton,
while far below, subway trains rumble through tunnels.
This urban orchestra plays from dawn until dusk,
an endless song of ambition, struggle, and hope.";

pub async fn run(config: &Config, strategy: &str, file: Option<&Path>) -> anyhow::Result<()> {
    let strategy: SummarizeStrategy = strategy
        .parse()
        .map_err(|e: String| anyhow::anyhow!(e))?;

    let text = match file {
        Some(path) => std::fs::read_to_string(path)?,
        None => SAMPLE_TEXT.to_owned(),
    };
    let source = file.map_or_else(|| "sample".to_owned(), |p| p.display().to_string());

    let splitter = TextSplitter::new(SplitterConfig {
        chunk_size: 250,
        chunk_overlap: 70,
        mode: SplitMode::Sentences,
    });
    let document = Document::new(text, DocumentMetadata::new(source, "text/plain"));
    let chunks = splitter.split(&document);
    tracing::info!(chunks = chunks.len(), "split input text");

    let provider = Arc::new(super::chat_provider(config)?);
    let summary = Summarizer::new(provider, strategy).summarize(&chunks).await?;
    println!("{summary}");
    Ok(())
}
