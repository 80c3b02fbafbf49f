//! Loader + splitter demo: print a source's chunks.

use strand_memory::document::{
    DocumentLoader, PdfLoader, SplitMode, SplitterConfig, TextLoader, TextSplitter, WebLoader,
};

pub async fn run(source: &str, chunk_size: usize, chunk_overlap: usize) -> anyhow::Result<()> {
    let loader: Box<dyn DocumentLoader> =
        if source.starts_with("http://") || source.starts_with("https://") {
            Box::new(WebLoader::default())
        } else if source.ends_with(".pdf") {
            Box::new(PdfLoader::default())
        } else {
            Box::new(TextLoader::default())
        };

    let documents = loader.load(source).await?;
    let splitter = TextSplitter::new(SplitterConfig {
        chunk_size,
        chunk_overlap,
        mode: SplitMode::Sentences,
    });
    let chunks = splitter.split_all(&documents);

    for chunk in &chunks {
        println!("{}", chunk.content);
        println!("{}", "-".repeat(30));
    }
    println!("{} chunk(s)", chunks.len());
    Ok(())
}
