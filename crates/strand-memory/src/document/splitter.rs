use super::types::{Chunk, Document};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SplitMode {
    /// Fixed-size character windows with a fixed stride.
    Characters,
    /// Sentence runs merged up to the size limit, overlap carried back.
    Sentences,
}

#[derive(Debug, Clone)]
pub struct SplitterConfig {
    pub chunk_size: usize,
    pub chunk_overlap: usize,
    pub mode: SplitMode,
}

impl Default for SplitterConfig {
    fn default() -> Self {
        Self {
            chunk_size: 1000,
            chunk_overlap: 150,
            mode: SplitMode::Sentences,
        }
    }
}

pub struct TextSplitter {
    config: SplitterConfig,
}

impl TextSplitter {
    #[must_use]
    pub fn new(config: SplitterConfig) -> Self {
        Self { config }
    }

    /// Partition a document into overlapping windows with sequential indices.
    /// Empty input yields no chunks.
    #[must_use]
    pub fn split(&self, document: &Document) -> Vec<Chunk> {
        if document.content.is_empty() {
            return Vec::new();
        }

        let windows = match self.config.mode {
            SplitMode::Characters => {
                char_windows(&document.content, self.config.chunk_size, self.config.chunk_overlap)
            }
            SplitMode::Sentences => merge_sentences(
                &sentences(&document.content),
                self.config.chunk_size,
                self.config.chunk_overlap,
            ),
        };

        windows
            .into_iter()
            .enumerate()
            .map(|(i, content)| Chunk {
                content,
                metadata: document.metadata.clone(),
                chunk_index: i,
            })
            .collect()
    }

    /// Split several documents, numbering chunks per document.
    #[must_use]
    pub fn split_all(&self, documents: &[Document]) -> Vec<Chunk> {
        documents.iter().flat_map(|d| self.split(d)).collect()
    }
}

/// Break text into sentence-ish pieces: paragraph breaks and `. ! ?`
/// followed by whitespace end a piece. The terminator stays with its piece.
fn sentences(text: &str) -> Vec<String> {
    let mut pieces = Vec::new();
    let mut current = String::new();
    let mut chars = text.chars().peekable();

    while let Some(c) = chars.next() {
        current.push(c);
        let boundary = match c {
            '\n' => chars.peek() == Some(&'\n'),
            '.' | '!' | '?' => chars.peek().is_some_and(|n| n.is_whitespace()),
            _ => false,
        };
        if boundary && !current.trim().is_empty() {
            pieces.push(std::mem::take(&mut current));
        }
    }

    if !current.trim().is_empty() {
        pieces.push(current);
    }
    pieces
}

fn merge_sentences(pieces: &[String], chunk_size: usize, chunk_overlap: usize) -> Vec<String> {
    let mut chunks = Vec::new();
    let mut current: Vec<usize> = Vec::new();
    let mut current_len = 0;

    for (idx, piece) in pieces.iter().enumerate() {
        if current_len > 0 && current_len + piece.len() > chunk_size {
            chunks.push(current.iter().map(|&i| pieces[i].as_str()).collect());

            // Carry back the newest pieces that fit in the overlap budget.
            let mut overlap: Vec<usize> = Vec::new();
            let mut overlap_len = 0;
            for &i in current.iter().rev() {
                if overlap_len + pieces[i].len() > chunk_overlap {
                    break;
                }
                overlap_len += pieces[i].len();
                overlap.push(i);
            }
            overlap.reverse();
            current = overlap;
            current_len = overlap_len;
        }

        current.push(idx);
        current_len += piece.len();
    }

    if !current.is_empty() {
        chunks.push(current.iter().map(|&i| pieces[i].as_str()).collect());
    }
    chunks
}

fn char_windows(text: &str, chunk_size: usize, chunk_overlap: usize) -> Vec<String> {
    let chars: Vec<char> = text.chars().collect();
    let stride = chunk_size.saturating_sub(chunk_overlap).max(1);
    let mut windows = Vec::new();
    let mut start = 0;

    while start < chars.len() {
        let end = (start + chunk_size).min(chars.len());
        windows.push(chars[start..end].iter().collect());
        start += stride;
    }
    windows
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::types::DocumentMetadata;

    fn doc(content: &str) -> Document {
        Document::new(content, DocumentMetadata::new("test", "text/plain"))
    }

    fn char_splitter(chunk_size: usize, chunk_overlap: usize) -> TextSplitter {
        TextSplitter::new(SplitterConfig {
            chunk_size,
            chunk_overlap,
            mode: SplitMode::Characters,
        })
    }

    #[test]
    fn empty_document_yields_no_chunks() {
        let chunks = TextSplitter::new(SplitterConfig::default()).split(&doc(""));
        assert!(chunks.is_empty());
    }

    #[test]
    fn short_document_is_one_chunk() {
        let chunks = TextSplitter::new(SplitterConfig::default()).split(&doc("Hello world."));
        assert_eq!(chunks.len(), 1);
        assert_eq!(chunks[0].content, "Hello world.");
        assert_eq!(chunks[0].chunk_index, 0);
    }

    #[test]
    fn char_windows_overlap() {
        let chunks = char_splitter(10, 3).split(&doc("abcdefghijklmnopqrstuvwxyz"));
        assert!(chunks.len() > 1);
        assert_eq!(&chunks[0].content[7..10], &chunks[1].content[..3]);
    }

    #[test]
    fn char_windows_no_overlap() {
        let chunks = char_splitter(5, 0).split(&doc("abcdefghij"));
        let contents: Vec<_> = chunks.iter().map(|c| c.content.as_str()).collect();
        assert_eq!(contents, vec!["abcde", "fghij"]);
    }

    #[test]
    fn overlap_at_least_chunk_size_still_progresses() {
        let chunks = char_splitter(3, 3).split(&doc("abcde"));
        assert!(!chunks.is_empty());
        assert_eq!(chunks[0].content, "abc");
    }

    #[test]
    fn sentence_boundaries() {
        let pieces = sentences("First one. Second one? Third!");
        assert_eq!(pieces.len(), 3);
        assert!(pieces[0].ends_with(". "));
    }

    #[test]
    fn paragraph_break_is_boundary() {
        let pieces = sentences("First paragraph.\n\nSecond paragraph.");
        assert_eq!(pieces.len(), 2);
    }

    #[test]
    fn no_terminator_is_single_piece() {
        let pieces = sentences("no punctuation here");
        assert_eq!(pieces.len(), 1);
    }

    #[test]
    fn sentence_mode_respects_size() {
        let text = "First sentence here. Second sentence here. Third sentence here. \
                    Fourth sentence here. Fifth sentence here.";
        let splitter = TextSplitter::new(SplitterConfig {
            chunk_size: 50,
            chunk_overlap: 10,
            mode: SplitMode::Sentences,
        });
        let chunks = splitter.split(&doc(text));
        assert!(chunks.len() > 1);
        for (i, chunk) in chunks.iter().enumerate() {
            assert_eq!(chunk.chunk_index, i);
        }
    }

    #[test]
    fn sentence_mode_carries_overlap() {
        let text = "Aaaa. Bbbb. Cccc. Dddd. Eeee.";
        let splitter = TextSplitter::new(SplitterConfig {
            chunk_size: 13,
            chunk_overlap: 6,
            mode: SplitMode::Sentences,
        });
        let chunks = splitter.split(&doc(text));
        assert!(chunks.len() > 1);
        // Adjacent chunks share at least one sentence.
        assert!(chunks.windows(2).all(|pair| {
            let first = &pair[0].content;
            let second = &pair[1].content;
            second
                .split_inclusive(". ")
                .next()
                .is_some_and(|head| first.contains(head.trim_end()))
        }));
    }

    #[test]
    fn metadata_propagates_to_chunks() {
        let chunks = char_splitter(4, 0).split(&doc("abcdefgh"));
        assert!(chunks.iter().all(|c| c.metadata.source == "test"));
    }

    #[test]
    fn split_all_numbers_per_document() {
        let splitter = char_splitter(4, 0);
        let chunks = splitter.split_all(&[doc("abcdefgh"), doc("ijkl")]);
        assert_eq!(chunks.len(), 3);
        assert_eq!(chunks[2].chunk_index, 0);
    }

    mod proptest_splitter {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn split_never_panics(
                content in "\\PC{0,2000}",
                chunk_size in 1usize..500,
                chunk_overlap in 0usize..200,
                sentence_mode in proptest::bool::ANY,
            ) {
                let splitter = TextSplitter::new(SplitterConfig {
                    chunk_size,
                    chunk_overlap,
                    mode: if sentence_mode { SplitMode::Sentences } else { SplitMode::Characters },
                });
                let _ = splitter.split(&doc(&content));
            }

            #[test]
            fn char_mode_covers_all_content(
                content in "[a-z ]{1,300}",
                chunk_size in 5usize..100,
            ) {
                let splitter = char_splitter(chunk_size, 0);
                let chunks = splitter.split(&doc(&content));
                let rejoined: String = chunks.iter().map(|c| c.content.as_str()).collect();
                prop_assert_eq!(rejoined, content);
            }

            #[test]
            fn indices_are_sequential(
                content in "[a-z. ]{1,500}",
                chunk_size in 2usize..80,
                sentence_mode in proptest::bool::ANY,
            ) {
                let splitter = TextSplitter::new(SplitterConfig {
                    chunk_size,
                    chunk_overlap: 0,
                    mode: if sentence_mode { SplitMode::Sentences } else { SplitMode::Characters },
                });
                let chunks = splitter.split(&doc(&content));
                for (i, chunk) in chunks.iter().enumerate() {
                    prop_assert_eq!(chunk.chunk_index, i);
                }
            }
        }
    }
}
