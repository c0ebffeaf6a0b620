use crate::application::ports::TextSplitter;
use crate::domain::Chunk;

pub const DEFAULT_MAX_CHUNK_CHARS: usize = 3000;

/// Greedy paragraph packer.
///
/// Paragraphs are newline-delimited and never split. A chunk is closed as
/// soon as the next paragraph would bring it to `max_chars`, so a paragraph
/// longer than the bound becomes its own oversized chunk.
pub struct ParagraphSplitter {
    max_chars: usize,
}

impl ParagraphSplitter {
    pub fn new(max_chars: usize) -> Self {
        Self { max_chars }
    }
}

impl Default for ParagraphSplitter {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_CHUNK_CHARS)
    }
}

impl TextSplitter for ParagraphSplitter {
    fn split(&self, text: &str) -> Vec<Chunk> {
        split_paragraphs(text, self.max_chars)
            .into_iter()
            .enumerate()
            .map(|(index, text)| Chunk::new(index, text))
            .collect()
    }
}

/// Packs the paragraphs of `text` into trimmed chunks of under `max_chars`
/// characters each. Chunks that trim to nothing are dropped.
pub fn split_paragraphs(text: &str, max_chars: usize) -> Vec<String> {
    let mut chunks = Vec::new();
    let mut buffer = String::new();
    let mut buffer_chars = 0;

    for paragraph in text.split('\n') {
        let paragraph_chars = paragraph.chars().count();

        if buffer_chars + paragraph_chars >= max_chars {
            flush(&mut chunks, &buffer);
            buffer.clear();
            buffer_chars = 0;
        }

        buffer.push_str(paragraph);
        buffer.push('\n');
        buffer_chars += paragraph_chars + 1;
    }

    flush(&mut chunks, &buffer);
    chunks
}

fn flush(chunks: &mut Vec<String>, buffer: &str) {
    let trimmed = buffer.trim();
    if !trimmed.is_empty() {
        chunks.push(trimmed.to_string());
    }
}
