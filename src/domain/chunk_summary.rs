/// Text substituted for a chunk that no provider could summarize.
pub const FAILED_SUMMARY_PLACEHOLDER: &str = "[Summary failed for this chunk]";

/// Separator placed between per-chunk summaries in the final output.
const SUMMARY_SEPARATOR: &str = "\n\n";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChunkSummary {
    Summarized(String),
    Failed,
}

impl ChunkSummary {
    pub fn as_text(&self) -> &str {
        match self {
            ChunkSummary::Summarized(text) => text,
            ChunkSummary::Failed => FAILED_SUMMARY_PLACEHOLDER,
        }
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, ChunkSummary::Failed)
    }
}

/// Order-preserving result of summarizing every chunk of one document.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DocumentSummary {
    pub chunks: Vec<ChunkSummary>,
}

impl DocumentSummary {
    pub fn new(chunks: Vec<ChunkSummary>) -> Self {
        Self { chunks }
    }

    pub fn chunk_count(&self) -> usize {
        self.chunks.len()
    }

    pub fn failed_count(&self) -> usize {
        self.chunks.iter().filter(|c| c.is_failed()).count()
    }

    pub fn text(&self) -> String {
        self.chunks
            .iter()
            .map(ChunkSummary::as_text)
            .collect::<Vec<_>>()
            .join(SUMMARY_SEPARATOR)
    }
}
