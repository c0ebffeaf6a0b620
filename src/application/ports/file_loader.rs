use async_trait::async_trait;

use crate::domain::Document;

/// Result of a single parse of an upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadedDocument {
    /// The document has more than `max_pages` pages. No text was extracted.
    OverPageLimit { page_count: usize },
    Extracted { page_count: usize, text: String },
}

#[async_trait]
pub trait FileLoader: Send + Sync {
    /// Parses `data` once, and extracts its text only when the page count is
    /// within `max_pages`.
    async fn load(
        &self,
        data: &[u8],
        document: &Document,
        max_pages: usize,
    ) -> Result<LoadedDocument, FileLoaderError>;
}

#[derive(Debug, thiserror::Error)]
pub enum FileLoaderError {
    #[error("extraction failed: {0}")]
    ExtractionFailed(String),
}
