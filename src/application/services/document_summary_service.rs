use std::sync::Arc;

use crate::application::ports::{FileLoader, FileLoaderError, LoadedDocument, TextSplitter};
use crate::domain::{ChunkSummary, Document, DocumentSummary};

use super::summarization_service::SummarizationService;

/// Runs one upload end to end: page limit, extraction, chunking, and a
/// sequential summarization pass that never fails on a single chunk.
pub struct DocumentSummaryService<F, T>
where
    F: FileLoader,
    T: TextSplitter,
{
    file_loader: Arc<F>,
    text_splitter: Arc<T>,
    summarizer: Arc<SummarizationService>,
    max_pages: usize,
}

impl<F, T> DocumentSummaryService<F, T>
where
    F: FileLoader,
    T: TextSplitter,
{
    pub fn new(
        file_loader: Arc<F>,
        text_splitter: Arc<T>,
        summarizer: Arc<SummarizationService>,
        max_pages: usize,
    ) -> Self {
        Self {
            file_loader,
            text_splitter,
            summarizer,
            max_pages,
        }
    }

    pub fn summarizer(&self) -> &SummarizationService {
        &self.summarizer
    }

    #[tracing::instrument(
        skip(self, data),
        fields(
            document_id = %document.id.as_uuid(),
            filename = %document.filename,
            size_bytes = document.size_bytes,
        )
    )]
    pub async fn summarize(
        &self,
        data: &[u8],
        document: &Document,
    ) -> Result<DocumentSummary, SummaryJobError> {
        let (pages, text) = match self
            .file_loader
            .load(data, document, self.max_pages)
            .await?
        {
            LoadedDocument::OverPageLimit { page_count } => {
                tracing::warn!(
                    pages = page_count,
                    limit = self.max_pages,
                    "Rejecting document over page limit"
                );
                return Err(SummaryJobError::PageLimitExceeded {
                    pages: page_count,
                    limit: self.max_pages,
                });
            }
            LoadedDocument::Extracted { page_count, text } => (page_count, text),
        };

        let chunks = self.text_splitter.split(&text);
        let chunk_count = chunks.len();
        tracing::info!(pages, chunk_count, "Parsed chunks from document");

        let mut summaries = Vec::with_capacity(chunk_count);
        for chunk in &chunks {
            tracing::debug!(chunk = chunk.index + 1, chunk_count, "Summarizing chunk");
            match self.summarizer.summarize_chunk(chunk).await {
                Ok(summary) => summaries.push(ChunkSummary::Summarized(summary)),
                Err(e) => {
                    tracing::error!(chunk = chunk.index + 1, error = %e, "Chunk summary failed");
                    summaries.push(ChunkSummary::Failed);
                }
            }
        }

        let summary = DocumentSummary::new(summaries);
        tracing::info!(
            chunk_count = summary.chunk_count(),
            failed = summary.failed_count(),
            "Document summary complete"
        );
        Ok(summary)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum SummaryJobError {
    #[error("PDF exceeds {limit} page limit.")]
    PageLimitExceeded { pages: usize, limit: usize },
    #[error("file loading: {0}")]
    FileLoading(#[from] FileLoaderError),
}
