use std::io::Write;
use std::time::Duration;

use async_trait::async_trait;
use pdf_oxide::PdfDocument;

use crate::application::ports::{FileLoader, FileLoaderError, LoadedDocument};
use crate::domain::Document;

use super::text_sanitizer::sanitize_page_text;

const EXTRACTION_TIMEOUT: Duration = Duration::from_secs(30);

/// Reads uploaded PDFs with `pdf_oxide`. Parsing is blocking, so every
/// operation runs on the blocking pool under a timeout.
#[derive(Default)]
pub struct PdfAdapter;

impl PdfAdapter {
    pub fn new() -> Self {
        Self
    }

    fn open(data: &[u8]) -> Result<(tempfile::NamedTempFile, PdfDocument), FileLoaderError> {
        let mut temp_file = tempfile::NamedTempFile::new().map_err(|e| {
            FileLoaderError::ExtractionFailed(format!("failed to create temp file: {e}"))
        })?;

        temp_file.write_all(data).map_err(|e| {
            FileLoaderError::ExtractionFailed(format!("failed to write temp file: {e}"))
        })?;

        let doc = PdfDocument::open(temp_file.path())
            .map_err(|e| FileLoaderError::ExtractionFailed(format!("failed to parse PDF: {e}")))?;

        Ok((temp_file, doc))
    }

    /// Opens the document once, gates on the page count, then reads every
    /// page. Fails when the document has pages but none of them can be read.
    fn load_pages(data: &[u8], max_pages: usize) -> Result<ParsedPages, FileLoaderError> {
        let (_temp_file, mut doc) = Self::open(data)?;
        let page_count = doc.page_count().map_err(|e| {
            FileLoaderError::ExtractionFailed(format!("failed to read page count: {e}"))
        })?;

        if page_count > max_pages {
            return Ok(ParsedPages::OverLimit(page_count));
        }

        let results = (0..page_count).map(|page_index| doc.extract_text(page_index));
        let pages = readable_pages(results)?;

        Ok(ParsedPages::Read { page_count, pages })
    }

    async fn run_blocking<R, Op>(data: &[u8], op: Op) -> Result<R, FileLoaderError>
    where
        R: Send + 'static,
        Op: FnOnce(&[u8]) -> Result<R, FileLoaderError> + Send + 'static,
    {
        let data = data.to_vec();
        tokio::time::timeout(
            EXTRACTION_TIMEOUT,
            tokio::task::spawn_blocking(move || op(&data)),
        )
        .await
        .map_err(|_| FileLoaderError::ExtractionFailed("PDF extraction timed out".to_string()))?
        .map_err(|e| FileLoaderError::ExtractionFailed(format!("task join error: {e}")))?
    }
}

/// Keeps the pages that extracted, logging the rest. Errors when there were
/// pages and every one of them failed.
fn readable_pages<E, I>(results: I) -> Result<Vec<String>, FileLoaderError>
where
    E: std::fmt::Display,
    I: IntoIterator<Item = Result<String, E>>,
{
    let mut pages = Vec::new();
    let mut failed = 0usize;
    let mut last_error = None;

    for (page_index, result) in results.into_iter().enumerate() {
        match result {
            Ok(text) => pages.push(text),
            Err(e) => {
                tracing::warn!(page = page_index + 1, error = %e, "Skipping unreadable page");
                failed += 1;
                last_error = Some(e.to_string());
            }
        }
    }

    if failed > 0 && pages.is_empty() {
        return Err(FileLoaderError::ExtractionFailed(format!(
            "no readable pages out of {failed}: {}",
            last_error.unwrap_or_default()
        )));
    }

    Ok(pages)
}

enum ParsedPages {
    OverLimit(usize),
    Read { page_count: usize, pages: Vec<String> },
}

#[async_trait]
impl FileLoader for PdfAdapter {
    #[tracing::instrument(
        skip(self, data),
        fields(
            document_id = %document.id.as_uuid(),
            filename = %document.filename,
        )
    )]
    async fn load(
        &self,
        data: &[u8],
        document: &Document,
        max_pages: usize,
    ) -> Result<LoadedDocument, FileLoaderError> {
        let (page_count, pages) =
            match Self::run_blocking(data, move |data| Self::load_pages(data, max_pages)).await? {
                ParsedPages::OverLimit(page_count) => {
                    return Ok(LoadedDocument::OverPageLimit { page_count });
                }
                ParsedPages::Read { page_count, pages } => (page_count, pages),
            };
        tracing::info!(page_count, readable_pages = pages.len(), "PDF text extraction complete");

        let text = pages
            .iter()
            .map(|page| sanitize_page_text(page))
            .collect::<Vec<_>>()
            .join("\n");

        if text.trim().is_empty() {
            tracing::warn!("PDF contains no extractable text");
        }

        Ok(LoadedDocument::Extracted { page_count, text })
    }
}
