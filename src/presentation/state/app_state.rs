use std::sync::Arc;

use crate::application::ports::{FileLoader, TextSplitter};
use crate::application::services::DocumentSummaryService;

pub struct AppState<F, T>
where
    F: FileLoader,
    T: TextSplitter,
{
    pub summary_service: Arc<DocumentSummaryService<F, T>>,
}

impl<F, T> Clone for AppState<F, T>
where
    F: FileLoader,
    T: TextSplitter,
{
    fn clone(&self) -> Self {
        Self {
            summary_service: Arc::clone(&self.summary_service),
        }
    }
}
