mod paragraph_splitter;
mod pdf_adapter;
mod text_sanitizer;

pub use paragraph_splitter::{DEFAULT_MAX_CHUNK_CHARS, ParagraphSplitter, split_paragraphs};
pub use pdf_adapter::PdfAdapter;
pub use text_sanitizer::sanitize_page_text;
