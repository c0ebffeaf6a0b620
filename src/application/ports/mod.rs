mod clock;
mod file_loader;
mod llm_client;
mod text_splitter;

pub use clock::Clock;
pub use file_loader::{FileLoader, FileLoaderError, LoadedDocument};
pub use llm_client::{LlmClient, LlmClientError};
pub use text_splitter::TextSplitter;
