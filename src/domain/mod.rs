mod chat_message;
mod chunk;
mod chunk_summary;
mod document;
mod message_role;
mod provider_id;

pub use chat_message::ChatMessage;
pub use chunk::Chunk;
pub use chunk_summary::{ChunkSummary, DocumentSummary, FAILED_SUMMARY_PLACEHOLDER};
pub use document::{Document, DocumentId};
pub use message_role::MessageRole;
pub use provider_id::ProviderId;
