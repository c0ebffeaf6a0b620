use crate::domain::ChatMessage;

pub const SUMMARY_SYSTEM_PROMPT: &str = "You are a helpful assistant. Summarize the following PDF content clearly and concisely, preserving important details.";

/// Builds the two-message conversation sent to every provider for one chunk.
pub fn build_summary_messages(chunk_text: &str) -> Vec<ChatMessage> {
    vec![
        ChatMessage::system(SUMMARY_SYSTEM_PROMPT),
        ChatMessage::user(format!(
            "PDF content:\n\n{chunk_text}\n\nPlease provide a summary."
        )),
    ]
}
