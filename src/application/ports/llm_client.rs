use async_trait::async_trait;

use crate::domain::{ChatMessage, ProviderId};

/// A single chat-completion provider. One call, no retries.
#[async_trait]
pub trait LlmClient: Send + Sync {
    fn provider_id(&self) -> &ProviderId;

    async fn complete(&self, messages: &[ChatMessage]) -> Result<String, LlmClientError>;
}

#[derive(Debug, thiserror::Error)]
pub enum LlmClientError {
    #[error("api request failed: {0}")]
    ApiRequestFailed(String),
    #[error("rate limited: {0}")]
    RateLimited(String),
    #[error("invalid response: {0}")]
    InvalidResponse(String),
}

impl LlmClientError {
    pub fn is_rate_limited(&self) -> bool {
        matches!(self, LlmClientError::RateLimited(_))
    }
}
