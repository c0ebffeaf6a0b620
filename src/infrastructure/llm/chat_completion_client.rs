use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};

use crate::application::ports::{LlmClient, LlmClientError};
use crate::domain::{ChatMessage, ProviderId};
use crate::infrastructure::observability::sanitize_for_log;

/// Adapter for any OpenAI-compatible `/chat/completions` endpoint
/// (Groq, OpenRouter, Together and friends).
pub struct ChatCompletionClient {
    client: Client,
    provider_id: ProviderId,
    endpoint: String,
    api_key: String,
    model: String,
    max_tokens: Option<u32>,
    temperature: Option<f32>,
}

#[derive(Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: &'a [ChatMessage],
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
}

#[derive(Deserialize)]
struct ChatCompletionResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
    #[serde(default)]
    error: Option<ApiError>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ResponseMessage,
}

#[derive(Deserialize)]
struct ResponseMessage {
    #[serde(default)]
    content: Option<String>,
}

/// Error object some gateways return in a 2xx body.
#[derive(Deserialize)]
struct ApiError {
    #[serde(default)]
    code: Option<serde_json::Value>,
    #[serde(default)]
    message: Option<String>,
}

impl ApiError {
    fn is_rate_limit(&self) -> bool {
        match &self.code {
            Some(serde_json::Value::Number(n)) => n.as_u64() == Some(429),
            Some(serde_json::Value::String(s)) => s == "429" || s == "rate_limit_exceeded",
            _ => false,
        }
    }

    fn describe(&self) -> String {
        let code = self
            .code
            .as_ref()
            .map(|c| c.to_string())
            .unwrap_or_else(|| "unknown".to_string());
        let message = self.message.as_deref().unwrap_or("no message");
        format!("provider error {code}: {}", sanitize_for_log(message))
    }
}

impl ChatCompletionClient {
    pub fn new(
        client: Client,
        provider_id: ProviderId,
        base_url: &str,
        api_key: String,
        model: String,
    ) -> Self {
        Self {
            client,
            provider_id,
            endpoint: format!("{}/chat/completions", base_url.trim_end_matches('/')),
            api_key,
            model,
            max_tokens: None,
            temperature: None,
        }
    }

    pub fn with_max_tokens(mut self, max_tokens: Option<u32>) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    pub fn with_temperature(mut self, temperature: Option<f32>) -> Self {
        self.temperature = temperature;
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl LlmClient for ChatCompletionClient {
    fn provider_id(&self) -> &ProviderId {
        &self.provider_id
    }

    #[tracing::instrument(skip(self, messages), fields(provider = %self.provider_id, model = %self.model))]
    async fn complete(&self, messages: &[ChatMessage]) -> Result<String, LlmClientError> {
        let request_body = ChatCompletionRequest {
            model: &self.model,
            messages,
            max_tokens: self.max_tokens,
            temperature: self.temperature,
        };

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&request_body)
            .send()
            .await
            .map_err(|e| LlmClientError::ApiRequestFailed(e.to_string()))?;

        let status = response.status();

        if status == StatusCode::TOO_MANY_REQUESTS {
            let body = response.text().await.unwrap_or_default();
            return Err(LlmClientError::RateLimited(format!(
                "HTTP {}: {}",
                status,
                sanitize_for_log(&body)
            )));
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(LlmClientError::ApiRequestFailed(format!(
                "HTTP {}: {}",
                status,
                sanitize_for_log(&body)
            )));
        }

        let completion_response: ChatCompletionResponse = response
            .json()
            .await
            .map_err(|e| LlmClientError::InvalidResponse(e.to_string()))?;

        if let Some(error) = completion_response.error {
            return Err(if error.is_rate_limit() {
                LlmClientError::RateLimited(error.describe())
            } else {
                LlmClientError::ApiRequestFailed(error.describe())
            });
        }

        let content = completion_response
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| LlmClientError::InvalidResponse("empty choices".to_string()))?
            .message
            .content
            .unwrap_or_default();

        if content.trim().is_empty() {
            return Err(LlmClientError::InvalidResponse(
                "empty message content".to_string(),
            ));
        }

        Ok(content)
    }
}
