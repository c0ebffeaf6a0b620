use std::sync::Arc;

use reqwest::Client;

use crate::application::ports::LlmClient;
use crate::domain::ProviderId;
use crate::presentation::config::ProviderSettings;

use super::ChatCompletionClient;

#[derive(Debug, thiserror::Error)]
pub enum ProviderFactoryError {
    #[error("no provider has an API key configured (checked: {0})")]
    NoProvidersConfigured(String),
    #[error("failed to build HTTP client for provider {provider}: {reason}")]
    ClientBuild { provider: String, reason: String },
}

pub struct ProviderFactory;

impl ProviderFactory {
    /// Builds the prioritized provider list, reading API keys from the
    /// process environment.
    pub fn from_env(
        settings: &[ProviderSettings],
    ) -> Result<Vec<Arc<dyn LlmClient>>, ProviderFactoryError> {
        Self::create(settings, |var| std::env::var(var).ok())
    }

    /// Providers whose key lookup yields nothing are skipped with a warning,
    /// keeping the relative order of the rest.
    pub fn create<K>(
        settings: &[ProviderSettings],
        lookup_key: K,
    ) -> Result<Vec<Arc<dyn LlmClient>>, ProviderFactoryError>
    where
        K: Fn(&str) -> Option<String>,
    {
        let mut providers: Vec<Arc<dyn LlmClient>> = Vec::with_capacity(settings.len());

        for provider in settings {
            let Some(api_key) = lookup_key(&provider.api_key_env).filter(|k| !k.trim().is_empty())
            else {
                tracing::warn!(
                    provider = %provider.name,
                    env_var = %provider.api_key_env,
                    "API key not set, provider disabled"
                );
                continue;
            };

            let client = create_chat_completion_client(provider, api_key)?;
            tracing::info!(
                provider = %provider.name,
                model = %provider.model,
                priority = providers.len() + 1,
                "Provider enabled"
            );
            providers.push(Arc::new(client));
        }

        if providers.is_empty() {
            let checked = settings
                .iter()
                .map(|p| p.api_key_env.as_str())
                .collect::<Vec<_>>()
                .join(", ");
            return Err(ProviderFactoryError::NoProvidersConfigured(checked));
        }

        Ok(providers)
    }
}

pub fn create_chat_completion_client(
    settings: &ProviderSettings,
    api_key: String,
) -> Result<ChatCompletionClient, ProviderFactoryError> {
    let mut builder = Client::builder();
    if let Some(timeout) = settings.timeout() {
        builder = builder.timeout(timeout);
    }
    let http = builder
        .build()
        .map_err(|e| ProviderFactoryError::ClientBuild {
            provider: settings.name.clone(),
            reason: e.to_string(),
        })?;

    Ok(ChatCompletionClient::new(
        http,
        ProviderId::new(settings.name.clone()),
        &settings.base_url,
        api_key,
        settings.model.clone(),
    )
    .with_max_tokens(settings.max_tokens)
    .with_temperature(settings.temperature))
}
