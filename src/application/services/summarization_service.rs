use std::fmt;
use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::application::ports::{Clock, LlmClient};
use crate::domain::{Chunk, ProviderId};

use super::cooldown_tracker::CooldownTracker;
use super::summary_prompt::build_summary_messages;

/// Summarizes one chunk at a time against a fixed, prioritized provider list.
///
/// Providers are tried in order. A provider in cooldown is skipped, a
/// rate-limited provider is put into cooldown, and the first success wins.
/// Each provider is tried at most once per chunk.
pub struct SummarizationService {
    providers: Vec<Arc<dyn LlmClient>>,
    cooldowns: Arc<CooldownTracker>,
    clock: Arc<dyn Clock>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderAttempt {
    pub provider: ProviderId,
    pub outcome: AttemptOutcome,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttemptOutcome {
    CoolingDown { until: DateTime<Utc> },
    RateLimited(String),
    Failed(String),
}

/// Point-in-time view of one provider, in priority order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderStatus {
    pub provider: ProviderId,
    pub cooldown_until: Option<DateTime<Utc>>,
}

impl ProviderStatus {
    pub fn is_available(&self) -> bool {
        self.cooldown_until.is_none()
    }
}

#[derive(Debug, thiserror::Error)]
pub enum SummarizationError {
    #[error("all providers failed or are in cooldown ({})", format_attempts(.attempts))]
    AllProvidersUnavailable { attempts: Vec<ProviderAttempt> },
}

impl fmt::Display for ProviderAttempt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.outcome {
            AttemptOutcome::CoolingDown { until } => {
                write!(f, "{}: cooling down until {}", self.provider, until.to_rfc3339())
            }
            AttemptOutcome::RateLimited(detail) => {
                write!(f, "{}: rate limited: {}", self.provider, detail)
            }
            AttemptOutcome::Failed(detail) => write!(f, "{}: {}", self.provider, detail),
        }
    }
}

fn format_attempts(attempts: &[ProviderAttempt]) -> String {
    if attempts.is_empty() {
        return "no providers configured".to_string();
    }
    attempts
        .iter()
        .map(ProviderAttempt::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

impl SummarizationService {
    pub fn new(
        providers: Vec<Arc<dyn LlmClient>>,
        cooldowns: Arc<CooldownTracker>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            providers,
            cooldowns,
            clock,
        }
    }

    pub fn provider_statuses(&self) -> Vec<ProviderStatus> {
        let now = self.clock.now();
        self.providers
            .iter()
            .map(|p| ProviderStatus {
                provider: p.provider_id().clone(),
                cooldown_until: self.cooldowns.cooldown_until(p.provider_id(), now),
            })
            .collect()
    }

    #[tracing::instrument(
        skip(self, chunk),
        fields(chunk_index = chunk.index, chunk_chars = chunk.char_len())
    )]
    pub async fn summarize_chunk(&self, chunk: &Chunk) -> Result<String, SummarizationError> {
        let messages = build_summary_messages(&chunk.text);
        let mut attempts = Vec::with_capacity(self.providers.len());

        for client in &self.providers {
            let provider = client.provider_id();
            let now = self.clock.now();

            if let Some(until) = self.cooldowns.cooldown_until(provider, now) {
                tracing::debug!(%provider, until = %until.to_rfc3339(), "Skipping provider in cooldown");
                attempts.push(ProviderAttempt {
                    provider: provider.clone(),
                    outcome: AttemptOutcome::CoolingDown { until },
                });
                continue;
            }

            match client.complete(&messages).await {
                Ok(summary) => {
                    tracing::info!(%provider, "Chunk summarized");
                    return Ok(summary);
                }
                Err(e) if e.is_rate_limited() => {
                    let until = self.cooldowns.mark_rate_limited(provider, self.clock.now());
                    tracing::warn!(
                        %provider,
                        error = %e,
                        cooldown_until = %until.to_rfc3339(),
                        "Provider rate limited, entering cooldown"
                    );
                    attempts.push(ProviderAttempt {
                        provider: provider.clone(),
                        outcome: AttemptOutcome::RateLimited(e.to_string()),
                    });
                }
                Err(e) => {
                    tracing::warn!(%provider, error = %e, "Provider failed");
                    attempts.push(ProviderAttempt {
                        provider: provider.clone(),
                        outcome: AttemptOutcome::Failed(e.to_string()),
                    });
                }
            }
        }

        Err(SummarizationError::AllProvidersUnavailable { attempts })
    }
}
