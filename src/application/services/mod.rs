mod cooldown_tracker;
mod document_summary_service;
mod summarization_service;
mod summary_prompt;

pub use cooldown_tracker::{CooldownTracker, DEFAULT_COOLDOWN};
pub use document_summary_service::{DocumentSummaryService, SummaryJobError};
pub use summarization_service::{
    AttemptOutcome, ProviderAttempt, ProviderStatus, SummarizationError, SummarizationService,
};
pub use summary_prompt::{SUMMARY_SYSTEM_PROMPT, build_summary_messages};
