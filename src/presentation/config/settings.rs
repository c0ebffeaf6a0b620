use std::collections::HashSet;
use std::time::Duration;

use config::{Config, File};
use serde::Deserialize;

use super::Environment;
use crate::application::services::DEFAULT_COOLDOWN;
use crate::infrastructure::observability::DEFAULT_LOG_FILTER;
use crate::infrastructure::text_processing::DEFAULT_MAX_CHUNK_CHARS;

pub const ENV_PREFIX: &str = "APP";
pub const ENV_SEPARATOR: &str = "__";

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub server: ServerSettings,
    pub chunking: ChunkingSettings,
    pub limits: LimitsSettings,
    pub cooldown: CooldownSettings,
    pub logging: LoggingSettings,
    /// Providers in priority order.
    pub providers: Vec<ProviderSettings>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
    pub max_upload_mb: usize,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ChunkingSettings {
    pub max_chunk_chars: usize,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LimitsSettings {
    pub max_pages: usize,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CooldownSettings {
    pub duration_secs: u64,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    pub level: String,
    pub json: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ProviderSettings {
    pub name: String,
    pub base_url: String,
    pub model: String,
    /// Name of the environment variable holding the API key.
    pub api_key_env: String,
    #[serde(default)]
    pub timeout_secs: Option<u64>,
    #[serde(default)]
    pub max_tokens: Option<u32>,
    #[serde(default)]
    pub temperature: Option<f32>,
}

#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

impl Settings {
    /// Layers `appsettings.{Environment}.toml` (optional) under `APP__*`
    /// environment variables, e.g. `APP__SERVER__PORT=9000`.
    pub fn load(environment: Environment) -> Result<Self, SettingsError> {
        let configuration = Config::builder()
            .add_source(File::with_name(&environment.settings_file()).required(false))
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator(ENV_SEPARATOR)
                    .separator(ENV_SEPARATOR)
                    .try_parsing(true),
            )
            .build()?;

        let settings: Settings = configuration.try_deserialize()?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> Result<(), SettingsError> {
        if self.chunking.max_chunk_chars == 0 {
            return Err(SettingsError::Invalid(
                "chunking.max_chunk_chars must be greater than zero".to_string(),
            ));
        }
        if self.limits.max_pages == 0 {
            return Err(SettingsError::Invalid(
                "limits.max_pages must be greater than zero".to_string(),
            ));
        }
        if self.cooldown.duration_secs == 0 {
            return Err(SettingsError::Invalid(
                "cooldown.duration_secs must be greater than zero".to_string(),
            ));
        }
        if self.server.max_upload_mb == 0 {
            return Err(SettingsError::Invalid(
                "server.max_upload_mb must be greater than zero".to_string(),
            ));
        }
        if let Some(p) = self.providers.iter().find(|p| p.name.trim().is_empty()) {
            return Err(SettingsError::Invalid(format!(
                "provider with base_url {} has an empty name",
                p.base_url
            )));
        }
        let mut seen = HashSet::with_capacity(self.providers.len());
        if let Some(p) = self.providers.iter().find(|p| !seen.insert(p.name.as_str())) {
            return Err(SettingsError::Invalid(format!(
                "provider name {} is configured more than once",
                p.name
            )));
        }
        Ok(())
    }
}

impl CooldownSettings {
    pub fn duration(&self) -> Duration {
        Duration::from_secs(self.duration_secs)
    }
}

impl ServerSettings {
    pub fn max_upload_bytes(&self) -> usize {
        self.max_upload_mb.saturating_mul(1024 * 1024)
    }
}

impl ProviderSettings {
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }

    fn new(name: &str, base_url: &str, model: &str, api_key_env: &str) -> Self {
        Self {
            name: name.to_string(),
            base_url: base_url.to_string(),
            model: model.to_string(),
            api_key_env: api_key_env.to_string(),
            timeout_secs: None,
            max_tokens: None,
            temperature: None,
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            server: ServerSettings::default(),
            chunking: ChunkingSettings::default(),
            limits: LimitsSettings::default(),
            cooldown: CooldownSettings::default(),
            logging: LoggingSettings::default(),
            providers: default_providers(),
        }
    }
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8000,
            max_upload_mb: 20,
        }
    }
}

impl Default for ChunkingSettings {
    fn default() -> Self {
        Self {
            max_chunk_chars: DEFAULT_MAX_CHUNK_CHARS,
        }
    }
}

impl Default for LimitsSettings {
    fn default() -> Self {
        Self { max_pages: 15 }
    }
}

impl Default for CooldownSettings {
    fn default() -> Self {
        Self {
            duration_secs: DEFAULT_COOLDOWN.as_secs(),
        }
    }
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: DEFAULT_LOG_FILTER.to_string(),
            json: false,
        }
    }
}

/// Groq, then OpenRouter, then Together.
pub fn default_providers() -> Vec<ProviderSettings> {
    vec![
        ProviderSettings::new(
            "groq",
            "https://api.groq.com/openai/v1",
            "llama-3.3-70b-versatile",
            "GROQ_API_KEY",
        ),
        ProviderSettings::new(
            "openrouter",
            "https://openrouter.ai/api/v1",
            "meta-llama/llama-3.3-8b-instruct:free",
            "OPENROUTER_API_KEY",
        ),
        ProviderSettings::new(
            "together",
            "https://api.together.xyz/v1",
            "meta-llama/Llama-3.3-70B-Instruct-Turbo-Free",
            "TOGETHER_API_KEY",
        ),
    ]
}
