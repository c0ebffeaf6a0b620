mod environment;
mod settings;

pub use environment::{ENVIRONMENT_VAR, Environment};
pub use settings::{
    ChunkingSettings, CooldownSettings, LimitsSettings, LoggingSettings, ProviderSettings,
    ServerSettings, Settings, SettingsError,
};
