mod chat_completion_client;
mod provider_factory;

pub use chat_completion_client::ChatCompletionClient;
pub use provider_factory::{ProviderFactory, ProviderFactoryError, create_chat_completion_client};
