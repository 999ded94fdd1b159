//! kaiwa-providers — chat provider integrations.
//!
//! Implements the `ChatProvider` trait for OpenAI and Ollama, plus a
//! deterministic mock, so kaiwa can hold practice conversations against
//! multiple backends.

pub mod config;
pub mod error;
pub mod mock;
pub mod ollama;
pub mod openai;

pub use config::{
    create_provider, create_provider_or_mock, load_config, load_config_from, KaiwaConfig,
    ProviderConfig, ScoringConfig,
};
pub use error::ProviderError;
