//! Shared LLM layer for DataSage.
//!
//! - [`config`]: provider kinds, model configs, env-driven defaults.
//! - [`services`]: thin HTTP clients for Gemini and the Hugging Face Inference API.
//! - [`reply`]: the single place where raw provider payloads become [`LlmReply`].
//! - [`service_profiles`]: primary/fallback registry built once at startup.
//! - [`health_service`]: best-effort provider probes for `/health`.

pub mod config;
pub mod error_handler;
pub mod health_service;
pub mod reply;
pub mod service_profiles;
pub mod services;
pub mod telemetry;
pub mod text_generator;

pub use config::{llm_model_config::LlmModelConfig, llm_provider::LlmProvider};
pub use error_handler::{AiLlmError, ConfigError, HealthError, ProviderError, ProviderErrorKind};
pub use reply::LlmReply;
pub use text_generator::TextGenerator;
