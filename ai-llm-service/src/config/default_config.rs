//! Default LLM configs loaded strictly from environment variables.
//!
//! Two roles exist:
//!
//! - **Primary**  → Gemini, answers every templated tutor prompt
//! - **Fallback** → Hugging Face Inference, used after Gemini quota runs out
//!
//! # Environment variables
//!
//! Common:
//! - `LLM_MAX_TOKENS`   = optional max tokens (u32)
//! - `LLM_TIMEOUT_SECS` = optional HTTP timeout for provider calls (u64, default 60, minimum 1)
//!
//! Gemini:
//! - `GEMINI_API_KEY`     (mandatory)
//! - `GEMINI_MODEL`       (default `gemini-1.5-flash`)
//! - `GEMINI_ENDPOINT`    (default `https://generativelanguage.googleapis.com`)
//! - `GEMINI_TEMPERATURE` (default `0.3`, must be within `0.0..=2.0`)
//!
//! Hugging Face:
//! - `HF_API_KEY`  (optional; without it there is no fallback)
//! - `HF_MODEL`    (default `google/flan-t5-large`)
//! - `HF_ENDPOINT` (default `https://api-inference.huggingface.co`)

use crate::{
    config::{llm_model_config::LlmModelConfig, llm_provider::LlmProvider},
    error_handler::{
        AiLlmError, env_opt, env_opt_f32, env_opt_u32, env_opt_u64, env_or, must_env,
        validate_http_endpoint, validate_range_f32,
    },
};

pub const DEFAULT_GEMINI_MODEL: &str = "gemini-1.5-flash";
pub const DEFAULT_GEMINI_ENDPOINT: &str = "https://generativelanguage.googleapis.com";
pub const DEFAULT_GEMINI_TEMPERATURE: f32 = 0.3;
pub const DEFAULT_HF_MODEL: &str = "google/flan-t5-large";
pub const DEFAULT_HF_ENDPOINT: &str = "https://api-inference.huggingface.co";
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// Constructs the config for the **primary** Gemini model.
///
/// # Env
/// - `GEMINI_API_KEY` (required)
/// - `GEMINI_MODEL`, `GEMINI_ENDPOINT`, `GEMINI_TEMPERATURE`, `LLM_MAX_TOKENS`,
///   `LLM_TIMEOUT_SECS` (optional)
///
/// # Errors
/// - [`ConfigError::MissingVar`](crate::ConfigError::MissingVar) if the key is absent
/// - [`ConfigError::InvalidNumber`](crate::ConfigError::InvalidNumber) /
///   [`ConfigError::OutOfRange`](crate::ConfigError::OutOfRange) /
///   [`ConfigError::InvalidFormat`](crate::ConfigError::InvalidFormat) for bad values
pub fn config_gemini_primary() -> Result<LlmModelConfig, AiLlmError> {
    let api_key = must_env("GEMINI_API_KEY")?;
    let endpoint = env_or("GEMINI_ENDPOINT", DEFAULT_GEMINI_ENDPOINT);
    validate_http_endpoint("GEMINI_ENDPOINT", &endpoint)?;

    let temperature = env_opt_f32("GEMINI_TEMPERATURE")?.unwrap_or(DEFAULT_GEMINI_TEMPERATURE);
    validate_range_f32("temperature", temperature, 0.0, 2.0)?;

    Ok(LlmModelConfig {
        provider: LlmProvider::Gemini,
        model: env_or("GEMINI_MODEL", DEFAULT_GEMINI_MODEL),
        endpoint,
        api_key: Some(api_key),
        max_tokens: env_opt_u32("LLM_MAX_TOKENS")?,
        temperature: Some(temperature),
        top_p: None,
        timeout_secs: Some(provider_timeout_secs()?),
    })
}

/// `LLM_TIMEOUT_SECS`, at least one second.
fn provider_timeout_secs() -> Result<u64, AiLlmError> {
    Ok(env_opt_u64("LLM_TIMEOUT_SECS")?
        .unwrap_or(DEFAULT_TIMEOUT_SECS)
        .max(1))
}

/// Constructs the config for the **fallback** Hugging Face model.
///
/// Returns `Ok(None)` when `HF_API_KEY` is not set: the fallback is optional.
///
/// # Errors
/// Same validation errors as [`config_gemini_primary`] for the HF variables.
pub fn config_hugging_face_fallback() -> Result<Option<LlmModelConfig>, AiLlmError> {
    let Some(api_key) = env_opt("HF_API_KEY") else {
        return Ok(None);
    };
    let endpoint = env_or("HF_ENDPOINT", DEFAULT_HF_ENDPOINT);
    validate_http_endpoint("HF_ENDPOINT", &endpoint)?;

    Ok(Some(LlmModelConfig {
        provider: LlmProvider::HuggingFace,
        model: env_or("HF_MODEL", DEFAULT_HF_MODEL),
        endpoint,
        api_key: Some(api_key),
        max_tokens: env_opt_u32("LLM_MAX_TOKENS")?,
        temperature: None,
        top_p: None,
        timeout_secs: Some(provider_timeout_secs()?),
    }))
}
