//! Shared LLM service with two profiles: `primary` and `fallback`.
//!
//! - Lives in the same Tokio runtime as the application.
//! - Construct once at startup, wrap in `Arc`, and pass clones to dependents.
//! - The primary profile is Gemini; the optional fallback is Hugging Face.
//! - A primary client that fails to construct is fatal only when there is no
//!   fallback; otherwise it is logged and the service starts fallback-only.
//!
//! # Example
//! ```no_run
//! use std::sync::Arc;
//! use ai_llm_service::config::default_config::{config_gemini_primary, config_hugging_face_fallback};
//! use ai_llm_service::service_profiles::LlmServiceProfiles;
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let svc = Arc::new(LlmServiceProfiles::from_configs(
//!     config_gemini_primary()?,
//!     config_hugging_face_fallback()?,
//!     Some(10),
//! )?);
//!
//! if let Some(primary) = svc.primary() {
//!     let reply = primary.generate("Explain p-values in one sentence.").await?;
//!     println!("{}", reply.text);
//! }
//! println!("{:?}", svc.health_all().await);
//! # Ok(()) }
//! ```

use std::sync::Arc;

use tracing::{error, info, warn};

use crate::{
    config::llm_model_config::LlmModelConfig,
    error_handler::{AiLlmError, ConfigError},
    health_service::{HealthService, HealthStatus},
    services::{gemini_service::GeminiService, hugging_face_service::HuggingFaceService},
    text_generator::TextGenerator,
};

/// Registry of the text generators available to this process.
pub struct LlmServiceProfiles {
    primary: Option<Arc<dyn TextGenerator>>,
    fallback: Option<Arc<dyn TextGenerator>>,
    configs: Vec<LlmModelConfig>,
    health: HealthService,
}

impl LlmServiceProfiles {
    /// Builds clients for the primary (Gemini) and optional fallback
    /// (Hugging Face) configs.
    ///
    /// # Errors
    /// - the primary client's error when it fails and no fallback exists
    /// - the fallback client's error when the fallback config is invalid
    /// - [`AiLlmError::HttpTransport`] if the health client cannot be built
    pub fn from_configs(
        primary_cfg: LlmModelConfig,
        fallback_cfg: Option<LlmModelConfig>,
        health_timeout_secs: Option<u64>,
    ) -> Result<Self, AiLlmError> {
        let mut configs = Vec::with_capacity(2);

        let fallback: Option<Arc<dyn TextGenerator>> = match fallback_cfg {
            Some(cfg) => {
                let svc = HuggingFaceService::new(cfg.clone())?;
                configs.push(cfg);
                Some(Arc::new(svc))
            }
            None => None,
        };

        let primary: Option<Arc<dyn TextGenerator>> = match GeminiService::new(primary_cfg.clone())
        {
            Ok(svc) => {
                configs.insert(0, primary_cfg);
                Some(Arc::new(svc))
            }
            Err(err) if fallback.is_some() => {
                warn!(error = %err, "primary provider init failed; continuing with fallback only");
                None
            }
            Err(err) => {
                error!(error = %err, "primary provider init failed and no fallback is configured");
                return Err(err);
            }
        };

        Self::from_generators(primary, fallback, configs, health_timeout_secs)
    }

    /// Assembles the registry from ready-made generators (used by tests and
    /// by callers that bring their own clients).
    ///
    /// `configs` only feeds [`health_all`](Self::health_all).
    ///
    /// # Errors
    /// - [`ConfigError::NoProvider`] when both generators are `None`
    /// - [`AiLlmError::HttpTransport`] if the health client cannot be built
    pub fn from_generators(
        primary: Option<Arc<dyn TextGenerator>>,
        fallback: Option<Arc<dyn TextGenerator>>,
        configs: Vec<LlmModelConfig>,
        health_timeout_secs: Option<u64>,
    ) -> Result<Self, AiLlmError> {
        if primary.is_none() && fallback.is_none() {
            return Err(ConfigError::NoProvider.into());
        }

        info!(
            primary = primary.as_ref().map(|p| p.model()).unwrap_or("none"),
            fallback = fallback.as_ref().map(|f| f.model()).unwrap_or("none"),
            "LLM profiles ready"
        );

        Ok(Self {
            primary,
            fallback,
            configs,
            health: HealthService::new(health_timeout_secs)?,
        })
    }

    /// Primary generator, if it could be constructed.
    pub fn primary(&self) -> Option<Arc<dyn TextGenerator>> {
        self.primary.clone()
    }

    /// Fallback generator, if configured.
    pub fn fallback(&self) -> Option<Arc<dyn TextGenerator>> {
        self.fallback.clone()
    }

    /// Returns a health snapshot for every configured provider.
    pub async fn health_all(&self) -> Vec<HealthStatus> {
        self.health.check_many(&self.configs).await
    }
}
