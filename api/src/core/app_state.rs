use std::sync::Arc;

use ai_llm_service::{
    config::default_config::{config_gemini_primary, config_hugging_face_fallback},
    error_handler::{env_opt, env_opt_u64, env_or, validate_http_endpoint},
    service_profiles::LlmServiceProfiles,
};
use minijinja::Environment;
use services::unsplash::{
    DEFAULT_IMAGE_TIMEOUT_SECS, DEFAULT_UNSPLASH_ENDPOINT, ImageFetcher, UnsplashConfig,
};
use tracing::info;
use tutor::{AnsweringPipeline, SessionStore, Tutor, TutorConfig};

use crate::error_handler::{AppError, AppResult};

pub const CHAT_TEMPLATE: &str = "chat.html";

/// Timeout for `/health` provider probes.
const HEALTH_TIMEOUT_SECS: u64 = 10;

/// Shared state for all HTTP handlers.
pub struct AppState {
    /// Answers questions and records turns.
    pub tutor: Tutor,
    /// Live chat sessions keyed by cookie id.
    pub sessions: SessionStore,
    /// Provider registry, kept for health probes.
    pub llm_profiles: Arc<LlmServiceProfiles>,
    /// Best-effort decorative image source.
    pub images: ImageFetcher,
    /// Page templates (HTML auto-escaping).
    pub templates: Environment<'static>,
}

impl AppState {
    /// Load shared state from environment variables.
    ///
    /// # Errors
    /// - [`AppError::Config`] for missing `GEMINI_API_KEY` or invalid LLM settings
    /// - [`AppError::MissingEnv`] for a missing `UNSPLASH_API_KEY`
    /// - [`AppError::Init`] if an HTTP client cannot be built
    pub fn from_env() -> AppResult<Self> {
        let llm_profiles = Arc::new(LlmServiceProfiles::from_configs(
            config_gemini_primary()?,
            config_hugging_face_fallback()?,
            Some(HEALTH_TIMEOUT_SECS),
        )?);

        let tutor_cfg = TutorConfig::from_env()?;
        let tutor = Tutor::new(AnsweringPipeline::from_profiles(
            &llm_profiles,
            tutor_cfg.call_timeout,
        ));

        let unsplash_key = env_opt("UNSPLASH_API_KEY").ok_or(AppError::MissingEnv("UNSPLASH_API_KEY"))?;
        let unsplash_endpoint = env_or("UNSPLASH_ENDPOINT", DEFAULT_UNSPLASH_ENDPOINT);
        validate_http_endpoint("UNSPLASH_ENDPOINT", &unsplash_endpoint)?;
        let image_timeout =
            env_opt_u64("IMAGE_TIMEOUT_SECS")?.unwrap_or(DEFAULT_IMAGE_TIMEOUT_SECS);

        let images = ImageFetcher::new(
            UnsplashConfig::new(unsplash_key)
                .with_endpoint(unsplash_endpoint)
                .with_timeout_secs(image_timeout),
        )
        .map_err(|e| AppError::Init {
            component: "image fetcher",
            reason: format!("{e:#}"),
        })?;

        info!(
            initial_state = %tutor.initial_state(),
            session_ttl_secs = tutor_cfg.session_ttl.as_secs(),
            "application state ready"
        );

        Self::new(
            tutor,
            SessionStore::new(tutor_cfg.session_ttl),
            llm_profiles,
            images,
        )
    }

    /// Assembles state from ready-made parts.
    pub fn new(
        tutor: Tutor,
        sessions: SessionStore,
        llm_profiles: Arc<LlmServiceProfiles>,
        images: ImageFetcher,
    ) -> AppResult<Self> {
        Ok(Self {
            tutor,
            sessions,
            llm_profiles,
            images,
            templates: build_templates()?,
        })
    }
}

fn build_templates() -> AppResult<Environment<'static>> {
    let mut env = Environment::new();
    env.set_undefined_behavior(minijinja::UndefinedBehavior::Strict);
    env.add_template(CHAT_TEMPLATE, include_str!("../../templates/chat.html"))?;
    Ok(env)
}
