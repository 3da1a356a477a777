//! Answering pipeline: prompt → provider → display string.
//!
//! Every outcome becomes text for the transcript. Provider failures never
//! escape [`AnsweringPipeline::answer`]; they are mapped to fixed messages and,
//! for quota exhaustion, to a forward move of the session's [`ProviderState`].

use std::sync::Arc;
use std::time::{Duration, Instant};

use ai_llm_service::service_profiles::LlmServiceProfiles;
use ai_llm_service::{AiLlmError, ProviderError, ProviderErrorKind, TextGenerator};
use tracing::{info, warn};

use crate::profile::Profile;
use crate::prompt::build_prompt_for;
use crate::provider_state::ProviderState;

pub const QUOTA_EXCEEDED_MESSAGE: &str =
    "⚠️ API quota exceeded. Please wait a moment and try your question again.";

pub const PROVIDERS_UNAVAILABLE_MESSAGE: &str =
    "⚠️ All AI providers are unavailable for this session. Please try again later.";

const API_ERROR_PREFIX: &str = "API error: ";

/// Primary/fallback generators plus the per-call time limit.
#[derive(Clone)]
pub struct AnsweringPipeline {
    primary: Option<Arc<dyn TextGenerator>>,
    fallback: Option<Arc<dyn TextGenerator>>,
    call_timeout: Duration,
}

impl AnsweringPipeline {
    pub fn new(
        primary: Option<Arc<dyn TextGenerator>>,
        fallback: Option<Arc<dyn TextGenerator>>,
        call_timeout: Duration,
    ) -> Self {
        Self {
            primary,
            fallback,
            call_timeout,
        }
    }

    pub fn from_profiles(profiles: &LlmServiceProfiles, call_timeout: Duration) -> Self {
        Self::new(profiles.primary(), profiles.fallback(), call_timeout)
    }

    /// State a new session starts in.
    pub fn initial_state(&self) -> ProviderState {
        ProviderState::initial(self.primary.is_some(), self.fallback.is_some())
    }

    pub fn has_fallback(&self) -> bool {
        self.fallback.is_some()
    }

    /// Answers one question. Always returns a non-empty string.
    ///
    /// - `Primary`: templated prompt to the primary generator. Quota
    ///   exhaustion returns [`QUOTA_EXCEEDED_MESSAGE`] and moves the session
    ///   to `Fallback` (or `Unavailable` without one); other errors return
    ///   `"API error: …"` and keep the state.
    /// - `Fallback`: the raw question goes to the fallback generator; any
    ///   failure moves the session to `Unavailable`.
    /// - `Unavailable`: no call, [`PROVIDERS_UNAVAILABLE_MESSAGE`].
    pub async fn answer(&self, state: &mut ProviderState, question: &str, profile: Profile) -> String {
        loop {
            match *state {
                ProviderState::Primary => {
                    let Some(primary) = self.primary.as_ref() else {
                        *state = ProviderState::initial(false, self.has_fallback());
                        continue;
                    };
                    let prompt = build_prompt_for(question, profile);
                    return match self.call(primary.as_ref(), &prompt).await {
                        Ok(text) => text,
                        Err(err) if err.is_quota_exhausted() => {
                            *state = ProviderState::after_primary_exhausted(self.has_fallback());
                            warn!(next_state = %state, "primary quota exhausted");
                            QUOTA_EXCEEDED_MESSAGE.to_string()
                        }
                        Err(err) => api_error_message(&err),
                    };
                }
                ProviderState::Fallback => {
                    let Some(fallback) = self.fallback.as_ref() else {
                        *state = ProviderState::Unavailable;
                        continue;
                    };
                    return match self.call(fallback.as_ref(), question).await {
                        Ok(text) => text,
                        Err(err) => {
                            *state = ProviderState::Unavailable;
                            warn!(error = %err, "fallback failed; no providers left for this session");
                            if err.is_quota_exhausted() {
                                QUOTA_EXCEEDED_MESSAGE.to_string()
                            } else {
                                api_error_message(&err)
                            }
                        }
                    };
                }
                ProviderState::Unavailable => return PROVIDERS_UNAVAILABLE_MESSAGE.to_string(),
            }
        }
    }

    /// One bounded call; blank replies count as errors.
    async fn call(&self, generator: &dyn TextGenerator, input: &str) -> Result<String, AiLlmError> {
        let started = Instant::now();
        let provider = generator.provider();

        let reply = match tokio::time::timeout(self.call_timeout, generator.generate(input)).await {
            Ok(res) => res?,
            Err(_) => return Err(AiLlmError::Timeout(self.call_timeout)),
        };

        let text = reply.text.trim();
        if text.is_empty() {
            return Err(ProviderError::new(provider, ProviderErrorKind::EmptyReply).into());
        }

        info!(
            provider = %provider,
            model = generator.model(),
            latency_ms = started.elapsed().as_millis(),
            "answer generated"
        );
        Ok(text.to_string())
    }
}

fn api_error_message(err: &AiLlmError) -> String {
    format!("{API_ERROR_PREFIX}{err}")
}
