//! Runtime configuration loaded from environment variables.

use std::time::Duration;

use ai_llm_service::error_handler::env_opt_u64;

use crate::error::TutorError;

pub const DEFAULT_CALL_TIMEOUT_SECS: u64 = 60;
pub const DEFAULT_SESSION_TTL_SECS: u64 = 3600;

/// Knobs for the answering pipeline and the session store.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TutorConfig {
    /// Upper bound for one provider call (`LLM_CALL_TIMEOUT_SECS`).
    pub call_timeout: Duration,
    /// Idle time after which a session ends (`SESSION_TTL_SECS`).
    pub session_ttl: Duration,
}

impl Default for TutorConfig {
    fn default() -> Self {
        Self {
            call_timeout: Duration::from_secs(DEFAULT_CALL_TIMEOUT_SECS),
            session_ttl: Duration::from_secs(DEFAULT_SESSION_TTL_SECS),
        }
    }
}

impl TutorConfig {
    /// Reads `LLM_CALL_TIMEOUT_SECS` and `SESSION_TTL_SECS`, falling back to defaults.
    ///
    /// # Errors
    /// [`TutorError::Config`] when a variable is set but not a valid `u64`.
    pub fn from_env() -> Result<Self, TutorError> {
        let call_timeout = env_opt_u64("LLM_CALL_TIMEOUT_SECS")?.unwrap_or(DEFAULT_CALL_TIMEOUT_SECS);
        let session_ttl = env_opt_u64("SESSION_TTL_SECS")?.unwrap_or(DEFAULT_SESSION_TTL_SECS);

        Ok(Self {
            call_timeout: Duration::from_secs(call_timeout.max(1)),
            session_ttl: Duration::from_secs(session_ttl.max(1)),
        })
    }
}
