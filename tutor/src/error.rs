//! Typed error for the tutor crate.

use ai_llm_service::AiLlmError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TutorError {
    /// Blank (or whitespace-only) question; nothing is sent or recorded.
    #[error("question must not be empty")]
    EmptyQuestion,

    /// Unknown expertise level label.
    #[error("unknown expertise level: {0:?}")]
    UnknownProfile(String),

    /// Invalid tutor settings in the environment.
    #[error("tutor config error: {0}")]
    Config(#[from] AiLlmError),
}
