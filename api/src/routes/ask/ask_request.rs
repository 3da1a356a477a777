use serde::{Deserialize, Serialize};
use tutor::ProviderState;

/// Request payload for `POST /api/ask`.
#[derive(Debug, Deserialize)]
pub struct AskRequest {
    /// Data science question, sent as typed.
    pub question: String,
    /// Expertise level label (`"Beginner"`, `"👶 Beginner"`, ...).
    /// Omitted means the session's last choice.
    #[serde(default)]
    pub profile: Option<String>,
}

/// Response payload for `POST /api/ask`.
#[derive(Debug, Serialize)]
pub struct AskResponse {
    pub question: String,
    pub answer: String,
    /// Position of this turn in the session transcript (0-based).
    pub turn_index: usize,
    pub provider_state: ProviderState,
}
