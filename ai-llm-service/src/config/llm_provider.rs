use std::fmt;

/// Represents the provider (backend) used for text generation.
///
/// DataSage talks to Google Gemini as its primary provider and can fall back
/// to the Hugging Face Inference API when Gemini runs out of quota.
///
/// # Examples
///
/// ```
/// use ai_llm_service::LlmProvider;
///
/// fn describe(provider: LlmProvider) -> &'static str {
///     match provider {
///         LlmProvider::Gemini => "Google Gemini",
///         LlmProvider::HuggingFace => "Hugging Face Inference",
///     }
/// }
///
/// assert_eq!(describe(LlmProvider::Gemini), "Google Gemini");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LlmProvider {
    /// Google Gemini `generateContent` API.
    Gemini,
    /// Hugging Face hosted inference (`/models/{model}`).
    HuggingFace,
}

impl LlmProvider {
    /// Human-readable provider name used in logs and UI notes.
    pub fn display_name(self) -> &'static str {
        match self {
            LlmProvider::Gemini => "Gemini",
            LlmProvider::HuggingFace => "Hugging Face",
        }
    }
}

impl fmt::Display for LlmProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}
