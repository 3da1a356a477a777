//! The seam between provider clients and the code that asks questions.

use async_trait::async_trait;

use crate::{config::llm_provider::LlmProvider, error_handler::AiLlmError, reply::LlmReply};

/// A text-generation backend that turns one prompt into one normalized reply.
///
/// Implemented by [`GeminiService`](crate::services::gemini_service::GeminiService)
/// and [`HuggingFaceService`](crate::services::hugging_face_service::HuggingFaceService);
/// tests plug in scripted doubles.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Provider behind this generator.
    fn provider(&self) -> LlmProvider;

    /// Model identifier used for requests.
    fn model(&self) -> &str;

    /// Sends a single prompt and returns the normalized reply.
    async fn generate(&self, prompt: &str) -> Result<LlmReply, AiLlmError>;
}
