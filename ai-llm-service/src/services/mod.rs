//! Provider clients. Each one validates its config up front, keeps a single
//! `reqwest::Client`, and returns [`LlmReply`](crate::reply::LlmReply).

pub mod gemini_service;
pub mod hugging_face_service;

use serde_json::Value;

use crate::{
    config::llm_provider::LlmProvider,
    error_handler::{HttpError, ProviderError, ProviderErrorKind, make_snippet},
};

/// Turns a non-2xx response into a [`ProviderError`].
///
/// Structured bodies are kept structured so quota detection can look at the
/// provider's own status:
/// - Gemini: `{ "error": { "code": 429, "status": "RESOURCE_EXHAUSTED", "message": "..." } }`
/// - Hugging Face: `{ "error": "Model is currently loading" }`
///
/// Anything else becomes [`ProviderErrorKind::HttpStatus`] with a body snippet.
pub(crate) async fn error_from_response(
    provider: LlmProvider,
    url: &str,
    resp: reqwest::Response,
) -> ProviderError {
    let status = resp.status();
    let text = resp.text().await.unwrap_or_default();

    let kind = match serde_json::from_str::<Value>(&text)
        .ok()
        .and_then(|v| v.get("error").cloned())
    {
        Some(Value::Object(err)) => ProviderErrorKind::Api {
            code: err
                .get("code")
                .and_then(Value::as_u64)
                .and_then(|c| u16::try_from(c).ok())
                .unwrap_or(status.as_u16()),
            status: err
                .get("status")
                .and_then(Value::as_str)
                .map(str::to_string)
                .unwrap_or_else(|| status.canonical_reason().unwrap_or("UNKNOWN").to_string()),
            message: err
                .get("message")
                .and_then(Value::as_str)
                .map(make_snippet)
                .unwrap_or_default(),
        },
        Some(Value::String(message)) => ProviderErrorKind::Api {
            code: status.as_u16(),
            status: status.canonical_reason().unwrap_or("UNKNOWN").to_string(),
            message: make_snippet(&message),
        },
        _ => ProviderErrorKind::HttpStatus(HttpError {
            status,
            url: url.to_string(),
            snippet: make_snippet(&text),
        }),
    };

    ProviderError::new(provider, kind)
}
