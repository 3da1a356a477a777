//! Normalization of provider payloads into a single [`LlmReply`].
//!
//! Every client in [`crate::services`] hands its decoded JSON to
//! [`normalize_value`]; nothing above this crate ever inspects a raw payload.
//!
//! Accepted shapes, tried in order:
//! 1. direct fields: Gemini `candidates[].content.parts[].text`, or an object
//!    whose `content` is a string;
//! 2. key lookup: `response`, `generated_text`, `text`, `output`
//!    (arrays are normalized through their first element);
//! 3. a string containing `content=...additional_kwargs` (stringified chat
//!    message objects);
//! 4. the raw string form.

use serde::Serialize;
use serde_json::Value;

/// Keys tried (in order) when the payload is a plain object.
const TEXT_KEYS: [&str; 4] = ["response", "generated_text", "text", "output"];

const CONTENT_MARKER: &str = "content=";
const KWARGS_MARKER: &str = "additional_kwargs";

/// The normalized answer returned by every provider client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LlmReply {
    /// Plain answer text, trimmed.
    pub text: String,
}

impl LlmReply {
    /// Builds a reply from text; `None` when the trimmed text is empty.
    pub fn from_text(text: impl AsRef<str>) -> Option<Self> {
        let trimmed = text.as_ref().trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(Self {
                text: trimmed.to_string(),
            })
        }
    }
}

/// Normalizes a decoded provider payload. Returns `None` if the result is empty.
pub fn normalize_value(value: &Value) -> Option<LlmReply> {
    // A Gemini envelope without text (e.g. blocked prompt) is empty, not "raw".
    if value.get("candidates").is_some() {
        return direct_text(value).and_then(LlmReply::from_text);
    }
    if let Some(text) = direct_text(value) {
        return LlmReply::from_text(text);
    }
    if let Some(text) = keyed_text(value) {
        return LlmReply::from_text(text);
    }
    match value {
        Value::Null => None,
        Value::String(s) => normalize_str(s),
        other => normalize_str(&other.to_string()),
    }
}

/// Normalizes a payload that only exists in string form.
pub fn normalize_str(raw: &str) -> Option<LlmReply> {
    match extract_content_marker(raw) {
        Some(inner) => LlmReply::from_text(inner),
        None => LlmReply::from_text(raw),
    }
}

/// Extracts the text between `content=` and a following `additional_kwargs`
/// marker, stripping one layer of matching quotes. Both markers are required.
///
/// ```
/// use ai_llm_service::reply::extract_content_marker;
///
/// let raw = "content='Bias is error from wrong assumptions.' additional_kwargs={}";
/// assert_eq!(
///     extract_content_marker(raw),
///     Some("Bias is error from wrong assumptions.")
/// );
/// ```
pub fn extract_content_marker(raw: &str) -> Option<&str> {
    let start = raw.find(CONTENT_MARKER)? + CONTENT_MARKER.len();
    let rest = &raw[start..];
    let end = rest.find(KWARGS_MARKER)?;
    let inner = rest[..end].trim();
    Some(strip_quotes(inner))
}

fn strip_quotes(s: &str) -> &str {
    for q in ['\'', '"'] {
        if s.len() >= 2 && s.starts_with(q) && s.ends_with(q) {
            return &s[1..s.len() - 1];
        }
    }
    s
}

/// Shape 1: Gemini candidates or an object `content` string.
fn direct_text(value: &Value) -> Option<String> {
    let obj = value.as_object()?;

    if let Some(candidates) = obj.get("candidates").and_then(Value::as_array) {
        let joined = candidates
            .iter()
            .filter_map(|c| c.pointer("/content/parts").and_then(Value::as_array))
            .flat_map(|parts| parts.iter().filter_map(|p| p.get("text").and_then(Value::as_str)))
            .collect::<Vec<_>>()
            .concat();
        if !joined.trim().is_empty() {
            return Some(joined);
        }
        return None;
    }

    match obj.get("content") {
        Some(Value::String(s)) => Some(s.clone()),
        _ => None,
    }
}

/// Shape 2: well-known keys, nested `message`, or the first array element.
fn keyed_text(value: &Value) -> Option<String> {
    match value {
        Value::Object(obj) => {
            for key in TEXT_KEYS {
                if let Some(Value::String(s)) = obj.get(key) {
                    return Some(s.clone());
                }
            }
            obj.get("message")
                .and_then(|m| direct_text(m).or_else(|| keyed_text(m)))
        }
        Value::Array(items) => items
            .first()
            .and_then(|first| direct_text(first).or_else(|| keyed_text(first))),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn gemini_candidates_are_joined_and_trimmed() {
        let v = json!({
            "candidates": [{
                "content": { "role": "model", "parts": [{ "text": "Overfitting is " }, { "text": "memorizing noise.\n" }] },
                "finishReason": "STOP"
            }]
        });
        assert_eq!(
            normalize_value(&v).map(|r| r.text),
            Some("Overfitting is memorizing noise.".to_string())
        );
    }

    #[test]
    fn content_field_is_used_directly() {
        let v = json!({ "content": "  X  ", "response": "ignored" });
        assert_eq!(normalize_value(&v).unwrap().text, "X");
    }

    #[test]
    fn response_key_and_generated_text_array() {
        assert_eq!(
            normalize_value(&json!({ "response": "from ollama-like" }))
                .unwrap()
                .text,
            "from ollama-like"
        );
        assert_eq!(
            normalize_value(&json!([{ "generated_text": "hf answer" }]))
                .unwrap()
                .text,
            "hf answer"
        );
    }

    #[test]
    fn nested_message_content() {
        let v = json!({ "message": { "role": "assistant", "content": "nested" } });
        assert_eq!(normalize_value(&v).unwrap().text, "nested");
    }

    #[test]
    fn stringified_message_uses_marker_extraction() {
        let v = Value::String(
            "content=\"Use cross-validation.\" additional_kwargs={} response_metadata={}".into(),
        );
        assert_eq!(normalize_value(&v).unwrap().text, "Use cross-validation.");
    }

    #[test]
    fn content_marker_without_kwargs_keeps_whole_answer() {
        let raw = "In requests you pass the body as content=payload to httpx.post.";
        assert_eq!(extract_content_marker(raw), None);
        assert_eq!(normalize_value(&Value::String(raw.into())).unwrap().text, raw);
    }

    #[test]
    fn raw_string_falls_back_to_itself() {
        assert_eq!(normalize_str(" plain words ").unwrap().text, "plain words");
    }

    #[test]
    fn unknown_object_falls_back_to_string_form() {
        let v = json!({ "weird": 1 });
        assert_eq!(normalize_value(&v).unwrap().text, r#"{"weird":1}"#);
    }

    #[test]
    fn empty_payloads_are_none() {
        assert!(normalize_value(&Value::Null).is_none());
        assert!(normalize_value(&json!({ "content": "   " })).is_none());
        assert!(normalize_value(&json!({ "candidates": [] })).is_none());
        assert!(normalize_str("content='' additional_kwargs={}").is_none());
    }
}
