//! Lightweight Hugging Face Inference API client used as the fallback provider.
//!
//! - `POST {endpoint}/models/{model}` with `Authorization: Bearer <key>`
//!   and `{ "inputs": "<text>" }`; the reply is `[ { "generated_text": "..." } ]`.
//!
//! It uses the universal configuration [`LlmModelConfig`] and ensures
//! that the selected provider is [`LlmProvider::HuggingFace`].

use std::time::{Duration, Instant};

use async_trait::async_trait;
use reqwest::header;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, error, info, instrument};

use crate::{
    config::{llm_model_config::LlmModelConfig, llm_provider::LlmProvider},
    error_handler::{AiLlmError, ConfigError, ProviderError, ProviderErrorKind, is_http_endpoint},
    reply::{LlmReply, normalize_value},
    services::error_from_response,
    text_generator::TextGenerator,
};

/// Thin client for hosted Hugging Face inference.
pub struct HuggingFaceService {
    client: reqwest::Client,
    cfg: LlmModelConfig,
    url_model: String,
}

impl HuggingFaceService {
    /// Creates a new [`HuggingFaceService`] from the given config.
    ///
    /// # Errors
    /// - [`AiLlmError::Provider`] with `InvalidProvider`, `MissingApiKey` or `InvalidEndpoint`
    /// - [`AiLlmError::Config`] with `EmptyModel` if the model name is blank
    /// - [`AiLlmError::HttpTransport`] if HTTP client cannot be built
    pub fn new(cfg: LlmModelConfig) -> Result<Self, AiLlmError> {
        if cfg.provider != LlmProvider::HuggingFace {
            return Err(
                ProviderError::new(LlmProvider::HuggingFace, ProviderErrorKind::InvalidProvider)
                    .into(),
            );
        }

        let api_key = cfg.api_key.clone().ok_or_else(|| {
            ProviderError::new(LlmProvider::HuggingFace, ProviderErrorKind::MissingApiKey)
        })?;

        if !is_http_endpoint(&cfg.endpoint) {
            return Err(ProviderError::new(
                LlmProvider::HuggingFace,
                ProviderErrorKind::InvalidEndpoint(cfg.endpoint.clone()),
            )
            .into());
        }

        if cfg.model.trim().is_empty() {
            return Err(ConfigError::EmptyModel.into());
        }

        let timeout = cfg
            .timeout_secs
            .map(Duration::from_secs)
            .unwrap_or_else(|| Duration::from_secs(60));

        let mut auth = header::HeaderValue::from_str(&format!("Bearer {api_key}")).map_err(|e| {
            ProviderError::new(
                LlmProvider::HuggingFace,
                ProviderErrorKind::Decode(format!("invalid API key header: {e}")),
            )
        })?;
        auth.set_sensitive(true);

        let mut headers = header::HeaderMap::new();
        headers.insert(header::AUTHORIZATION, auth);

        let client = reqwest::Client::builder()
            .timeout(timeout)
            .default_headers(headers)
            .gzip(true)
            .brotli(true)
            .deflate(true)
            .build()?;

        let base = cfg.endpoint.trim().trim_end_matches('/').to_string();
        let url_model = format!("{}/models/{}", base, cfg.model.trim());

        info!(
            provider = ?cfg.provider,
            model = %cfg.model,
            endpoint = %cfg.endpoint,
            timeout_secs = timeout.as_secs(),
            "HuggingFaceService initialized"
        );

        Ok(Self {
            client,
            cfg,
            url_model,
        })
    }

    /// Runs a single inference request with `inputs` as the raw text.
    ///
    /// # Errors
    /// - [`AiLlmError::Provider`] with `Api`/`HttpStatus` for non-2xx responses
    /// - [`AiLlmError::HttpTransport`] for client errors
    /// - [`AiLlmError::Provider`] with `Decode`/`EmptyReply` if the body is unusable
    #[instrument(skip_all, fields(model = %self.cfg.model))]
    pub async fn generate(&self, inputs: &str) -> Result<LlmReply, AiLlmError> {
        let started = Instant::now();
        let body = InferenceRequest::from_cfg(&self.cfg, inputs);

        debug!(input_len = inputs.len(), "POST {}", self.url_model);
        let resp = self.client.post(&self.url_model).json(&body).send().await?;

        if !resp.status().is_success() {
            let err = error_from_response(LlmProvider::HuggingFace, &self.url_model, resp).await;
            error!(
                error = %err,
                quota = err.is_quota_exhausted(),
                latency_ms = started.elapsed().as_millis(),
                "Hugging Face inference returned non-success status"
            );
            return Err(err.into());
        }

        let payload: Value = resp.json().await.map_err(|e| {
            ProviderError::new(
                LlmProvider::HuggingFace,
                ProviderErrorKind::Decode(format!(
                    "serde error: {e}; expected `[{{ generated_text: string }}]`"
                )),
            )
        })?;

        let reply = normalize_value(&payload).ok_or_else(|| {
            ProviderError::new(LlmProvider::HuggingFace, ProviderErrorKind::EmptyReply)
        })?;

        info!(
            latency_ms = started.elapsed().as_millis(),
            answer_len = reply.text.len(),
            "Hugging Face inference completed"
        );

        Ok(reply)
    }
}

#[async_trait]
impl TextGenerator for HuggingFaceService {
    fn provider(&self) -> LlmProvider {
        LlmProvider::HuggingFace
    }

    fn model(&self) -> &str {
        &self.cfg.model
    }

    async fn generate(&self, prompt: &str) -> Result<LlmReply, AiLlmError> {
        HuggingFaceService::generate(self, prompt).await
    }
}

/* ==========================
HTTP payloads & options
========================== */

/// Request body for `/models/{model}`.
#[derive(Debug, Serialize)]
struct InferenceRequest<'a> {
    inputs: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    parameters: Option<InferenceParameters>,
    options: InferenceOptions,
}

impl<'a> InferenceRequest<'a> {
    fn from_cfg(cfg: &'a LlmModelConfig, inputs: &'a str) -> Self {
        let parameters = InferenceParameters {
            temperature: cfg.temperature,
            top_p: cfg.top_p,
            max_new_tokens: cfg.max_tokens,
        };
        let has_params = parameters.temperature.is_some()
            || parameters.top_p.is_some()
            || parameters.max_new_tokens.is_some();

        Self {
            inputs,
            parameters: has_params.then_some(parameters),
            options: InferenceOptions {
                wait_for_model: true,
            },
        }
    }
}

/// Subset of inference `parameters`.
#[derive(Debug, Default, Serialize)]
struct InferenceParameters {
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    top_p: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_new_tokens: Option<u32>,
}

#[derive(Debug, Serialize)]
struct InferenceOptions {
    wait_for_model: bool,
}
