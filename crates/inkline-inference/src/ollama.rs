//! Ollama fallback classifier implementation.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

use inkline_core::{Error, FallbackClassifier, FallbackOutcome, FallbackRequest, Result};

use crate::prompt::{classification_prompt, parse_classification_response};

/// Default Ollama endpoint.
pub const DEFAULT_OLLAMA_URL: &str = inkline_core::defaults::OLLAMA_URL;

/// Default generation model.
pub const DEFAULT_GEN_MODEL: &str = inkline_core::defaults::GEN_MODEL;

/// Timeout for classification requests (seconds).
pub const GEN_TIMEOUT_SECS: u64 = inkline_core::defaults::GEN_TIMEOUT_SECS;

/// Ollama-backed fallback classifier.
pub struct OllamaFallback {
    client: Client,
    base_url: String,
    model: String,
}

impl OllamaFallback {
    /// Create a new Ollama fallback with default settings.
    pub fn new() -> Self {
        Self::with_config(DEFAULT_OLLAMA_URL.to_string(), DEFAULT_GEN_MODEL.to_string())
    }

    /// Create a new Ollama fallback with custom configuration.
    pub fn with_config(base_url: String, model: String) -> Self {
        let timeout_secs = std::env::var("INKLINE_GEN_TIMEOUT_SECS")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .unwrap_or(GEN_TIMEOUT_SECS);

        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .expect("Failed to create HTTP client");

        info!(
            "Initializing Ollama fallback: url={}, model={}",
            base_url, model
        );

        Self {
            client,
            base_url,
            model,
        }
    }

    /// Create from environment variables.
    pub fn from_env() -> Self {
        let base_url = std::env::var("OLLAMA_BASE")
            .or_else(|_| std::env::var("OLLAMA_URL"))
            .unwrap_or_else(|_| DEFAULT_OLLAMA_URL.to_string());
        let model = std::env::var("INKLINE_GEN_MODEL")
            .or_else(|_| std::env::var("OLLAMA_GEN_MODEL"))
            .unwrap_or_else(|_| DEFAULT_GEN_MODEL.to_string());

        Self::with_config(base_url, model)
    }
}

impl Default for OllamaFallback {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Serialize)]
struct OllamaGenerateRequest {
    model: String,
    prompt: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    images: Vec<String>, // base64 encoded
    stream: bool,
}

#[derive(Deserialize)]
struct OllamaGenerateResponse {
    response: String,
}

#[async_trait]
impl FallbackClassifier for OllamaFallback {
    async fn classify_remote(&self, request: FallbackRequest<'_>) -> Result<FallbackOutcome> {
        use base64::Engine;

        let prompt = classification_prompt(request.content, request.known_tags);

        // The image is opaque to the core; it is forwarded here untouched.
        let images = request
            .image
            .map(|handle| vec![base64::engine::general_purpose::STANDARD.encode(&handle.data)])
            .unwrap_or_default();

        let payload = OllamaGenerateRequest {
            model: self.model.clone(),
            prompt,
            images,
            stream: false,
        };

        debug!(
            model = %self.model,
            prompt_len = payload.prompt.len(),
            "Sending fallback classification request"
        );

        let started = Instant::now();
        let response = self
            .client
            .post(format!("{}/api/generate", self.base_url))
            .json(&payload)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            warn!(status = %status, "Ollama returned non-success status");
            return Err(Error::Inference(format!(
                "Ollama request failed with {}: {}",
                status, body
            )));
        }

        let body: OllamaGenerateResponse = response.json().await?;
        let outcome = parse_classification_response(&body.response)?;

        debug!(
            note_type = %outcome.note_type,
            confidence = outcome.confidence,
            duration_ms = started.elapsed().as_millis() as u64,
            "Fallback classification parsed"
        );

        Ok(outcome)
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}
