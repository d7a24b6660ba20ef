//! Remote transcription backend for a Gemini-compatible `generateContent` API.
//!
//! `GeminiTranscriber` sends the video URL inside a single-turn prompt and
//! extracts the transcript from the first candidate of the response.  All
//! connection details (`base_url`, `api_key`, `model`, `timeout_secs`) come
//! from [`ServiceConfig`]; nothing is hardcoded.

use async_trait::async_trait;

use crate::config::ServiceConfig;

use super::{TranscribeError, TranscriptionService};

// ---------------------------------------------------------------------------
// GeminiTranscriber
// ---------------------------------------------------------------------------

/// Calls a Gemini-compatible `models/{model}:generateContent` endpoint.
///
/// The `x-goog-api-key` header is attached **only** when `config.api_key` is
/// `Some(key)` and `key` is non-empty, so a key-less proxy deployment works
/// unchanged.
pub struct GeminiTranscriber {
    client: reqwest::Client,
    config: ServiceConfig,
}

impl GeminiTranscriber {
    /// Build a `GeminiTranscriber` from application config.
    ///
    /// The HTTP client is pre-configured with the per-request timeout from
    /// `config.timeout_secs`.  A default (no-timeout) client is used as a
    /// last-resort fallback if the builder fails (should never happen in
    /// practice).
    pub fn from_config(config: &ServiceConfig) -> Self {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()
            .unwrap_or_else(|e| {
                log::warn!("service: client builder failed ({e}); falling back to a client without the configured {} s timeout", config.timeout_secs);
                reqwest::Client::new()
            });

        Self {
            client,
            config: config.clone(),
        }
    }

    /// Build the `generateContent` request body for `url`.
    fn request_body(url: &str) -> serde_json::Value {
        serde_json::json!({
            "contents": [{
                "parts": [{
                    "text": format!(
                        "Transcribe the spoken audio of the video at this link verbatim. \
                         Return only the transcript text, with no commentary: {url}"
                    )
                }]
            }]
        })
    }
}

#[async_trait]
impl TranscriptionService for GeminiTranscriber {
    /// One asynchronous round trip; any failure maps to [`TranscribeError`]
    /// with the remote message passed through when one is present.
    async fn transcribe(&self, url: &str) -> Result<String, TranscribeError> {
        let endpoint = format!(
            "{}/v1beta/models/{}:generateContent",
            self.config.base_url, self.config.model
        );

        let mut req = self.client.post(&endpoint).json(&Self::request_body(url));

        // Attach the API key header only when the key is a non-empty string.
        let key = self.config.api_key.as_deref().unwrap_or("");
        if !key.is_empty() {
            req = req.header("x-goog-api-key", key);
        }

        log::debug!("service: POST {endpoint}");
        let response = req.send().await?;
        let status = response.status();

        let json: serde_json::Value = response
            .json()
            .await
            .map_err(|e| TranscribeError::new(format!("failed to parse response: {e}")))?;

        if !status.is_success() {
            return Err(remote_error(&json, status));
        }

        extract_transcript(&json)
    }
}

// ---------------------------------------------------------------------------
// Response parsing helpers
// ---------------------------------------------------------------------------

/// Pull the transcript text out of a successful `generateContent` response.
fn extract_transcript(json: &serde_json::Value) -> Result<String, TranscribeError> {
    let text = json["candidates"][0]["content"]["parts"][0]["text"]
        .as_str()
        .ok_or_else(TranscribeError::unspecified)?
        .trim()
        .to_string();

    if text.is_empty() {
        return Err(TranscribeError::unspecified());
    }

    Ok(text)
}

/// Convert a non-2xx response body into an error, preferring the remote
/// `error.message` when present.
fn remote_error(json: &serde_json::Value, status: reqwest::StatusCode) -> TranscribeError {
    match json["error"]["message"].as_str().filter(|m| !m.is_empty()) {
        Some(message) => TranscribeError::new(message),
        None => TranscribeError::new(format!("remote service returned HTTP {status}")),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
