//! OpenAI-backed text, speech, and image clients.
//!
//! One HTTP client serves all three contracts: chat completions for script
//! text, the speech endpoint for narration audio, and the images endpoint
//! for the still frame (returned base64-encoded and decoded here).

use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use base64::Engine as _;
use bytes::Bytes;
use serde::Deserialize;

use crate::config::OpenAiConfig;
use crate::services::{ChatMessage, ImageService, ScriptService, SpeechService};

/// Request timeout; speech and image synthesis are slow endpoints.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(120);

// ---------------------------------------------------------------------------
// API response types (private)
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChatChoiceMessage {
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ImagesResponse {
    data: Option<Vec<ImageDatum>>,
}

#[derive(Debug, Deserialize)]
struct ImageDatum {
    b64_json: Option<String>,
}

// ---------------------------------------------------------------------------
// Client
// ---------------------------------------------------------------------------

/// Client for the OpenAI-style text, speech, and image endpoints.
pub struct OpenAiClient {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
    model: String,
    voice: String,
}

impl OpenAiClient {
    pub fn new(config: &OpenAiConfig) -> Self {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .unwrap_or_else(|e| {
                tracing::warn!("Failed to build HTTP client with timeout: {}", e);
                reqwest::Client::new()
            });

        Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone().unwrap_or_default(),
            model: config.model.clone(),
            voice: config.voice.clone(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn post_json(&self, path: &str, body: serde_json::Value) -> Result<reqwest::Response> {
        let response = self
            .client
            .post(self.url(path))
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .with_context(|| format!("Request to {} failed", path))?;

        if !response.status().is_success() {
            let status = response.status();
            let error = response.text().await.unwrap_or_default();
            anyhow::bail!("{} returned {}: {}", path, status, error);
        }
        Ok(response)
    }
}

#[async_trait]
impl ScriptService for OpenAiClient {
    async fn complete(&self, messages: &[ChatMessage]) -> Result<String> {
        let body = serde_json::json!({
            "model": self.model,
            "messages": messages,
        });

        let response = self.post_json("/chat/completions", body).await?;
        let completion: ChatCompletionResponse = response
            .json()
            .await
            .context("Failed to parse chat completion response")?;

        let text = completion
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .unwrap_or_default();

        tracing::debug!("Chat completion returned {} chars", text.len());
        Ok(text.trim().to_string())
    }
}

#[async_trait]
impl SpeechService for OpenAiClient {
    async fn synthesize(&self, text: &str) -> Result<Bytes> {
        let body = serde_json::json!({
            "model": "tts-1",
            "voice": self.voice,
            "input": text,
        });

        let response = self.post_json("/audio/speech", body).await?;
        let audio = response
            .bytes()
            .await
            .context("Failed to read speech response body")?;

        tracing::debug!("Speech synthesis returned {} bytes", audio.len());
        Ok(audio)
    }
}

#[async_trait]
impl ImageService for OpenAiClient {
    async fn generate(&self, prompt: &str, size: &str) -> Result<Option<Bytes>> {
        let body = serde_json::json!({
            "prompt": prompt,
            "n": 1,
            "size": size,
            "response_format": "b64_json",
        });

        let response = self.post_json("/images/generations", body).await?;
        let images: ImagesResponse = response
            .json()
            .await
            .context("Failed to parse image generation response")?;

        let encoded = match images
            .data
            .and_then(|mut data| data.drain(..).next())
            .and_then(|d| d.b64_json)
        {
            Some(encoded) if !encoded.is_empty() => encoded,
            _ => {
                tracing::warn!("Image service returned no payload");
                return Ok(None);
            }
        };

        let decoded = base64::engine::general_purpose::STANDARD
            .decode(encoded.as_bytes())
            .context("Image payload is not valid base64")?;

        tracing::debug!("Image generation returned {} bytes", decoded.len());
        Ok(Some(Bytes::from(decoded)))
    }
}
