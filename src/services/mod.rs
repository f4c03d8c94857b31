//! External service contracts and their production clients.
//!
//! The orchestrator only sees the traits in this module; the reqwest-backed
//! implementations live in the submodules so tests can substitute mocks.

pub mod openai;
pub mod youtube;

pub use openai::OpenAiClient;
pub use youtube::YouTubeClient;

use crate::config::Visibility;
use anyhow::Result;
use bytes::Bytes;

/// One role-tagged message in a text-generation prompt.
#[derive(Debug, Clone, serde::Serialize)]
pub struct ChatMessage {
    pub role: &'static str,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: "system",
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user",
            content: content.into(),
        }
    }
}

/// Metadata submitted alongside a video upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VideoMetadata {
    pub title: String,
    pub description: String,
    pub tags: Vec<String>,
    pub visibility: Visibility,
}

/// Text-generation service.
#[async_trait::async_trait]
pub trait ScriptService: Send + Sync {
    /// Generate text from role-tagged prompt messages. May return an empty
    /// string; callers decide whether that is an error.
    async fn complete(&self, messages: &[ChatMessage]) -> Result<String>;
}

/// Speech-synthesis service.
#[async_trait::async_trait]
pub trait SpeechService: Send + Sync {
    /// Synthesize narration audio for the given text.
    async fn synthesize(&self, text: &str) -> Result<Bytes>;
}

/// Image-generation service.
#[async_trait::async_trait]
pub trait ImageService: Send + Sync {
    /// Generate an image for the given prompt, or `None` when the service
    /// responds successfully but without a payload.
    async fn generate(&self, prompt: &str, size: &str) -> Result<Option<Bytes>>;
}

/// Video publishing service.
#[async_trait::async_trait]
pub trait VideoHost: Send + Sync {
    /// Upload a video with its metadata, returning the host's identifier,
    /// or `None` when the host accepts the call without assigning one.
    async fn upload(&self, video: Bytes, metadata: &VideoMetadata) -> Result<Option<String>>;
}
