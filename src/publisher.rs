//! Publishing: metadata shaping and upload.

use std::sync::Arc;

use bytes::Bytes;

use crate::config::Visibility;
use crate::error::PipelineError;
use crate::services::{VideoHost, VideoMetadata};

/// Maximum title length accepted by the host.
pub const MAX_TITLE_LEN: usize = 95;
/// Maximum description length accepted by the host.
pub const MAX_DESCRIPTION_LEN: usize = 4800;

/// Formats upload metadata and submits the video to the host.
///
/// The host enforces hard length limits; oversized titles and descriptions
/// are truncated silently rather than rejected.
pub struct Publisher {
    host: Arc<dyn VideoHost>,
    visibility: Visibility,
}

impl Publisher {
    pub fn new(host: Arc<dyn VideoHost>, visibility: Visibility) -> Self {
        Self { host, visibility }
    }

    /// Upload the video, returning the canonical watch URL.
    pub async fn publish(
        &self,
        video: Bytes,
        title: &str,
        description: &str,
        tags: Vec<String>,
    ) -> Result<String, PipelineError> {
        let metadata = VideoMetadata {
            title: truncate_chars(title, MAX_TITLE_LEN),
            description: truncate_chars(description, MAX_DESCRIPTION_LEN),
            tags,
            visibility: self.visibility,
        };

        tracing::info!(
            "Publishing \"{}\" ({} bytes, {})",
            metadata.title,
            video.len(),
            metadata.visibility.as_str()
        );

        let id = self
            .host
            .upload(video, &metadata)
            .await
            .map_err(|e| PipelineError::Publish(e.to_string()))?;

        match id {
            Some(id) if !id.is_empty() => Ok(watch_url(&id)),
            _ => Err(PipelineError::Publish(
                "host accepted the upload but returned no video id".to_string(),
            )),
        }
    }
}

/// Canonical watch URL for a published video id.
pub fn watch_url(id: &str) -> String {
    format!("https://www.youtube.com/watch?v={}", id)
}

/// Truncate to at most `max` characters, never splitting a scalar value.
fn truncate_chars(s: &str, max: usize) -> String {
    s.chars().take(max).collect()
}
