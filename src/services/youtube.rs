//! YouTube upload client.
//!
//! Uses the resumable upload protocol: a metadata POST that returns an
//! upload session URL, then a single PUT of the video bytes. The response
//! to the PUT carries the assigned video id; a success without an id is
//! passed through as `None` for the publisher to reject.

use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use bytes::Bytes;
use serde::Deserialize;

use crate::config::YouTubeConfig;
use crate::services::{VideoHost, VideoMetadata};

/// Upload timeout; covers the full video PUT.
const UPLOAD_TIMEOUT: Duration = Duration::from_secs(600);

#[derive(Debug, Deserialize)]
struct UploadResponse {
    id: Option<String>,
}

/// Client for the YouTube Data API resumable upload endpoint.
pub struct YouTubeClient {
    client: reqwest::Client,
    upload_url: String,
    access_token: String,
}

impl YouTubeClient {
    pub fn new(config: &YouTubeConfig) -> Self {
        let client = reqwest::Client::builder()
            .timeout(UPLOAD_TIMEOUT)
            .build()
            .unwrap_or_else(|e| {
                tracing::warn!("Failed to build HTTP client with timeout: {}", e);
                reqwest::Client::new()
            });

        Self {
            client,
            upload_url: config.upload_url.clone(),
            access_token: config.access_token.clone().unwrap_or_default(),
        }
    }

    /// Open a resumable upload session, returning the session URL.
    async fn open_session(&self, video_len: usize, metadata: &VideoMetadata) -> Result<String> {
        let body = serde_json::json!({
            "snippet": {
                "title": metadata.title,
                "description": metadata.description,
                "tags": metadata.tags,
            },
            "status": {
                "privacyStatus": metadata.visibility.as_str(),
            },
        });

        let response = self
            .client
            .post(&self.upload_url)
            .query(&[("uploadType", "resumable"), ("part", "snippet,status")])
            .bearer_auth(&self.access_token)
            .header("X-Upload-Content-Type", "video/mp4")
            .header("X-Upload-Content-Length", video_len.to_string())
            .json(&body)
            .send()
            .await
            .context("Failed to open upload session")?;

        if !response.status().is_success() {
            let status = response.status();
            let error = response.text().await.unwrap_or_default();
            anyhow::bail!("Upload session rejected with {}: {}", status, error);
        }

        let location = response
            .headers()
            .get(reqwest::header::LOCATION)
            .and_then(|v| v.to_str().ok())
            .map(|v| v.to_string())
            .context("Upload session response missing Location header")?;

        Ok(location)
    }
}

#[async_trait]
impl VideoHost for YouTubeClient {
    async fn upload(&self, video: Bytes, metadata: &VideoMetadata) -> Result<Option<String>> {
        let session_url = self.open_session(video.len(), metadata).await?;

        tracing::info!("Uploading {} bytes to YouTube", video.len());

        let response = self
            .client
            .put(&session_url)
            .bearer_auth(&self.access_token)
            .header(reqwest::header::CONTENT_TYPE, "video/mp4")
            .body(video)
            .send()
            .await
            .context("Video upload failed")?;

        if !response.status().is_success() {
            let status = response.status();
            let error = response.text().await.unwrap_or_default();
            anyhow::bail!("Video upload rejected with {}: {}", status, error);
        }

        let uploaded: UploadResponse = response
            .json()
            .await
            .context("Failed to parse upload response")?;

        Ok(uploaded.id)
    }
}
