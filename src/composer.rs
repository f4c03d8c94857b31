//! Video composition: assets in, video buffer out.

use bytes::Bytes;
use vidforge_av::{mux_still_image, MuxOptions, Workspace};

use crate::error::PipelineError;
use crate::synthesizer::AssetPair;

/// Assembles an [`AssetPair`] into a video binary.
///
/// Implementations must not leave any filesystem residue behind, whatever
/// the exit path.
#[async_trait::async_trait]
pub trait VideoComposer: Send + Sync {
    async fn render(&self, assets: AssetPair) -> Result<Bytes, PipelineError>;
}

/// ffmpeg-backed composer.
///
/// Persists the assets into a scoped [`Workspace`], drives the still-image
/// mux, and reads the output back into memory. The workspace is dropped on
/// every exit path, which deletes it; deletion errors are swallowed by the
/// workspace itself and never mask a mux failure.
pub struct MediaComposer {
    options: MuxOptions,
}

impl MediaComposer {
    pub fn new() -> Self {
        Self {
            options: MuxOptions::default(),
        }
    }
}

impl Default for MediaComposer {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl VideoComposer for MediaComposer {
    async fn render(&self, assets: AssetPair) -> Result<Bytes, PipelineError> {
        let options = self.options.clone();

        // The mux shells out to ffmpeg and blocks.
        let video = tokio::task::spawn_blocking(move || -> vidforge_av::Result<Vec<u8>> {
            let workspace = Workspace::new()?;
            let image = workspace.write_file("frame.png", &assets.image)?;
            let audio = workspace.write_file("narration.mp3", &assets.audio)?;
            let output = workspace.file("video.mp4");

            mux_still_image(&image, &audio, &output, &options)?;

            workspace.read_file("video.mp4")
        })
        .await
        .map_err(|e| PipelineError::VideoRender(format!("render task failed: {}", e)))?
        .map_err(|e| PipelineError::VideoRender(e.to_string()))?;

        tracing::info!("Rendered video: {} bytes", video.len());
        Ok(Bytes::from(video))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[tokio::test]
    async fn test_render_with_garbage_assets_fails_cleanly() {
        let composer = MediaComposer::new();
        let assets = AssetPair {
            audio: Bytes::from_static(b"not audio"),
            image: Bytes::from_static(b"not a png"),
        };

        // Fails whether or not ffmpeg is installed; either way the error is
        // attributed to video rendering and nothing is left on disk (the
        // workspace cleanup itself is covered in vidforge-av).
        let err = composer.render(assets).await.unwrap_err();
        assert_matches!(err, PipelineError::VideoRender(_));
    }
}
