//! Concurrent audio/image synthesis for the video stage.

use std::sync::Arc;

use bytes::Bytes;

use crate::error::PipelineError;
use crate::services::{ImageService, SpeechService};

/// Paired binary assets consumed by video composition.
///
/// Both members are required and non-empty; no partial-asset state exists.
#[derive(Debug, Clone)]
pub struct AssetPair {
    pub audio: Bytes,
    pub image: Bytes,
}

/// Runs speech and image synthesis concurrently for one stage.
///
/// The two requests are independent and both latency-bound, so they are
/// issued together and joined with first-error-wins semantics: if either
/// fails, the sibling's result is discarded and no partial asset escapes.
pub struct AssetSynthesizer {
    speech: Arc<dyn SpeechService>,
    image: Arc<dyn ImageService>,
    image_size: String,
}

impl AssetSynthesizer {
    pub fn new(
        speech: Arc<dyn SpeechService>,
        image: Arc<dyn ImageService>,
        image_size: String,
    ) -> Self {
        Self {
            speech,
            image,
            image_size,
        }
    }

    /// Synthesize narration audio and a still frame for the given script.
    pub async fn synthesize(&self, narration: &str, topic: &str) -> Result<AssetPair, PipelineError> {
        let prompt = image_prompt(topic);

        let (audio, image) = tokio::try_join!(
            async {
                self.speech
                    .synthesize(narration)
                    .await
                    .map_err(|e| PipelineError::AssetGeneration(format!("speech: {}", e)))
            },
            async {
                self.image
                    .generate(&prompt, &self.image_size)
                    .await
                    .map_err(|e| PipelineError::AssetGeneration(format!("image: {}", e)))
            },
        )?;

        if audio.is_empty() {
            return Err(PipelineError::AssetGeneration(
                "speech service returned empty audio".to_string(),
            ));
        }

        let image = match image {
            Some(image) if !image.is_empty() => image,
            _ => {
                return Err(PipelineError::AssetGeneration(
                    "image service returned no payload".to_string(),
                ))
            }
        };

        tracing::debug!(
            "Synthesized assets: {} audio bytes, {} image bytes",
            audio.len(),
            image.len()
        );

        Ok(AssetPair { audio, image })
    }
}

fn image_prompt(topic: &str) -> String {
    format!(
        "A single striking illustration for a video about: {}. \
         No text or lettering, suitable as a full-frame video background.",
        topic
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Result;
    use assert_matches::assert_matches;
    use async_trait::async_trait;

    struct FixedSpeech(Vec<u8>);

    #[async_trait]
    impl SpeechService for FixedSpeech {
        async fn synthesize(&self, _text: &str) -> Result<Bytes> {
            Ok(Bytes::from(self.0.clone()))
        }
    }

    struct FixedImage(Option<Vec<u8>>);

    #[async_trait]
    impl ImageService for FixedImage {
        async fn generate(&self, _prompt: &str, _size: &str) -> Result<Option<Bytes>> {
            Ok(self.0.clone().map(Bytes::from))
        }
    }

    struct FailingSpeech;

    #[async_trait]
    impl SpeechService for FailingSpeech {
        async fn synthesize(&self, _text: &str) -> Result<Bytes> {
            anyhow::bail!("quota exceeded")
        }
    }

    fn synthesizer(
        speech: impl SpeechService + 'static,
        image: impl ImageService + 'static,
    ) -> AssetSynthesizer {
        AssetSynthesizer::new(Arc::new(speech), Arc::new(image), "1024x1024".to_string())
    }

    #[tokio::test]
    async fn test_both_assets_returned() {
        let synth = synthesizer(FixedSpeech(vec![1, 2, 3]), FixedImage(Some(vec![4, 5])));
        let pair = synth.synthesize("narration", "bridges").await.unwrap();
        assert_eq!(pair.audio.as_ref(), &[1, 2, 3]);
        assert_eq!(pair.image.as_ref(), &[4, 5]);
    }

    #[tokio::test]
    async fn test_absent_image_fails() {
        let synth = synthesizer(FixedSpeech(vec![1]), FixedImage(None));
        let err = synth.synthesize("narration", "bridges").await.unwrap_err();
        assert_matches!(err, PipelineError::AssetGeneration(_));
        assert!(err.to_string().contains("image"));
    }

    #[tokio::test]
    async fn test_empty_audio_fails() {
        let synth = synthesizer(FixedSpeech(vec![]), FixedImage(Some(vec![1])));
        let err = synth.synthesize("narration", "bridges").await.unwrap_err();
        assert_matches!(err, PipelineError::AssetGeneration(_));
    }

    #[tokio::test]
    async fn test_speech_rejection_discards_image() {
        let synth = synthesizer(FailingSpeech, FixedImage(Some(vec![1])));
        let err = synth.synthesize("narration", "bridges").await.unwrap_err();
        assert!(err.to_string().contains("speech"));
    }
}
