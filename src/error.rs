//! Pipeline error taxonomy.
//!
//! Each variant is owned by exactly one point in the run: `Configuration`
//! and `Validation` are reported before any stage starts; the remaining
//! variants are attributed to the stage that was active when they were
//! raised.

/// Result type alias using our error type.
pub type Result<T> = std::result::Result<T, PipelineError>;

/// Errors that can occur during a pipeline run.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    /// A required credential or setting is missing.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// The request failed schema validation.
    #[error("invalid request: {0}")]
    Validation(String),

    /// The text service produced no usable draft.
    #[error("script generation failed: {0}")]
    ScriptGeneration(String),

    /// The text service produced no usable enhancement.
    #[error("script enhancement failed: {0}")]
    ScriptEnhancement(String),

    /// Speech or image synthesis failed or returned an empty asset.
    #[error("asset generation failed: {0}")]
    AssetGeneration(String),

    /// Muxing the assets into a video failed.
    #[error("video rendering failed: {0}")]
    VideoRender(String),

    /// The publishing service rejected the upload or returned no identifier.
    #[error("publishing failed: {0}")]
    Publish(String),
}

impl PipelineError {
    /// Whether the error occurred before any stage was attempted.
    pub fn is_precondition(&self) -> bool {
        matches!(
            self,
            PipelineError::Configuration(_) | PipelineError::Validation(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_precondition_errors() {
        assert!(PipelineError::Configuration("missing key".to_string()).is_precondition());
        assert!(PipelineError::Validation("topic too short".to_string()).is_precondition());
    }

    #[test]
    fn test_stage_errors_are_not_preconditions() {
        let stage_errors = [
            PipelineError::ScriptGeneration("empty".to_string()),
            PipelineError::ScriptEnhancement("empty".to_string()),
            PipelineError::AssetGeneration("no payload".to_string()),
            PipelineError::VideoRender("mux failed".to_string()),
            PipelineError::Publish("no id".to_string()),
        ];
        assert!(stage_errors.iter().all(|e| !e.is_precondition()));
    }
}
