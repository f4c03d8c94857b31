//! Pipeline orchestration.
//!
//! The orchestrator drives the four stages in fixed order: script draft,
//! enhancement, asset synthesis plus video assembly, upload. Each stage is
//! bracketed by tracker updates, and any stage failure is attributed to the
//! stage that was active and converted into a uniform response that still
//! carries the full stage log.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::composer::{MediaComposer, VideoComposer};
use crate::config::Config;
use crate::error::PipelineError;
use crate::publisher::Publisher;
use crate::services::{
    ChatMessage, ImageService, OpenAiClient, ScriptService, SpeechService, VideoHost,
    YouTubeClient,
};
use crate::synthesizer::AssetSynthesizer;
use crate::tracker::{
    Stage, StageStatus, StepTracker, STAGE_ENHANCE, STAGE_SCRIPT, STAGE_UPLOAD, STAGE_VIDEO,
};

/// Validated pipeline input.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PipelineRequest {
    pub topic: String,
    pub tone: String,
    pub duration_seconds: u32,
    pub audience: String,
    pub call_to_action: String,
}

impl PipelineRequest {
    /// Schema-check the request. Rejected requests never enter the pipeline.
    pub fn validate(&self) -> Result<(), PipelineError> {
        check_len("topic", &self.topic, 8, usize::MAX)?;
        check_len("tone", &self.tone, 3, 64)?;
        if !(30..=900).contains(&self.duration_seconds) {
            return Err(PipelineError::Validation(format!(
                "durationSeconds must be between 30 and 900, got {}",
                self.duration_seconds
            )));
        }
        check_len("audience", &self.audience, 3, 120)?;
        check_len("callToAction", &self.call_to_action, 3, 180)?;
        Ok(())
    }
}

fn check_len(field: &str, value: &str, min: usize, max: usize) -> Result<(), PipelineError> {
    let len = value.trim().chars().count();
    if len < min {
        return Err(PipelineError::Validation(format!(
            "{} must be at least {} characters",
            field, min
        )));
    }
    if len > max {
        return Err(PipelineError::Validation(format!(
            "{} must be at most {} characters",
            field, max
        )));
    }
    Ok(())
}

/// Artifacts of a successful run.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PipelineResult {
    pub script_draft: String,
    pub enhanced_script: String,
    /// Size in bytes of the rendered video.
    pub video_asset: u64,
    pub published_url: String,
}

/// Uniform response for both outcomes; `log` always carries all four stages.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<PipelineResult>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub log: Vec<Stage>,
}

/// Tracker plus an explicit pointer to the stage currently working.
///
/// Failure attribution uses the pointer rather than scanning for a
/// `working` status, so it stays unambiguous if stages ever overlap.
struct RunState {
    tracker: StepTracker,
    current: Option<&'static str>,
}

impl RunState {
    fn new() -> Self {
        Self {
            tracker: StepTracker::new(),
            current: None,
        }
    }

    fn begin(&mut self, id: &'static str) {
        tracing::info!("Stage {} started", id);
        self.current = Some(id);
        self.tracker.update(id, StageStatus::Working, None);
    }

    fn finish(&mut self, detail: String) {
        if let Some(id) = self.current.take() {
            tracing::info!("Stage {} done: {}", id, detail);
            self.tracker.update(id, StageStatus::Done, Some(detail));
        }
    }

    fn fail(mut self, error: &PipelineError) -> PipelineResponse {
        if let Some(id) = self.current.take() {
            tracing::error!("Stage {} failed: {}", id, error);
            self.tracker
                .update(id, StageStatus::Error, Some(error.to_string()));
        }
        PipelineResponse {
            success: false,
            result: None,
            error: Some(error.to_string()),
            log: self.tracker.into_stages(),
        }
    }

    /// Abort before any stage started; the log stays all-idle.
    fn abort(self, error: &PipelineError) -> PipelineResponse {
        debug_assert!(error.is_precondition());
        tracing::warn!("Run rejected: {}", error);
        PipelineResponse {
            success: false,
            result: None,
            error: Some(error.to_string()),
            log: self.tracker.into_stages(),
        }
    }

    fn succeed(self, result: PipelineResult) -> PipelineResponse {
        PipelineResponse {
            success: true,
            result: Some(result),
            error: None,
            log: self.tracker.into_stages(),
        }
    }
}

/// Top-level controller for one pipeline run per call.
///
/// Holds only shared, immutable collaborators; all per-run state lives in
/// the [`RunState`] constructed inside [`PipelineOrchestrator::run`], so
/// concurrent requests cannot interfere.
pub struct PipelineOrchestrator {
    script: Arc<dyn ScriptService>,
    synthesizer: AssetSynthesizer,
    composer: Arc<dyn VideoComposer>,
    publisher: Publisher,
    config: Arc<Config>,
}

impl PipelineOrchestrator {
    /// Wire up the production clients from configuration.
    pub fn from_config(config: Arc<Config>) -> Self {
        let openai = Arc::new(OpenAiClient::new(&config.openai));
        let host = Arc::new(YouTubeClient::new(&config.youtube));
        Self::new(
            openai.clone(),
            openai.clone(),
            openai,
            Arc::new(MediaComposer::new()),
            host,
            config,
        )
    }

    /// Construct with explicit collaborators (used by tests).
    pub fn new(
        script: Arc<dyn ScriptService>,
        speech: Arc<dyn SpeechService>,
        image: Arc<dyn ImageService>,
        composer: Arc<dyn VideoComposer>,
        host: Arc<dyn VideoHost>,
        config: Arc<Config>,
    ) -> Self {
        let synthesizer = AssetSynthesizer::new(speech, image, config.openai.image_size.clone());
        let publisher = Publisher::new(host, config.youtube.default_visibility);
        Self {
            script,
            synthesizer,
            composer,
            publisher,
            config,
        }
    }

    /// Run the pipeline for one request.
    ///
    /// Always returns a response with all four stages in the log, whatever
    /// the outcome.
    pub async fn run(&self, request: &PipelineRequest) -> PipelineResponse {
        let mut run = RunState::new();

        let missing = self.config.missing_credentials();
        if !missing.is_empty() {
            let error =
                PipelineError::Configuration(format!("missing credentials: {}", missing.join(", ")));
            return run.abort(&error);
        }

        if let Err(error) = request.validate() {
            return run.abort(&error);
        }

        match self.execute(request, &mut run).await {
            Ok(result) => run.succeed(result),
            Err(error) => run.fail(&error),
        }
    }

    async fn execute(
        &self,
        request: &PipelineRequest,
        run: &mut RunState,
    ) -> Result<PipelineResult, PipelineError> {
        // Stage 1: draft the narration
        run.begin(STAGE_SCRIPT);
        let draft = self
            .script
            .complete(&draft_messages(request))
            .await
            .map_err(|e| PipelineError::ScriptGeneration(e.to_string()))?;
        if draft.is_empty() {
            return Err(PipelineError::ScriptGeneration(
                "text service returned an empty draft".to_string(),
            ));
        }
        run.finish(format!("{} words", word_count(&draft)));

        // Stage 2: stylistic enhancement
        run.begin(STAGE_ENHANCE);
        let enhanced = self
            .script
            .complete(&enhance_messages(request, &draft))
            .await
            .map_err(|e| PipelineError::ScriptEnhancement(e.to_string()))?;
        if enhanced.is_empty() {
            return Err(PipelineError::ScriptEnhancement(
                "text service returned an empty enhancement".to_string(),
            ));
        }
        run.finish(format!("{} words", word_count(&enhanced)));

        // Stage 3: synthesize assets, then assemble the video
        run.begin(STAGE_VIDEO);
        let assets = self.synthesizer.synthesize(&enhanced, &request.topic).await?;
        let video = self.composer.render(assets).await?;
        let video_size = video.len() as u64;
        run.finish(format!("{:.1} MB", video_size as f64 / (1024.0 * 1024.0)));

        // Stage 4: publish
        run.begin(STAGE_UPLOAD);
        let title = build_title(request);
        let description = build_description(request, &enhanced);
        let url = self
            .publisher
            .publish(video, &title, &description, build_tags(request))
            .await?;
        run.finish(url.clone());

        Ok(PipelineResult {
            script_draft: draft,
            enhanced_script: enhanced,
            video_asset: video_size,
            published_url: url,
        })
    }
}

fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

fn draft_messages(request: &PipelineRequest) -> Vec<ChatMessage> {
    // Spoken narration runs at roughly two words per second.
    let target_words = request.duration_seconds * 2;
    vec![
        ChatMessage::system(
            "You are a professional scriptwriter for narrated short videos. \
             Respond with the narration text only, no headings or stage directions.",
        ),
        ChatMessage::user(format!(
            "Write the narration for a {}-second video about \"{}\". \
             Tone: {}. Audience: {}. Aim for about {} words.",
            request.duration_seconds, request.topic, request.tone, request.audience, target_words
        )),
    ]
}

fn enhance_messages(request: &PipelineRequest, draft: &str) -> Vec<ChatMessage> {
    vec![
        ChatMessage::system(
            "You are a script editor. Improve flow and word choice without \
             changing the meaning or the approximate length. Respond with the \
             revised narration text only.",
        ),
        ChatMessage::user(format!(
            "Revise this narration, keeping a {} tone for {}. \
             End with a natural lead-in to: \"{}\".\n\n{}",
            request.tone, request.audience, request.call_to_action, draft
        )),
    ]
}

fn build_title(request: &PipelineRequest) -> String {
    format!("{} | {}", request.topic, request.tone)
}

fn build_description(request: &PipelineRequest, enhanced: &str) -> String {
    format!(
        "{}\n\n{}\n\nFor: {}\n\nCreated with Vidforge.",
        enhanced, request.call_to_action, request.audience
    )
}

fn build_tags(request: &PipelineRequest) -> Vec<String> {
    let mut tags: Vec<String> = request
        .topic
        .split_whitespace()
        .filter(|w| w.chars().count() > 2)
        .take(5)
        .map(|w| w.to_lowercase())
        .collect();
    let tone = request.tone.to_lowercase();
    if !tags.contains(&tone) {
        tags.push(tone);
    }
    tags
}
