//! Per-run stage tracking.

use serde::{Deserialize, Serialize};

/// Stage id for script drafting.
pub const STAGE_SCRIPT: &str = "script";
/// Stage id for script enhancement.
pub const STAGE_ENHANCE: &str = "enhance";
/// Stage id for asset synthesis and video assembly.
pub const STAGE_VIDEO: &str = "video";
/// Stage id for publishing.
pub const STAGE_UPLOAD: &str = "upload";

/// Canonical stage descriptors, in execution order.
///
/// Immutable template cloned fresh for every run so concurrent requests
/// can never observe each other's progress.
const STAGE_DEFS: [(&str, &str); 4] = [
    (STAGE_SCRIPT, "Write script"),
    (STAGE_ENHANCE, "Enhance script"),
    (STAGE_VIDEO, "Generate video"),
    (STAGE_UPLOAD, "Upload video"),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StageStatus {
    Idle,
    Working,
    Done,
    Error,
}

/// One named unit of pipeline work with observable status.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Stage {
    pub id: String,
    pub label: String,
    pub status: StageStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

/// Ordered stage list for a single pipeline run.
///
/// Owned by the orchestrator and mutated only through [`StepTracker::update`],
/// which overwrites status and detail together so no partial update is ever
/// visible.
#[derive(Debug, Clone)]
pub struct StepTracker {
    stages: Vec<Stage>,
}

impl StepTracker {
    /// Create a fresh tracker with all four canonical stages idle.
    pub fn new() -> Self {
        let stages = STAGE_DEFS
            .iter()
            .map(|(id, label)| Stage {
                id: (*id).to_string(),
                label: (*label).to_string(),
                status: StageStatus::Idle,
                detail: None,
            })
            .collect();
        Self { stages }
    }

    /// Update a stage by id, overwriting status and detail atomically.
    ///
    /// Unknown ids are a no-op; a typo must never crash a run.
    pub fn update(&mut self, id: &str, status: StageStatus, detail: Option<String>) {
        if let Some(stage) = self.stages.iter_mut().find(|s| s.id == id) {
            stage.status = status;
            stage.detail = detail;
        }
    }

    /// The ordered stage list.
    pub fn stages(&self) -> &[Stage] {
        &self.stages
    }

    /// Consume the tracker, yielding the stage list for the response log.
    pub fn into_stages(self) -> Vec<Stage> {
        self.stages
    }
}

impl Default for StepTracker {
    fn default() -> Self {
        Self::new()
    }
}
