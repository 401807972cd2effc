//! Human feedback and the refined output it produces.

use crate::StageId;
use serde::{Deserialize, Serialize};

/// Feedback submitted by the user against one stage task.
///
/// Consumed exactly once by the replay engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, derive_getters::Getters)]
pub struct FeedbackEvent {
    /// Task the feedback targets
    stage_id: StageId,
    /// Feedback text as typed by the user
    text: String,
}

impl FeedbackEvent {
    /// Create a feedback event for a stage.
    pub fn new(stage_id: StageId, text: impl Into<String>) -> Self {
        Self {
            stage_id,
            text: text.into(),
        }
    }
}

/// Revised output of a stage after a feedback replay.
///
/// Stored alongside the original task; the original task is never mutated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, derive_getters::Getters)]
pub struct RefinedOutput {
    /// Task that was replayed
    stage_id: StageId,
    /// Regenerated text
    text: String,
}

impl RefinedOutput {
    /// Create a refined output for a stage.
    pub fn new(stage_id: StageId, text: impl Into<String>) -> Self {
        Self {
            stage_id,
            text: text.into(),
        }
    }
}
