//! Serializable view of a session.

use crate::{SessionAction, SessionState};
use msight_core::{ExtractedContent, StageId};
use msight_interface::RenderOutcome;
use serde::{Deserialize, Serialize};

/// What the user interface shows for a session.
///
/// Built from the live session each time, so values discarded by a rewind
/// never appear here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    /// Current state
    pub state: SessionState,
    /// Last submitted URL
    pub url: Option<String>,
    /// Extracted page content
    pub content: Option<ExtractedContent>,
    /// Replay target
    pub draft_task_id: Option<StageId>,
    /// Draft output of the last pipeline run
    pub draft_text: Option<String>,
    /// Gap-detection output, informational
    pub gaps_text: Option<String>,
    /// Last accepted feedback
    pub feedback: Option<String>,
    /// Refined draft
    pub refined_text: Option<String>,
    /// Video request outcome
    pub video: Option<RenderOutcome>,
    /// Actions allowed from the current state
    pub permitted_actions: Vec<SessionAction>,
}
