//! Stage identity and per-run stage tasks.

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use std::collections::BTreeMap;
use std::str::FromStr;
use uuid::Uuid;

/// Stable identifier of a stage task, assigned when the task is created.
///
/// Tasks are always looked up by identifier, never by list position.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
    derive_more::Display,
)]
#[serde(transparent)]
pub struct StageId(Uuid);

impl StageId {
    /// Allocate a fresh random identifier.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for StageId {
    fn default() -> Self {
        Self::new()
    }
}

impl FromStr for StageId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s.trim()).map(Self)
    }
}

/// The three stages of the generation pipeline, in execution order.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    derive_more::Display,
)]
#[serde(rename_all = "snake_case")]
pub enum StageKind {
    /// Summarize the scraped content into key insights
    Analyze,
    /// Draft the video script prompt from the insights
    Draft,
    /// Review the draft and list open questions for a human
    DetectGaps,
}

impl StageKind {
    /// Fixed execution order of a pipeline run.
    pub const ORDER: [StageKind; 3] = [StageKind::Analyze, StageKind::Draft, StageKind::DetectGaps];
}

/// Completion status of a stage task.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::Display,
)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    /// Created but not yet executed
    #[default]
    Pending,
    /// Executed and holding non-empty output
    Complete,
}

/// One labeled unit of work within a pipeline run.
///
/// # Examples
///
/// ```
/// use msight_core::{StageKind, StageTask, TaskStatus};
/// use std::collections::BTreeMap;
///
/// let mut task = StageTask::new(StageKind::Draft, "DraftScript", BTreeMap::new());
/// assert_eq!(*task.status(), TaskStatus::Pending);
///
/// task.complete("A sunrise over the product");
/// assert_eq!(task.output().as_deref(), Some("A sunrise over the product"));
/// assert_eq!(*task.status(), TaskStatus::Complete);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, derive_getters::Getters)]
pub struct StageTask {
    /// Identifier, unique and stable for the session
    id: StageId,
    /// Which pipeline stage this task runs
    kind: StageKind,
    /// Task name (e.g. "DraftScript")
    name: String,
    /// Named input values handed to the generation call
    input: BTreeMap<String, JsonValue>,
    /// Generated text, present once complete
    output: Option<String>,
    /// Completion status
    status: TaskStatus,
}

impl StageTask {
    /// Create a pending task with a freshly allocated identifier.
    pub fn new(kind: StageKind, name: impl Into<String>, input: BTreeMap<String, JsonValue>) -> Self {
        Self {
            id: StageId::new(),
            kind,
            name: name.into(),
            input,
            output: None,
            status: TaskStatus::Pending,
        }
    }

    /// Replace the input mapping before execution.
    pub fn set_input(&mut self, input: BTreeMap<String, JsonValue>) {
        self.input = input;
    }

    /// Add one named field to the input, keeping every existing field.
    pub fn merge_input(&mut self, key: impl Into<String>, value: JsonValue) {
        self.input.insert(key.into(), value);
    }

    /// Record the generated output and mark the task complete.
    pub fn complete(&mut self, output: impl Into<String>) {
        self.output = Some(output.into());
        self.status = TaskStatus::Complete;
    }

    /// True once output has been recorded.
    pub fn is_complete(&self) -> bool {
        self.status == TaskStatus::Complete
    }
}
