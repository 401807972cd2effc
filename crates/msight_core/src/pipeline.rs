//! The ordered outcome of one pipeline run.

use crate::{StageId, StageKind, StageTask};
use serde::{Deserialize, Serialize};

/// Ordered stage tasks of a pipeline run (Analyze, Draft, DetectGaps).
///
/// Tasks are addressed by [`StageId`]; the positional accessors exist only to
/// iterate in execution order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PipelineResult {
    tasks: Vec<StageTask>,
}

impl PipelineResult {
    /// Wrap an ordered list of tasks.
    pub fn new(tasks: Vec<StageTask>) -> Self {
        Self { tasks }
    }

    /// Tasks in execution order.
    pub fn tasks(&self) -> &[StageTask] {
        &self.tasks
    }

    /// Number of tasks in the run.
    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    /// True when the run holds no tasks.
    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Look up a task by identifier.
    pub fn task(&self, id: &StageId) -> Option<&StageTask> {
        self.tasks.iter().find(|task| task.id() == id)
    }

    /// Mutable lookup by identifier.
    pub fn task_mut(&mut self, id: &StageId) -> Option<&mut StageTask> {
        self.tasks.iter_mut().find(|task| task.id() == id)
    }

    /// First task running the given stage kind.
    pub fn by_kind(&self, kind: StageKind) -> Option<&StageTask> {
        self.tasks.iter().find(|task| *task.kind() == kind)
    }

    /// The Draft task, the decision point for human feedback.
    pub fn draft(&self) -> Option<&StageTask> {
        self.by_kind(StageKind::Draft)
    }

    /// True when every task has completed.
    pub fn is_complete(&self) -> bool {
        !self.tasks.is_empty() && self.tasks.iter().all(StageTask::is_complete)
    }
}
