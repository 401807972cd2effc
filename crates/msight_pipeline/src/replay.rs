//! Feedback replay engine.
//!
//! Re-executes a single stage of a completed run with human feedback merged
//! into its input. Stages before the target keep their outputs; stages after
//! it are not re-run either.
//!
//! Replay is **not idempotent**: generation is nondeterministic, so replaying
//! the same stage with the same feedback twice may produce different text.

use crate::prompt::{FEEDBACK_KEY, task_prompt};
use crate::StageRunner;
use msight_core::{FeedbackEvent, Message, PipelineResult, RefinedOutput, StageId};
use msight_error::{MsightResult, ReplayTargetNotFoundError};
use msight_interface::GenerationDriver;
use serde_json::Value as JsonValue;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{info, instrument};

/// Replays stages of a prior run through a shared [`StageRunner`].
pub struct ReplayEngine<D: GenerationDriver> {
    runner: Arc<StageRunner<D>>,
}

impl<D: GenerationDriver> Clone for ReplayEngine<D> {
    fn clone(&self) -> Self {
        Self {
            runner: Arc::clone(&self.runner),
        }
    }
}

impl<D: GenerationDriver> ReplayEngine<D> {
    /// Create an engine that executes through `runner`.
    pub fn new(runner: Arc<StageRunner<D>>) -> Self {
        Self { runner }
    }

    /// The runner used for re-execution.
    pub fn runner(&self) -> &StageRunner<D> {
        &self.runner
    }

    /// Re-execute the task `target` of `prior` with `feedback` added to its
    /// input under the `feedback` key.
    ///
    /// The generation call sees the task's previous prompt and output as
    /// history before the revised prompt. `prior` is left untouched; the
    /// returned result differs from it only in the target task's input and
    /// output.
    ///
    /// # Errors
    ///
    /// `ReplayTargetNotFoundError` if `target` is not a task of `prior`
    /// (checked before anything else, whatever the feedback), and
    /// `StageExecutionError` under the same conditions as a normal run.
    #[instrument(
        skip(self, prior, feedback, cancel),
        fields(target = %target, feedback_len = feedback.len())
    )]
    pub async fn replay(
        &self,
        prior: &PipelineResult,
        target: &StageId,
        feedback: &str,
        cancel: &CancellationToken,
    ) -> MsightResult<PipelineResult> {
        let original = prior
            .task(target)
            .ok_or_else(|| ReplayTargetNotFoundError::new(target.to_string()))?;

        let spec = self.runner.spec_for(original)?;
        let mut history = Vec::with_capacity(2);
        if let Some(output) = original.output() {
            history.push(Message::user(task_prompt(spec.task(), original.input())));
            history.push(Message::assistant(output.clone()));
        }

        let mut revised_task = original.clone();
        revised_task.merge_input(FEEDBACK_KEY, JsonValue::String(feedback.to_string()));

        let output = self.runner.execute(&revised_task, &history, cancel).await?;
        revised_task.complete(output);

        let mut revised = prior.clone();
        if let Some(slot) = revised.task_mut(target) {
            *slot = revised_task;
        }

        info!(stage = %original.kind(), "Replay complete");
        Ok(revised)
    }

    /// Consume a feedback event, returning the revised run and the refined
    /// output of the targeted stage.
    pub async fn apply(
        &self,
        prior: &PipelineResult,
        event: FeedbackEvent,
        cancel: &CancellationToken,
    ) -> MsightResult<(PipelineResult, RefinedOutput)> {
        let revised = self
            .replay(prior, event.stage_id(), event.text(), cancel)
            .await?;

        let text = revised
            .task(event.stage_id())
            .and_then(|task| task.output().clone())
            .ok_or_else(|| ReplayTargetNotFoundError::new(event.stage_id().to_string()))?;

        Ok((revised, RefinedOutput::new(*event.stage_id(), text)))
    }
}
