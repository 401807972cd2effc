//! Generation stage runner.
//!
//! Executes the crew's three stages in order against one generation driver,
//! feeding each stage the previous stage's output.

use crate::prompt::{system_message, task_prompt};
use crate::{Crew, StageSpec};
use msight_core::{
    CallGuard, ExtractedContent, GenerateRequest, Message, ModelSettings, PipelineResult,
    StageKind, StageTask,
};
use msight_error::{
    ConfigError, JsonError, MsightError, MsightResult, StageExecutionError, StageFailure,
};
use msight_interface::GenerationDriver;
use serde_json::Value as JsonValue;
use std::collections::BTreeMap;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, instrument, warn};

/// Input key of the Analyze stage.
pub const CONTENT_KEY: &str = "content";

const DEFAULT_GENERATION_TIMEOUT: Duration = Duration::from_secs(120);

/// Runs the crew's stages against a generation driver.
///
/// No retries happen here; a failed or empty generation halts the run and the
/// whole result is discarded.
pub struct StageRunner<D: GenerationDriver> {
    driver: D,
    crew: Crew,
    model: ModelSettings,
    timeout: Duration,
}

impl<D: GenerationDriver> StageRunner<D> {
    /// Create a runner with default model settings and timeout.
    pub fn new(driver: D, crew: Crew) -> Self {
        Self {
            driver,
            crew,
            model: ModelSettings::default(),
            timeout: DEFAULT_GENERATION_TIMEOUT,
        }
    }

    /// Use these model settings for every stage call.
    pub fn with_model(mut self, model: ModelSettings) -> Self {
        self.model = model;
        self
    }

    /// Bound each stage call by `timeout`.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Get a reference to the driver.
    pub fn driver(&self) -> &D {
        &self.driver
    }

    /// The crew being run.
    pub fn crew(&self) -> &Crew {
        &self.crew
    }

    /// Per-stage generation timeout.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Create the three pending tasks of a run, with the Analyze input set.
    ///
    /// Identifiers are assigned here and stay stable for the run.
    pub fn plan(&self, content: &ExtractedContent) -> MsightResult<PipelineResult> {
        let content = serde_json::to_value(content).map_err(|e| {
            MsightError::from(JsonError::new("extracted content", e.to_string()))
        })?;

        let tasks = self
            .crew
            .stages()
            .iter()
            .map(|stage| {
                let mut input = BTreeMap::new();
                if *stage.kind() == StageKind::Analyze {
                    input.insert(CONTENT_KEY.to_string(), content.clone());
                }
                StageTask::new(*stage.kind(), stage.task().name().clone(), input)
            })
            .collect();

        Ok(PipelineResult::new(tasks))
    }

    /// Run Analyze, Draft and DetectGaps in order.
    ///
    /// Each stage's input maps the previous task's name to its output. The
    /// first failure is returned and later stages are not attempted.
    ///
    /// # Errors
    ///
    /// `StageExecutionError` if a generation call fails, returns blank text,
    /// times out or is cancelled.
    #[instrument(
        skip(self, content, cancel),
        fields(
            crew = self.crew.name(),
            provider = self.driver.provider_name(),
            titles = content.titles().len(),
            paragraphs = content.paragraphs().len()
        )
    )]
    pub async fn run(
        &self,
        content: &ExtractedContent,
        cancel: &CancellationToken,
    ) -> MsightResult<PipelineResult> {
        let mut result = self.plan(content)?;
        let ids: Vec<_> = result.tasks().iter().map(|task| *task.id()).collect();

        let mut previous: Option<(String, String)> = None;
        for id in &ids {
            let task = result.task_mut(id).ok_or_else(|| {
                MsightError::from(ConfigError::new(format!("Planned task {} disappeared", id)))
            })?;

            if let Some((name, output)) = previous.take() {
                let mut input = BTreeMap::new();
                input.insert(name, JsonValue::String(output));
                task.set_input(input);
            }

            let output = self.execute(task, &[], cancel).await?;
            task.complete(output.clone());
            previous = Some((task.name().clone(), output));
        }

        info!(tasks = result.len(), "Pipeline run complete");
        Ok(result)
    }

    /// Crew stage for a task.
    pub(crate) fn spec_for(&self, task: &StageTask) -> MsightResult<&StageSpec> {
        self.crew.stage(*task.kind()).ok_or_else(|| {
            ConfigError::new(format!("Crew '{}' has no {} stage", self.crew.name(), task.kind()))
                .into()
        })
    }

    /// Execute one task: persona, optional history, then the task prompt.
    ///
    /// Returns the generated text; the task itself is not modified.
    #[instrument(
        skip(self, task, history, cancel),
        fields(stage = %task.kind(), task_name = %task.name(), stage_id = %task.id())
    )]
    pub(crate) async fn execute(
        &self,
        task: &StageTask,
        history: &[Message],
        cancel: &CancellationToken,
    ) -> MsightResult<String> {
        let spec = self.spec_for(task)?;
        if *spec.agent().human_input() {
            info!(agent = %spec.agent().role(), "Stage asks for human input; continuing without waiting");
        }

        let mut messages = Vec::with_capacity(history.len() + 2);
        messages.push(system_message(spec.agent()));
        messages.extend_from_slice(history);
        messages.push(Message::user(task_prompt(spec.task(), task.input())));

        let request = GenerateRequest::builder()
            .messages(messages)
            .model(Some(self.model.name().clone()))
            .temperature(*self.model.temperature())
            .max_tokens(*self.model.max_tokens())
            .build()
            .map_err(|e| {
                MsightError::from(ConfigError::new(format!("Failed to build request: {}", e)))
            })?;

        let prompt_chars: usize = request.messages().iter().map(|m| m.content.len()).sum();
        debug!(messages = request.messages().len(), prompt_chars, "Sending stage request");
        info!("Stage started");

        let stage_error =
            |cause: StageFailure| StageExecutionError::new(task.id().to_string(), task.name(), cause);

        let guard = CallGuard::with_token(self.timeout, cancel.clone());
        let response = match guard.run(self.driver.generate(&request)).await {
            Err(interruption) => {
                warn!(%interruption, "Stage interrupted");
                return Err(stage_error(interruption.into()).into());
            }
            Ok(Err(e)) => {
                warn!(error = %e, "Stage generation failed");
                return Err(stage_error(StageFailure::Generation(e.to_string())).into());
            }
            Ok(Ok(response)) => response,
        };

        if response.text.trim().is_empty() {
            warn!("Stage returned empty output");
            return Err(stage_error(StageFailure::EmptyOutput).into());
        }

        info!(output_chars = response.text.len(), "Stage finished");
        Ok(response.text)
    }
}
