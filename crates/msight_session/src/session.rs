//! The session record and the actions that drive it.

use crate::{SessionAction, SessionSnapshot, SessionState};
use msight_core::{CallGuard, ExtractedContent, FeedbackEvent, PipelineResult, RefinedOutput, StageId};
use msight_error::{InterruptedError, MsightResult, SessionError, SessionErrorKind};
use msight_interface::{ContentExtractor, GenerationDriver, RenderOutcome, VideoRenderer};
use msight_pipeline::{ReplayEngine, StageRunner};
use tokio_util::sync::CancellationToken;
use tracing::{info, instrument, warn};

/// State of one user's interaction, from URL entry to video request.
///
/// Only the four action methods mutate a session, and each goes through the
/// transition table in [`SessionAction::transition`]: the action must be
/// permitted, the session is rewound to the action's starting state (dropping
/// everything derived after it), and the next state is reached only if the
/// collaborator call succeeds. A failed action leaves the session rewound.
#[derive(Debug, Clone, Default)]
pub struct Session {
    state: SessionState,
    url: Option<String>,
    content: Option<ExtractedContent>,
    pipeline: Option<PipelineResult>,
    draft_task_id: Option<StageId>,
    feedback: Option<String>,
    revised: Option<PipelineResult>,
    refined: Option<RefinedOutput>,
    video: Option<RenderOutcome>,
}

impl Session {
    /// A fresh session in `Init`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current state.
    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Last submitted URL.
    pub fn url(&self) -> Option<&str> {
        self.url.as_deref()
    }

    /// Extracted page content, once scraped.
    pub fn content(&self) -> Option<&ExtractedContent> {
        self.content.as_ref()
    }

    /// Result of the last pipeline run.
    pub fn pipeline(&self) -> Option<&PipelineResult> {
        self.pipeline.as_ref()
    }

    /// Identifier of the Draft task, kept as the replay target.
    pub fn draft_task_id(&self) -> Option<StageId> {
        self.draft_task_id
    }

    /// Output of the Draft task.
    pub fn draft_text(&self) -> Option<&str> {
        let id = self.draft_task_id?;
        self.pipeline.as_ref()?.task(&id)?.output().as_deref()
    }

    /// Output of the DetectGaps task, shown for information only.
    pub fn gaps_text(&self) -> Option<&str> {
        self.pipeline
            .as_ref()?
            .by_kind(msight_core::StageKind::DetectGaps)?
            .output()
            .as_deref()
    }

    /// Last submitted feedback.
    pub fn feedback(&self) -> Option<&str> {
        self.feedback.as_deref()
    }

    /// Pipeline result after the feedback replay.
    pub fn revised(&self) -> Option<&PipelineResult> {
        self.revised.as_ref()
    }

    /// Refined draft produced by the feedback replay.
    pub fn refined(&self) -> Option<&RefinedOutput> {
        self.refined.as_ref()
    }

    /// Refined draft text.
    pub fn refined_text(&self) -> Option<&str> {
        self.refined.as_ref().map(|refined| refined.text().as_str())
    }

    /// Outcome of the video request.
    pub fn video(&self) -> Option<&RenderOutcome> {
        self.video.as_ref()
    }

    /// Serializable view of the session.
    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            state: self.state,
            url: self.url.clone(),
            content: self.content.clone(),
            draft_task_id: self.draft_task_id,
            draft_text: self.draft_text().map(str::to_string),
            gaps_text: self.gaps_text().map(str::to_string),
            feedback: self.feedback.clone(),
            refined_text: self.refined_text().map(str::to_string),
            video: self.video.clone(),
            permitted_actions: self.state.permitted_actions(),
        }
    }

    /// Check `action` against the table and rewind to its starting state.
    fn begin(&mut self, action: SessionAction) -> Result<(), SessionError> {
        if !self.state.permits(action) {
            warn!(state = %self.state, %action, "Action not permitted");
            return Err(SessionError::new(SessionErrorKind::InvalidTransition {
                state: self.state.to_string(),
                action: action.to_string(),
            }));
        }
        self.rewind(action.transition().rewinds_to);
        Ok(())
    }

    /// Drop everything derived after `level` and move the state back to it.
    fn rewind(&mut self, level: SessionState) {
        if level < SessionState::Scraped {
            self.content = None;
        }
        if level < SessionState::Drafted {
            self.pipeline = None;
            self.draft_task_id = None;
        }
        if level < SessionState::FeedbackSubmitted {
            self.feedback = None;
            self.revised = None;
            self.refined = None;
        }
        if level < SessionState::VideoRequested {
            self.video = None;
        }
        if self.state != level {
            info!(from = %self.state, to = %level, "Session rewound");
        }
        self.state = level;
    }

    fn complete(&mut self, action: SessionAction) {
        let reached = action.transition().reaches;
        info!(from = %self.state, to = %reached, %action, "Session advanced");
        self.state = reached;
    }

    fn not_ready(&self, action: SessionAction) -> SessionError {
        SessionError::new(SessionErrorKind::InvalidTransition {
            state: self.state.to_string(),
            action: action.to_string(),
        })
    }

    /// Extract `url` and move to `Scraped`.
    ///
    /// Allowed from any state. All derived data from a previous URL is
    /// discarded before the fetch starts.
    ///
    /// # Errors
    ///
    /// `SessionError` (`EmptyUrl`) for a blank URL, leaving the session as it
    /// was; extractor errors or `InterruptedError` otherwise, leaving it in
    /// `Init`.
    #[instrument(skip(self, extractor, guard), fields(state = %self.state))]
    pub async fn submit_url<E>(
        &mut self,
        extractor: &E,
        url: &str,
        guard: &CallGuard,
    ) -> MsightResult<&ExtractedContent>
    where
        E: ContentExtractor + ?Sized,
    {
        let action = SessionAction::SubmitUrl;
        if !self.state.permits(action) {
            return Err(self.not_ready(action).into());
        }
        let url = url.trim();
        if url.is_empty() {
            return Err(SessionError::new(SessionErrorKind::EmptyUrl).into());
        }

        self.begin(action)?;
        self.url = Some(url.to_string());

        let content = match guard.run(extractor.extract(url)).await {
            Err(interruption) => return Err(InterruptedError::new("extract", interruption).into()),
            Ok(result) => result?,
        };

        self.complete(action);
        Ok(self.content.insert(content))
    }

    /// Run the pipeline over the extracted content and move to `Drafted`.
    ///
    /// # Errors
    ///
    /// `SessionError` before anything was scraped; `StageExecutionError` if a
    /// stage fails, leaving the session in `Scraped`.
    #[instrument(skip_all, fields(state = %self.state))]
    pub async fn generate_draft<D>(
        &mut self,
        runner: &StageRunner<D>,
        cancel: &CancellationToken,
    ) -> MsightResult<&PipelineResult>
    where
        D: GenerationDriver,
    {
        let action = SessionAction::GenerateDraft;
        self.begin(action)?;

        let content = self.content.as_ref().ok_or_else(|| self.not_ready(action))?;
        let result = runner.run(content, cancel).await?;

        let draft_id = *result.draft().ok_or_else(|| self.not_ready(action))?.id();
        self.draft_task_id = Some(draft_id);
        self.complete(action);
        Ok(self.pipeline.insert(result))
    }

    /// Replay the Draft task with `text` and move to `FeedbackSubmitted`.
    ///
    /// # Errors
    ///
    /// `SessionError` before a draft exists or for blank feedback (the
    /// session is left as it was); `StageExecutionError` if the replay fails,
    /// leaving the session in `Drafted`.
    #[instrument(skip_all, fields(state = %self.state, feedback_len = text.len()))]
    pub async fn submit_feedback<D>(
        &mut self,
        engine: &ReplayEngine<D>,
        text: &str,
        cancel: &CancellationToken,
    ) -> MsightResult<&RefinedOutput>
    where
        D: GenerationDriver,
    {
        let action = SessionAction::SubmitFeedback;
        if !self.state.permits(action) {
            return Err(self.not_ready(action).into());
        }
        if text.trim().is_empty() {
            return Err(SessionError::new(SessionErrorKind::EmptyFeedback).into());
        }

        self.begin(action)?;
        self.feedback = Some(text.to_string());

        let draft_id = self.draft_task_id.ok_or_else(|| self.not_ready(action))?;
        let pipeline = self.pipeline.as_ref().ok_or_else(|| self.not_ready(action))?;
        let event = FeedbackEvent::new(draft_id, text);
        let (revised, refined) = engine.apply(pipeline, event, cancel).await?;

        self.revised = Some(revised);
        self.complete(action);
        Ok(self.refined.insert(refined))
    }

    /// Hand the refined draft to the renderer and move to `VideoRequested`.
    ///
    /// The renderer always receives the refined text, never the raw draft.
    ///
    /// # Errors
    ///
    /// `SessionError` before feedback was accepted; renderer errors or
    /// `InterruptedError`, leaving the session in `FeedbackSubmitted`.
    #[instrument(skip_all, fields(state = %self.state))]
    pub async fn request_video<R>(
        &mut self,
        renderer: &R,
        guard: &CallGuard,
    ) -> MsightResult<&RenderOutcome>
    where
        R: VideoRenderer + ?Sized,
    {
        let action = SessionAction::RequestVideo;
        self.begin(action)?;

        let prompt = self
            .refined
            .as_ref()
            .map(|refined| refined.text().clone())
            .ok_or_else(|| self.not_ready(action))?;

        let outcome = match guard.run(renderer.render(&prompt)).await {
            Err(interruption) => return Err(InterruptedError::new("render", interruption).into()),
            Ok(result) => result?,
        };

        self.complete(action);
        Ok(self.video.insert(outcome))
    }
}
