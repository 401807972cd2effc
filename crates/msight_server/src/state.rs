//! Shared state behind every route.

use msight_core::{CallGuard, TimeoutSettings};
use msight_interface::{ContentExtractor, GenerationDriver, VideoRenderer};
use msight_pipeline::{ReplayEngine, StageRunner};
use msight_session::Session;
use std::sync::Arc;
use tokio::sync::{Mutex, MutexGuard};
use tokio_util::sync::CancellationToken;
use tracing::info;

/// Text-generation driver chosen at startup.
pub type SharedDriver = Arc<dyn GenerationDriver>;

/// Collaborators and the single session served by the web UI.
///
/// Cloning is cheap; every clone drives the same session.
#[derive(Clone)]
pub struct AppState {
    session: Arc<Mutex<Session>>,
    runner: Arc<StageRunner<SharedDriver>>,
    engine: ReplayEngine<SharedDriver>,
    extractor: Arc<dyn ContentExtractor>,
    renderer: Arc<dyn VideoRenderer>,
    timeouts: TimeoutSettings,
    in_flight: Arc<Mutex<CancellationToken>>,
}

impl AppState {
    /// Create state around a fresh session.
    pub fn new(
        runner: StageRunner<SharedDriver>,
        extractor: Arc<dyn ContentExtractor>,
        renderer: Arc<dyn VideoRenderer>,
        timeouts: TimeoutSettings,
    ) -> Self {
        let runner = Arc::new(runner.with_timeout(timeouts.generation()));
        let engine = ReplayEngine::new(Arc::clone(&runner));
        Self {
            session: Arc::new(Mutex::new(Session::new())),
            runner,
            engine,
            extractor,
            renderer,
            timeouts,
            in_flight: Arc::new(Mutex::new(CancellationToken::new())),
        }
    }

    /// Wait for exclusive access to the session.
    pub async fn session(&self) -> MutexGuard<'_, Session> {
        self.session.lock().await
    }

    /// Stage runner used for drafts.
    pub fn runner(&self) -> &StageRunner<SharedDriver> {
        &self.runner
    }

    /// Replay engine used for feedback.
    pub fn engine(&self) -> &ReplayEngine<SharedDriver> {
        &self.engine
    }

    /// Page extractor.
    pub fn extractor(&self) -> &dyn ContentExtractor {
        self.extractor.as_ref()
    }

    /// Video renderer.
    pub fn renderer(&self) -> &dyn VideoRenderer {
        self.renderer.as_ref()
    }

    /// Configured call timeouts.
    pub fn timeouts(&self) -> &TimeoutSettings {
        &self.timeouts
    }

    /// Install a fresh cancellation token for the action about to run.
    ///
    /// Call while holding the session lock, so the token always belongs to
    /// the action that owns the session.
    pub async fn begin_action(&self) -> CancellationToken {
        let token = CancellationToken::new();
        *self.in_flight.lock().await = token.clone();
        token
    }

    /// Guard for the page fetch of the action about to run.
    pub async fn fetch_guard(&self) -> CallGuard {
        CallGuard::with_token(self.timeouts.fetch(), self.begin_action().await)
    }

    /// Guard for the render call of the action about to run.
    pub async fn render_guard(&self) -> CallGuard {
        CallGuard::with_token(self.timeouts.render(), self.begin_action().await)
    }

    /// Trip the token of the action in flight, if any.
    pub async fn cancel_in_flight(&self) {
        let token = self.in_flight.lock().await;
        if !token.is_cancelled() {
            info!("Cancelling in-flight action");
            token.cancel();
        }
    }
}
