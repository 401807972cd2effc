//! Router and request handlers.

use crate::{AppState, banner_for, page, status_for};
use axum::{
    Form, Json, Router,
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
    routing::{get, post},
};
use msight_error::MsightResult;
use msight_session::{Session, SessionSnapshot};
use serde::Deserialize;
use serde_json::json;
use tracing::{error, instrument, warn};

/// Form posted by the URL step.
#[derive(Debug, Default, Deserialize)]
pub struct UrlForm {
    /// Website to scrape
    #[serde(default)]
    pub url: String,
}

/// Form posted by the feedback step.
#[derive(Debug, Default, Deserialize)]
pub struct FeedbackForm {
    /// Requested changes to the draft
    #[serde(default)]
    pub feedback: String,
}

/// Create the web UI router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/scrape", post(scrape))
        .route("/draft", post(draft))
        .route("/feedback", post(feedback))
        .route("/video", post(video))
        .route("/cancel", post(cancel))
        .route("/api/session", get(session_json))
        .route("/health", get(health_check))
        .with_state(state)
}

async fn index(State(state): State<AppState>) -> Html<String> {
    let session = state.session().await;
    Html(page::render(&session.snapshot(), None))
}

#[instrument(skip_all, fields(url = %form.url))]
async fn scrape(State(state): State<AppState>, Form(form): Form<UrlForm>) -> Response {
    let mut session = state.session().await;
    let guard = state.fetch_guard().await;
    let result = session
        .submit_url(state.extractor(), &form.url, &guard)
        .await
        .map(|_| ());
    respond(&session, result)
}

#[instrument(skip_all)]
async fn draft(State(state): State<AppState>) -> Response {
    let mut session = state.session().await;
    let cancel = state.begin_action().await;
    let result = session
        .generate_draft(state.runner(), &cancel)
        .await
        .map(|_| ());
    respond(&session, result)
}

#[instrument(skip_all, fields(feedback_len = form.feedback.len()))]
async fn feedback(State(state): State<AppState>, Form(form): Form<FeedbackForm>) -> Response {
    let mut session = state.session().await;
    let cancel = state.begin_action().await;
    let result = session
        .submit_feedback(state.engine(), &form.feedback, &cancel)
        .await
        .map(|_| ());
    respond(&session, result)
}

#[instrument(skip_all)]
async fn video(State(state): State<AppState>) -> Response {
    let mut session = state.session().await;
    let guard = state.render_guard().await;
    let result = session
        .request_video(state.renderer(), &guard)
        .await
        .map(|_| ());
    respond(&session, result)
}

async fn cancel(State(state): State<AppState>) -> Redirect {
    state.cancel_in_flight().await;
    Redirect::to("/")
}

async fn session_json(State(state): State<AppState>) -> Json<SessionSnapshot> {
    let session = state.session().await;
    Json(session.snapshot())
}

async fn health_check() -> impl IntoResponse {
    (StatusCode::OK, Json(json!({"status": "ok"})))
}

/// Redirect back to the page on success; re-render it with a banner on error.
fn respond(session: &Session, result: MsightResult<()>) -> Response {
    match result {
        Ok(()) => Redirect::to("/").into_response(),
        Err(err) => {
            let status = status_for(&err);
            if status.is_server_error() {
                error!(%status, error = %err, "Action failed");
            } else {
                warn!(%status, error = %err, "Action rejected");
            }
            let html = page::render(&session.snapshot(), Some(&banner_for(&err)));
            (status, Html(html)).into_response()
        }
    }
}
