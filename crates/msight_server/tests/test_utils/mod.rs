//! Mock collaborators and request helpers for web UI tests.

use async_trait::async_trait;
use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Request, Response, StatusCode},
};
use msight_core::{ExtractedContent, GenerateRequest, GenerateResponse, TimeoutSettings};
use msight_error::{FetchError, FetchErrorKind, MsightResult};
use msight_interface::{ContentExtractor, GenerationDriver};
use msight_models::UnavailableRenderer;
use msight_pipeline::{Crew, StageRunner};
use msight_server::{AppState, SharedDriver, create_router};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tower::ServiceExt;

pub const SITE_URL: &str = "http://site.test";
pub const HANGING_URL: &str = "http://hang.test";

/// Serves one page at `SITE_URL`; `HANGING_URL` never answers.
pub struct MockExtractor;

#[async_trait]
impl ContentExtractor for MockExtractor {
    async fn extract(&self, url: &str) -> MsightResult<ExtractedContent> {
        match url {
            SITE_URL => Ok(ExtractedContent::new(
                vec!["Welcome & Hello".to_string()],
                vec!["P1".to_string(), "P2".to_string()],
                vec!["/logo.png".to_string()],
            )),
            HANGING_URL => {
                tokio::time::sleep(Duration::from_secs(3600)).await;
                Ok(ExtractedContent::default())
            }
            _ => Err(FetchError::new(FetchErrorKind::Status {
                status: 404,
                url: url.to_string(),
            })
            .into()),
        }
    }
}

/// Driver answering "response N".
#[derive(Clone, Default)]
pub struct MockDriver {
    calls: Arc<Mutex<usize>>,
}

#[async_trait]
impl GenerationDriver for MockDriver {
    async fn generate(&self, _req: &GenerateRequest) -> MsightResult<GenerateResponse> {
        let mut calls = self.calls.lock().unwrap();
        *calls += 1;
        Ok(GenerateResponse::new(format!("response {}", *calls)))
    }

    fn provider_name(&self) -> &'static str {
        "mock"
    }

    fn model_name(&self) -> &str {
        "mock-model"
    }
}

pub fn app() -> Router {
    let driver: SharedDriver = Arc::new(MockDriver::default());
    let runner = StageRunner::new(driver, Crew::bundled().unwrap());
    let state = AppState::new(
        runner,
        Arc::new(MockExtractor),
        Arc::new(UnavailableRenderer::default()),
        TimeoutSettings::default(),
    );
    create_router(state)
}

pub fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

pub fn post_form(uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/x-www-form-urlencoded")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub async fn send(app: &Router, request: Request<Body>) -> (StatusCode, String) {
    let response: Response<Body> = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, String::from_utf8(bytes.to_vec()).unwrap())
}

pub async fn snapshot(app: &Router) -> serde_json::Value {
    let (status, body) = send(app, get("/api/session")).await;
    assert_eq!(status, StatusCode::OK);
    serde_json::from_str(&body).unwrap()
}
