//! Mock collaborators for session tests.

use async_trait::async_trait;
use msight_core::{ExtractedContent, GenerateRequest, GenerateResponse};
use msight_error::{FetchError, FetchErrorKind, GeminiError, GeminiErrorKind, MsightResult};
use msight_interface::{ContentExtractor, GenerationDriver, RenderOutcome, VideoRenderer};
use msight_models::VIDEO_UNAVAILABLE;
use msight_pipeline::{Crew, ReplayEngine, StageRunner};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// URL whose fetch never completes.
#[allow(dead_code)]
pub const HANGING_URL: &str = "http://hang.test";

/// Extractor serving fixed pages by URL; unknown URLs answer 404.
pub struct MockExtractor {
    pages: HashMap<String, ExtractedContent>,
}

#[allow(dead_code)]
impl MockExtractor {
    pub fn new() -> Self {
        Self {
            pages: HashMap::new(),
        }
    }

    pub fn with_page(mut self, url: &str, content: ExtractedContent) -> Self {
        self.pages.insert(url.to_string(), content);
        self
    }
}

#[async_trait]
impl ContentExtractor for MockExtractor {
    async fn extract(&self, url: &str) -> MsightResult<ExtractedContent> {
        if url == HANGING_URL {
            tokio::time::sleep(Duration::from_secs(3600)).await;
        }
        self.pages.get(url).cloned().ok_or_else(|| {
            FetchError::new(FetchErrorKind::Status {
                status: 404,
                url: url.to_string(),
            })
            .into()
        })
    }
}

/// Driver answering "response N", or failing every call when `failing`.
#[derive(Clone, Default)]
pub struct MockDriver {
    calls: Arc<Mutex<usize>>,
    failing: Arc<Mutex<bool>>,
}

#[allow(dead_code)]
impl MockDriver {
    pub fn set_failing(&self, failing: bool) {
        *self.failing.lock().unwrap() = failing;
    }

    pub fn call_count(&self) -> usize {
        *self.calls.lock().unwrap()
    }
}

#[async_trait]
impl GenerationDriver for MockDriver {
    async fn generate(&self, _req: &GenerateRequest) -> MsightResult<GenerateResponse> {
        let call = {
            let mut calls = self.calls.lock().unwrap();
            *calls += 1;
            *calls
        };
        if *self.failing.lock().unwrap() {
            return Err(GeminiError::new(GeminiErrorKind::ApiRequest("unavailable".into())).into());
        }
        Ok(GenerateResponse::new(format!("response {}", call)))
    }

    fn provider_name(&self) -> &'static str {
        "mock"
    }

    fn model_name(&self) -> &str {
        "mock-model"
    }
}

/// Renderer that records every prompt it receives.
#[derive(Clone, Default)]
pub struct RecordingRenderer {
    prompts: Arc<Mutex<Vec<String>>>,
}

#[allow(dead_code)]
impl RecordingRenderer {
    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

#[async_trait]
impl VideoRenderer for RecordingRenderer {
    async fn render(&self, prompt: &str) -> MsightResult<RenderOutcome> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        Ok(RenderOutcome::Unavailable(VIDEO_UNAVAILABLE.to_string()))
    }
}

/// Runner and replay engine sharing one mock driver.
#[allow(dead_code)]
pub fn pipeline(driver: &MockDriver) -> (Arc<StageRunner<MockDriver>>, ReplayEngine<MockDriver>) {
    let runner = Arc::new(StageRunner::new(driver.clone(), Crew::bundled().unwrap()));
    let engine = ReplayEngine::new(Arc::clone(&runner));
    (runner, engine)
}

#[allow(dead_code)]
pub fn page(title: &str, paragraphs: &[&str]) -> ExtractedContent {
    ExtractedContent::new(
        vec![title.to_string()],
        paragraphs.iter().map(|p| p.to_string()).collect(),
        vec![],
    )
}
