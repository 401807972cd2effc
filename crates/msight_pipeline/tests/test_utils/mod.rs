//! Test utilities for pipeline tests.

use async_trait::async_trait;
use msight_core::{ExtractedContent, GenerateRequest, GenerateResponse};
use msight_error::{GeminiError, GeminiErrorKind, MsightResult};
use msight_interface::GenerationDriver;
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// A single scripted response.
#[derive(Debug, Clone)]
#[allow(dead_code)]
pub enum MockResponse {
    /// Return this text
    Text(String),
    /// Return whitespace only
    Empty,
    /// Fail with an API error
    Error(String),
    /// Never answer within any test timeout
    Hang,
}

/// Generation driver with scripted behavior that records every request.
#[derive(Clone)]
pub struct MockDriver {
    script: Vec<MockResponse>,
    requests: Arc<Mutex<Vec<GenerateRequest>>>,
}

#[allow(dead_code)]
impl MockDriver {
    /// Answer call N with "response N" (1-based).
    pub fn counting() -> Self {
        Self::scripted(Vec::new())
    }

    /// Answer calls from `script` in order, then fall back to counting.
    pub fn scripted(script: Vec<MockResponse>) -> Self {
        Self {
            script,
            requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Requests received so far.
    pub fn requests(&self) -> Vec<GenerateRequest> {
        self.requests.lock().unwrap().clone()
    }

    /// Number of generate calls that started.
    pub fn call_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

#[async_trait]
impl GenerationDriver for MockDriver {
    async fn generate(&self, req: &GenerateRequest) -> MsightResult<GenerateResponse> {
        let call = {
            let mut requests = self.requests.lock().unwrap();
            requests.push(req.clone());
            requests.len()
        };

        match self.script.get(call - 1).cloned() {
            Some(MockResponse::Text(text)) => Ok(GenerateResponse::new(text)),
            Some(MockResponse::Empty) => Ok(GenerateResponse::new("  \n")),
            Some(MockResponse::Error(message)) => {
                Err(GeminiError::new(GeminiErrorKind::ApiRequest(message)).into())
            }
            Some(MockResponse::Hang) => {
                tokio::time::sleep(Duration::from_secs(3600)).await;
                Ok(GenerateResponse::new("too late"))
            }
            None => Ok(GenerateResponse::new(format!("response {}", call))),
        }
    }

    fn provider_name(&self) -> &'static str {
        "mock"
    }

    fn model_name(&self) -> &str {
        "mock-model"
    }
}

/// The page content used throughout the end-to-end scenario.
#[allow(dead_code)]
pub fn sample_content() -> ExtractedContent {
    ExtractedContent::new(
        vec!["T1".to_string()],
        vec!["P1".to_string(), "P2".to_string()],
        vec![],
    )
}
