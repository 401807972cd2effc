//! Collaborator traits.

use crate::RenderOutcome;
use async_trait::async_trait;
use msight_core::{ExtractedContent, GenerateRequest, GenerateResponse};
use msight_error::MsightResult;
use std::sync::Arc;

/// Text-generation backend used by every pipeline stage.
///
/// Implementations perform exactly one upstream call per `generate`; the
/// pipeline never retries.
#[async_trait]
pub trait GenerationDriver: Send + Sync {
    /// Generate text for a request.
    async fn generate(&self, req: &GenerateRequest) -> MsightResult<GenerateResponse>;

    /// Provider name (e.g., "gemini").
    fn provider_name(&self) -> &'static str;

    /// Model identifier (e.g., "gemini-2.0-flash").
    fn model_name(&self) -> &str;
}

#[async_trait]
impl<T> GenerationDriver for Arc<T>
where
    T: GenerationDriver + ?Sized,
{
    async fn generate(&self, req: &GenerateRequest) -> MsightResult<GenerateResponse> {
        (**self).generate(req).await
    }

    fn provider_name(&self) -> &'static str {
        (**self).provider_name()
    }

    fn model_name(&self) -> &str {
        (**self).model_name()
    }
}

/// Fetches a page and reduces it to titles, paragraphs and image sources.
#[async_trait]
pub trait ContentExtractor: Send + Sync {
    /// Fetch `url` and extract its content.
    ///
    /// # Errors
    ///
    /// `FetchError` when the page cannot be retrieved, `ParseError` when the
    /// body is not markup. A page with no matching elements is not an error.
    async fn extract(&self, url: &str) -> MsightResult<ExtractedContent>;
}

#[async_trait]
impl<T> ContentExtractor for Arc<T>
where
    T: ContentExtractor + ?Sized,
{
    async fn extract(&self, url: &str) -> MsightResult<ExtractedContent> {
        (**self).extract(url).await
    }
}

/// Turns a refined prompt into a video.
#[async_trait]
pub trait VideoRenderer: Send + Sync {
    /// Render a clip for `prompt`.
    async fn render(&self, prompt: &str) -> MsightResult<RenderOutcome>;
}

#[async_trait]
impl<T> VideoRenderer for Arc<T>
where
    T: VideoRenderer + ?Sized,
{
    async fn render(&self, prompt: &str) -> MsightResult<RenderOutcome> {
        (**self).render(prompt).await
    }
}
