//! Video render boundary.
//!
//! No text-to-video backend ships with M-Sight; the renderer records the
//! configured model and reports the clip as unavailable.

use async_trait::async_trait;
use msight_core::VideoSettings;
use msight_error::MsightResult;
use msight_interface::{RenderOutcome, VideoRenderer};
use tracing::{info, instrument};

/// Message shown when no video backend is available.
pub const VIDEO_UNAVAILABLE: &str = "Video generation service is not available yet.";

/// Renderer that never renders.
#[derive(Debug, Clone, Default)]
pub struct UnavailableRenderer {
    settings: VideoSettings,
}

impl UnavailableRenderer {
    /// Create a stub renderer for the configured video model.
    pub fn new(settings: VideoSettings) -> Self {
        Self { settings }
    }

    /// Video settings a real backend would use.
    pub fn settings(&self) -> &VideoSettings {
        &self.settings
    }
}

#[async_trait]
impl VideoRenderer for UnavailableRenderer {
    #[instrument(
        skip(self, prompt),
        fields(
            prompt_len = prompt.len(),
            model = %self.settings.model(),
            inference_steps = *self.settings.inference_steps()
        )
    )]
    async fn render(&self, prompt: &str) -> MsightResult<RenderOutcome> {
        info!("Video render requested, no backend available");
        Ok(RenderOutcome::Unavailable(VIDEO_UNAVAILABLE.to_string()))
    }
}
