//! Collaborators built from configuration.

use msight_core::MsightConfig;
use msight_error::MsightResult;
use msight_interface::{ContentExtractor, GenerationDriver, VideoRenderer};
use msight_models::UnavailableRenderer;
use msight_pipeline::{Crew, StageRunner};
use msight_scraper::WebpageScraper;
use msight_server::SharedDriver;
use std::sync::Arc;
use tracing::info;

/// Everything a session needs to run.
pub struct Collaborators {
    /// Generation stages over the configured model
    pub runner: StageRunner<SharedDriver>,
    /// Page extractor
    pub extractor: Arc<dyn ContentExtractor>,
    /// Video renderer
    pub renderer: Arc<dyn VideoRenderer>,
}

impl Collaborators {
    /// Build the driver, crew, extractor and renderer described by `config`.
    pub fn from_config(config: &MsightConfig) -> MsightResult<Self> {
        let driver = driver(config)?;
        let crew = Crew::load(config.crew())?;
        info!(
            provider = driver.provider_name(),
            model = driver.model_name(),
            crew = crew.name(),
            "Collaborators ready"
        );

        let runner = StageRunner::new(driver, crew)
            .with_model(config.model().clone())
            .with_timeout(config.timeouts().generation());

        Ok(Self {
            runner,
            extractor: Arc::new(WebpageScraper::new(config.scraper().clone())?),
            renderer: Arc::new(UnavailableRenderer::new(config.video().clone())),
        })
    }
}

#[cfg(feature = "gemini")]
fn driver(config: &MsightConfig) -> MsightResult<SharedDriver> {
    let client = msight_models::GeminiClient::with_model(config.model().name())?;
    Ok(Arc::new(client))
}

#[cfg(not(feature = "gemini"))]
fn driver(_config: &MsightConfig) -> MsightResult<SharedDriver> {
    Err(msight_error::ConfigError::new(
        "No text-generation provider enabled; rebuild with the `gemini` feature",
    )
    .into())
}
