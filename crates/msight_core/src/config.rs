//! Configuration loading for M-Sight.
//!
//! Configuration is layered with the `config` crate, later sources overriding
//! earlier ones:
//! - Bundled defaults (include_str! from msight.toml)
//! - `~/.config/msight/msight.toml`
//! - `./msight.toml`
//! - An explicit file passed by the caller

use msight_error::{ConfigError, MsightError, MsightResult};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, instrument};

/// Bundled default configuration.
const DEFAULT_CONFIG: &str = include_str!("../../../msight.toml");

/// Text-generation model settings.
///
/// ```toml
/// [model]
/// name = "gemini-2.0-flash"
/// temperature = 0.7
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, derive_getters::Getters)]
pub struct ModelSettings {
    /// Model identifier passed to the generation driver
    #[serde(default = "default_model_name")]
    name: String,
    /// Sampling temperature override
    #[serde(default)]
    temperature: Option<f32>,
    /// Output token limit
    #[serde(default)]
    max_tokens: Option<u32>,
}

fn default_model_name() -> String {
    "gemini-2.0-flash".to_string()
}

impl Default for ModelSettings {
    fn default() -> Self {
        Self {
            name: default_model_name(),
            temperature: None,
            max_tokens: None,
        }
    }
}

/// Upper bounds for each collaborator call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeoutSettings {
    /// Page fetch timeout in seconds
    #[serde(default = "default_fetch_secs")]
    pub fetch_secs: u64,
    /// Per-stage generation timeout in seconds
    #[serde(default = "default_generation_secs")]
    pub generation_secs: u64,
    /// Video render timeout in seconds
    #[serde(default = "default_render_secs")]
    pub render_secs: u64,
}

fn default_fetch_secs() -> u64 {
    30
}

fn default_generation_secs() -> u64 {
    120
}

fn default_render_secs() -> u64 {
    900
}

impl TimeoutSettings {
    /// Page fetch timeout.
    pub fn fetch(&self) -> Duration {
        Duration::from_secs(self.fetch_secs)
    }

    /// Per-stage generation timeout.
    pub fn generation(&self) -> Duration {
        Duration::from_secs(self.generation_secs)
    }

    /// Video render timeout.
    pub fn render(&self) -> Duration {
        Duration::from_secs(self.render_secs)
    }
}

impl Default for TimeoutSettings {
    fn default() -> Self {
        Self {
            fetch_secs: default_fetch_secs(),
            generation_secs: default_generation_secs(),
            render_secs: default_render_secs(),
        }
    }
}

/// HTTP settings for the content extractor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, derive_getters::Getters)]
pub struct ScraperSettings {
    /// User-Agent header sent with every fetch
    #[serde(default = "default_user_agent")]
    user_agent: String,
    /// Largest body accepted, in bytes
    #[serde(default = "default_max_body_bytes")]
    max_body_bytes: usize,
}

fn default_user_agent() -> String {
    concat!("msight/", env!("CARGO_PKG_VERSION")).to_string()
}

fn default_max_body_bytes() -> usize {
    5_000_000
}

impl ScraperSettings {
    /// Create extractor settings.
    pub fn new(user_agent: impl Into<String>, max_body_bytes: usize) -> Self {
        Self {
            user_agent: user_agent.into(),
            max_body_bytes,
        }
    }
}

impl Default for ScraperSettings {
    fn default() -> Self {
        Self {
            user_agent: default_user_agent(),
            max_body_bytes: default_max_body_bytes(),
        }
    }
}

/// Web surface settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, derive_getters::Getters)]
pub struct ServerSettings {
    /// Listen address, e.g. "127.0.0.1:8501"
    #[serde(default = "default_bind")]
    bind: String,
}

fn default_bind() -> String {
    "127.0.0.1:8501".to_string()
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            bind: default_bind(),
        }
    }
}

/// Text-to-video settings, reported by the render boundary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, derive_getters::Getters)]
pub struct VideoSettings {
    /// Pretrained text-to-video model identifier
    #[serde(default = "default_video_model")]
    model: String,
    /// Diffusion inference steps
    #[serde(default = "default_inference_steps")]
    inference_steps: u32,
}

fn default_video_model() -> String {
    "damo-vilab/text-to-video-ms-1.7b".to_string()
}

fn default_inference_steps() -> u32 {
    25
}

impl Default for VideoSettings {
    fn default() -> Self {
        Self {
            model: default_video_model(),
            inference_steps: default_inference_steps(),
        }
    }
}

/// Crew definition source.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, derive_getters::Getters)]
pub struct CrewSettings {
    /// Crew TOML replacing the bundled crew
    #[serde(default)]
    path: Option<PathBuf>,
}

/// Complete M-Sight configuration.
///
/// # Examples
///
/// ```
/// use msight_core::MsightConfig;
///
/// let config = MsightConfig::default();
/// assert_eq!(config.model().name(), "gemini-2.0-flash");
/// assert_eq!(config.timeouts().fetch_secs, 30);
/// ```
#[derive(
    Debug, Clone, Default, PartialEq, Serialize, Deserialize, derive_getters::Getters,
)]
pub struct MsightConfig {
    /// Text-generation model
    #[serde(default)]
    model: ModelSettings,
    /// Collaborator call timeouts
    #[serde(default)]
    timeouts: TimeoutSettings,
    /// Content extractor HTTP settings
    #[serde(default)]
    scraper: ScraperSettings,
    /// Web surface
    #[serde(default)]
    server: ServerSettings,
    /// Video rendering
    #[serde(default)]
    video: VideoSettings,
    /// Crew definition source
    #[serde(default)]
    crew: CrewSettings,
}

impl MsightConfig {
    /// Load configuration from bundled defaults and optional user files.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if a present file is malformed.
    pub fn load() -> MsightResult<Self> {
        Self::load_with(None)
    }

    /// Load configuration, layering `explicit` on top when given.
    ///
    /// An explicit file must exist; the home and working-directory files are
    /// optional.
    #[instrument(skip_all, fields(explicit = ?explicit))]
    pub fn load_with(explicit: Option<&Path>) -> MsightResult<Self> {
        debug!("Loading configuration with precedence: explicit > current dir > home dir > bundled defaults");

        let mut builder = config::Config::builder()
            .add_source(config::File::from_str(DEFAULT_CONFIG, config::FileFormat::Toml));

        if let Some(home) = dirs::home_dir() {
            let home_config = home.join(".config/msight/msight.toml");
            builder = builder.add_source(config::File::from(home_config).required(false));
        }

        builder = builder.add_source(config::File::with_name("msight").required(false));

        if let Some(path) = explicit {
            if !path.is_file() {
                return Err(ConfigError::new("Configuration file not found")
                    .with_path(path)
                    .into());
            }
            builder = builder.add_source(config::File::from(path).required(true));
        }

        builder
            .build()
            .map_err(|e| {
                MsightError::from(ConfigError::new(format!(
                    "Failed to build configuration: {}",
                    e
                )))
            })?
            .try_deserialize()
            .map_err(|e| {
                MsightError::from(ConfigError::new(format!(
                    "Failed to parse configuration: {}",
                    e
                )))
            })
    }

    /// Override the listen address.
    pub fn with_bind(mut self, bind: impl Into<String>) -> Self {
        self.server.bind = bind.into();
        self
    }
}
