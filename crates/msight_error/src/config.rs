//! Configuration error types.

use std::path::{Path, PathBuf};

/// A settings layer, crew definition or log filter that could not be used.
///
/// `path` names the file at fault when one is known, so a bad
/// `~/.config/msight/msight.toml` is distinguishable from a bad `--config`
/// file or crew TOML.
#[derive(Debug, Clone, derive_more::Error)]
pub struct ConfigError {
    /// What was wrong
    pub message: String,
    /// File the bad value came from, if any
    pub path: Option<PathBuf>,
    /// Line number where the error occurred
    pub line: u32,
    /// File where the error occurred
    pub file: &'static str,
}

impl ConfigError {
    /// Create a new ConfigError with the given message at the current location.
    ///
    /// # Examples
    ///
    /// ```
    /// use msight_error::ConfigError;
    ///
    /// let err = ConfigError::new("crew must define exactly three stages");
    /// assert!(err.message.contains("three stages"));
    /// assert!(err.path.is_none());
    /// ```
    #[track_caller]
    pub fn new(message: impl Into<String>) -> Self {
        let location = std::panic::Location::caller();
        Self {
            message: message.into(),
            path: None,
            line: location.line(),
            file: location.file(),
        }
    }

    /// Attribute the error to a configuration or crew file.
    ///
    /// ```
    /// use msight_error::ConfigError;
    ///
    /// let err = ConfigError::new("stage 2 must be draft").with_path("crew.toml");
    /// assert!(err.to_string().contains("(crew.toml)"));
    /// ```
    pub fn with_path(mut self, path: impl AsRef<Path>) -> Self {
        self.path = Some(path.as_ref().to_path_buf());
        self
    }
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Configuration Error: {}", self.message)?;
        if let Some(path) = &self.path {
            write!(f, " ({})", path.display())?;
        }
        write!(f, " at line {} in {}", self.line, self.file)
    }
}
