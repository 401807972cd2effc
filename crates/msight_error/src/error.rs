//! Top-level error wrapper types.

use crate::{
    ConfigError, FetchError, GeminiError, InterruptedError, JsonError, ParseError,
    ReplayTargetNotFoundError, ServerError, SessionError, StageExecutionError,
};

/// Every error family raised across the M-Sight workspace.
///
/// # Examples
///
/// ```
/// use msight_error::{MsightError, ParseError};
///
/// let parse_err = ParseError::new("content type image/png is not markup");
/// let err: MsightError = parse_err.into();
/// assert!(format!("{}", err).contains("Parse Error"));
/// ```
#[derive(Debug, derive_more::From, derive_more::Display, derive_more::Error)]
pub enum MsightErrorKind {
    /// Page could not be fetched
    #[from(FetchError)]
    Fetch(FetchError),
    /// Page body is not parseable markup
    #[from(ParseError)]
    Parse(ParseError),
    /// A generation stage failed
    #[from(StageExecutionError)]
    Stage(StageExecutionError),
    /// Replay referenced an unknown stage
    #[from(ReplayTargetNotFoundError)]
    ReplayTargetNotFound(ReplayTargetNotFoundError),
    /// Session action rejected by the state machine
    #[from(SessionError)]
    Session(SessionError),
    /// Collaborator call timed out or was cancelled
    #[from(InterruptedError)]
    Interrupted(InterruptedError),
    /// Gemini provider error
    #[from(GeminiError)]
    Gemini(GeminiError),
    /// Configuration error
    #[from(ConfigError)]
    Config(ConfigError),
    /// JSON serialization/deserialization error
    #[from(JsonError)]
    Json(JsonError),
    /// Web surface error
    #[from(ServerError)]
    Server(ServerError),
}

/// M-Sight error with kind discrimination.
///
/// # Examples
///
/// ```
/// use msight_error::{ConfigError, MsightErrorKind, MsightResult};
///
/// fn might_fail() -> MsightResult<()> {
///     Err(ConfigError::new("Missing field"))?
/// }
///
/// let err = might_fail().unwrap_err();
/// assert!(matches!(err.kind(), MsightErrorKind::Config(_)));
/// ```
#[derive(Debug, derive_more::Display, derive_more::Error)]
#[display("M-Sight Error: {}", _0)]
pub struct MsightError(Box<MsightErrorKind>);

impl MsightError {
    /// Create a new error from a kind.
    pub fn new(kind: MsightErrorKind) -> Self {
        Self(Box::new(kind))
    }

    /// Get the error kind.
    pub fn kind(&self) -> &MsightErrorKind {
        &self.0
    }
}

// Generic From implementation for any type that converts to MsightErrorKind
impl<T> From<T> for MsightError
where
    T: Into<MsightErrorKind>,
{
    fn from(err: T) -> Self {
        Self::new(err.into())
    }
}

/// Result type for M-Sight operations.
///
/// # Examples
///
/// ```
/// use msight_error::{FetchError, FetchErrorKind, MsightResult};
///
/// fn fetch_page() -> MsightResult<String> {
///     Err(FetchError::new(FetchErrorKind::Request("connection refused".into())))?
/// }
/// assert!(fetch_page().is_err());
/// ```
pub type MsightResult<T> = std::result::Result<T, MsightError>;
