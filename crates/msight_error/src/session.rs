//! Session state machine error types.

/// Specific error conditions for session actions.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub enum SessionErrorKind {
    /// A URL is required to load website data
    #[display("A website URL is required")]
    EmptyUrl,
    /// Feedback text is required to refine the draft
    #[display("Feedback text is required")]
    EmptyFeedback,
    /// The action is not permitted from the current state
    #[display("Cannot {} while session is {}", action, state)]
    InvalidTransition {
        /// Current session state
        state: String,
        /// Attempted action
        action: String,
    },
}

/// Error type for session actions.
///
/// # Examples
///
/// ```
/// use msight_error::{SessionError, SessionErrorKind};
///
/// let err = SessionError::new(SessionErrorKind::EmptyFeedback);
/// assert!(format!("{}", err).contains("Feedback text is required"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Session Error: {} at line {} in {}", kind, line, file)]
pub struct SessionError {
    /// The specific error condition
    pub kind: SessionErrorKind,
    /// Line number where the error occurred
    pub line: u32,
    /// Source file where the error occurred
    pub file: &'static str,
}

impl SessionError {
    /// Create a new SessionError with automatic location tracking.
    #[track_caller]
    pub fn new(kind: SessionErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}
