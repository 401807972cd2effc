//! Errors for collaborator calls cut short by a deadline or a cancel request.

/// Why a collaborator call did not run to completion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub enum Interruption {
    /// The call exceeded its configured timeout
    #[display("timed out after {}s", seconds)]
    TimedOut {
        /// Timeout that elapsed, in seconds
        seconds: u64,
    },
    /// The call was cancelled by the user
    #[display("cancelled")]
    Cancelled,
}

/// A fetch or render call that was interrupted.
///
/// Generation calls report interruption through
/// [`StageExecutionError`](crate::StageExecutionError) instead, so the failing
/// stage stays identifiable.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Interrupted: {} {} at line {} in {}", operation, kind, line, file)]
pub struct InterruptedError {
    /// Name of the interrupted operation (e.g. "extract", "render")
    pub operation: String,
    /// How the call was interrupted
    pub kind: Interruption,
    /// Line number where the error occurred
    pub line: u32,
    /// File where the error occurred
    pub file: &'static str,
}

impl InterruptedError {
    /// Create a new InterruptedError with automatic location tracking.
    ///
    /// # Examples
    ///
    /// ```
    /// use msight_error::{InterruptedError, Interruption};
    ///
    /// let err = InterruptedError::new("extract", Interruption::TimedOut { seconds: 30 });
    /// assert!(format!("{}", err).contains("extract timed out after 30s"));
    /// ```
    #[track_caller]
    pub fn new(operation: impl Into<String>, kind: Interruption) -> Self {
        let location = std::panic::Location::caller();
        Self {
            operation: operation.into(),
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}
