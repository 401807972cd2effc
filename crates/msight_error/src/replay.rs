//! Replay error types.

/// The stage identifier given to a replay matches no task of the prior run.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display(
    "Replay Target Not Found: no stage '{}' in prior run at line {} in {}",
    stage_id,
    line,
    file
)]
pub struct ReplayTargetNotFoundError {
    /// The identifier that was looked up
    pub stage_id: String,
    /// Line number where the error occurred
    pub line: u32,
    /// File where the error occurred
    pub file: &'static str,
}

impl ReplayTargetNotFoundError {
    /// Create a new ReplayTargetNotFoundError at the current location.
    ///
    /// # Examples
    ///
    /// ```
    /// use msight_error::ReplayTargetNotFoundError;
    ///
    /// let err = ReplayTargetNotFoundError::new("missing-id");
    /// assert_eq!(err.stage_id, "missing-id");
    /// ```
    #[track_caller]
    pub fn new(stage_id: impl Into<String>) -> Self {
        let location = std::panic::Location::caller();
        Self {
            stage_id: stage_id.into(),
            line: location.line(),
            file: location.file(),
        }
    }
}
