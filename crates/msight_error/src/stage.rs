//! Generation stage error types.

use crate::Interruption;

/// Why a stage produced no usable output.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub enum StageFailure {
    /// The text-generation collaborator returned an error
    #[display("generation failed: {}", _0)]
    Generation(String),
    /// The collaborator answered with blank text
    #[display("generation returned empty output")]
    EmptyOutput,
    /// The call exceeded the generation timeout
    #[display("generation timed out after {}s", seconds)]
    TimedOut {
        /// Timeout that elapsed, in seconds
        seconds: u64,
    },
    /// The call was cancelled by the user
    #[display("generation cancelled")]
    Cancelled,
}

impl From<Interruption> for StageFailure {
    fn from(interruption: Interruption) -> Self {
        match interruption {
            Interruption::TimedOut { seconds } => Self::TimedOut { seconds },
            Interruption::Cancelled => Self::Cancelled,
        }
    }
}

/// A pipeline stage failed; the run halts at this stage.
///
/// # Examples
///
/// ```
/// use msight_error::{StageExecutionError, StageFailure};
///
/// let err = StageExecutionError::new("3f2a", "DraftScript", StageFailure::EmptyOutput);
/// assert!(format!("{}", err).contains("DraftScript"));
/// assert_eq!(err.cause, StageFailure::EmptyOutput);
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display(
    "Stage Execution Error: stage '{}' ({}) {} at line {} in {}",
    stage_name,
    stage_id,
    cause,
    line,
    file
)]
pub struct StageExecutionError {
    /// Identifier of the failing stage task
    pub stage_id: String,
    /// Task name of the failing stage
    pub stage_name: String,
    /// What went wrong
    pub cause: StageFailure,
    /// Line number where the error occurred
    pub line: u32,
    /// File where the error occurred
    pub file: &'static str,
}

impl StageExecutionError {
    /// Create a new StageExecutionError with automatic location tracking.
    #[track_caller]
    pub fn new(
        stage_id: impl Into<String>,
        stage_name: impl Into<String>,
        cause: StageFailure,
    ) -> Self {
        let location = std::panic::Location::caller();
        Self {
            stage_id: stage_id.into(),
            stage_name: stage_name.into(),
            cause,
            line: location.line(),
            file: location.file(),
        }
    }
}
