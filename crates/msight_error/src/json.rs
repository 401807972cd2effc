//! JSON encoding error types.

/// A value that could not be turned into JSON, such as extracted content
/// handed to the Analyze stage.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("JSON Error: failed to encode {}: {} at line {} in {}", subject, message, line, file)]
pub struct JsonError {
    /// What was being encoded (e.g. "extracted content")
    pub subject: String,
    /// Message from the serializer
    pub message: String,
    /// Line number where the error occurred
    pub line: u32,
    /// File where the error occurred
    pub file: &'static str,
}

impl JsonError {
    /// Create a new JsonError for `subject` at the current location.
    ///
    /// # Examples
    ///
    /// ```
    /// use msight_error::JsonError;
    ///
    /// let err = JsonError::new("extracted content", "key must be a string");
    /// assert_eq!(err.subject, "extracted content");
    /// assert!(err.to_string().contains("failed to encode extracted content"));
    /// ```
    #[track_caller]
    pub fn new(subject: impl Into<String>, message: impl Into<String>) -> Self {
        let location = std::panic::Location::caller();
        Self {
            subject: subject.into(),
            message: message.into(),
            line: location.line(),
            file: location.file(),
        }
    }
}
