//! Content fetch error types.

/// Specific error conditions while fetching a page.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub enum FetchErrorKind {
    /// The URL is empty, relative, or not http(s)
    #[display("Invalid URL '{}'", _0)]
    InvalidUrl(String),
    /// The request could not be sent or the connection failed
    #[display("Request failed: {}", _0)]
    Request(String),
    /// The server answered with a non-success status
    #[display("HTTP {} from {}", status, url)]
    Status {
        /// HTTP status code
        status: u16,
        /// URL that was requested
        url: String,
    },
    /// The response body could not be read
    #[display("Failed to read body: {}", _0)]
    Body(String),
}

/// Error raised when a page cannot be fetched.
///
/// # Examples
///
/// ```
/// use msight_error::{FetchError, FetchErrorKind};
///
/// let err = FetchError::new(FetchErrorKind::Status {
///     status: 404,
///     url: "http://example.test".to_string(),
/// });
/// assert!(format!("{}", err).contains("HTTP 404"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Fetch Error: {} at line {} in {}", kind, line, file)]
pub struct FetchError {
    /// The specific error condition
    pub kind: FetchErrorKind,
    /// Line number where the error occurred
    pub line: u32,
    /// Source file where the error occurred
    pub file: &'static str,
}

impl FetchError {
    /// Create a new FetchError with automatic location tracking.
    #[track_caller]
    pub fn new(kind: FetchErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}
