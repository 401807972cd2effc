//! Error types for M-Sight.
//!
//! This crate provides the error taxonomy shared by every M-Sight crate.
//!
//! # Error Hierarchy
//!
//! All errors follow the `ErrorKind` + wrapper struct pattern:
//! - `*ErrorKind` enum defines specific error conditions
//! - `*Error` struct wraps the kind with source location tracking
//! - All constructors use `#[track_caller]` for automatic location capture
//!
//! Errors are grouped by the collaborator that raises them: fetching and
//! parsing pages, running generation stages, replaying a stage with feedback,
//! and driving the session state machine.
//!
//! # Examples
//!
//! ```
//! use msight_error::{MsightResult, SessionError, SessionErrorKind};
//!
//! fn submit(url: &str) -> MsightResult<()> {
//!     if url.trim().is_empty() {
//!         Err(SessionError::new(SessionErrorKind::EmptyUrl))?
//!     }
//!     Ok(())
//! }
//!
//! assert!(submit("").is_err());
//! assert!(submit("http://example.test").is_ok());
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod config;
mod error;
mod fetch;
mod gemini;
mod interrupted;
mod json;
mod parse;
mod replay;
mod server;
mod session;
mod stage;

pub use config::ConfigError;
pub use error::{MsightError, MsightErrorKind, MsightResult};
pub use fetch::{FetchError, FetchErrorKind};
pub use gemini::{GeminiError, GeminiErrorKind};
pub use interrupted::{InterruptedError, Interruption};
pub use json::JsonError;
pub use parse::ParseError;
pub use replay::ReplayTargetNotFoundError;
pub use server::{ServerError, ServerErrorKind};
pub use session::{SessionError, SessionErrorKind};
pub use stage::{StageExecutionError, StageFailure};
