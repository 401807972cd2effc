//! Session state machine for M-Sight.
//!
//! A [`Session`] walks one linear path:
//!
//! ```text
//! Init → Scraped → Drafted → FeedbackSubmitted → VideoRequested
//! ```
//!
//! Re-running an earlier step rewinds the session to that step and discards
//! everything derived after it, so a new URL never shows the previous page's
//! draft or refined text.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod session;
mod snapshot;
mod state;

pub use session::Session;
pub use snapshot::SessionSnapshot;
pub use state::{SessionAction, SessionState, Transition};
