//! Values returned across collaborator boundaries.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Result of asking the video renderer for a clip.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, derive_more::Display)]
#[serde(tag = "status", content = "detail", rename_all = "snake_case")]
pub enum RenderOutcome {
    /// A video was written to the given path
    #[display("Video rendered to {}", _0.display())]
    Rendered(PathBuf),
    /// No renderer is available; the message is shown to the user as-is
    #[display("{}", _0)]
    Unavailable(String),
}

impl RenderOutcome {
    /// Path of the rendered video, if one was produced.
    pub fn path(&self) -> Option<&PathBuf> {
        match self {
            RenderOutcome::Rendered(path) => Some(path),
            RenderOutcome::Unavailable(_) => None,
        }
    }
}
