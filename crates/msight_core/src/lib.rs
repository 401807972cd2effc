//! Core data types for the M-Sight content pipeline.
//!
//! This crate provides the values passed between the extractor, the stage
//! runner, the replay engine and the session, plus configuration loading and
//! the deadline/cancellation guard used around every collaborator call.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod config;
mod content;
mod feedback;
mod guard;
mod message;
mod pipeline;
mod request;
mod role;
mod stage;

pub use config::{
    CrewSettings, ModelSettings, MsightConfig, ScraperSettings, ServerSettings, TimeoutSettings,
    VideoSettings,
};
pub use content::ExtractedContent;
pub use feedback::{FeedbackEvent, RefinedOutput};
pub use guard::CallGuard;
pub use message::Message;
pub use pipeline::PipelineResult;
pub use request::{GenerateRequest, GenerateRequestBuilder, GenerateResponse};
pub use role::Role;
pub use stage::{StageId, StageKind, StageTask, TaskStatus};
