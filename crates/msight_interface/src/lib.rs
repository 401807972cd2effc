//! Trait definitions for the M-Sight collaborators.
//!
//! The pipeline depends only on these seams: a content extractor, a
//! text-generation driver and a video renderer. Concrete implementations live
//! in `msight_scraper` and `msight_models`; tests substitute their own.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod traits;
mod types;

pub use traits::{ContentExtractor, GenerationDriver, VideoRenderer};
pub use types::RenderOutcome;
