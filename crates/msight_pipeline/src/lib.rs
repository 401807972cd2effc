//! Generation pipeline for M-Sight.
//!
//! A [`Crew`] names the persona and task text of each of the three stages.
//! The [`StageRunner`] executes them in order (Analyze, Draft, DetectGaps)
//! against a [`GenerationDriver`](msight_interface::GenerationDriver), and the
//! [`ReplayEngine`] re-executes a single stage with human feedback.
//!
//! # Example
//!
//! ```rust,ignore
//! use msight_pipeline::{Crew, ReplayEngine, StageRunner};
//! use std::sync::Arc;
//!
//! let runner = Arc::new(StageRunner::new(driver, Crew::bundled()?));
//! let result = runner.run(&content, &cancel).await?;
//!
//! let draft_id = *result.draft().unwrap().id();
//! let engine = ReplayEngine::new(Arc::clone(&runner));
//! let revised = engine.replay(&result, &draft_id, "mention pricing", &cancel).await?;
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod crew;
mod prompt;
mod replay;
mod runner;

pub use crew::{AgentSpec, Crew, StageSpec, TaskSpec};
pub use prompt::{FEEDBACK_KEY, system_message, task_prompt};
pub use replay::ReplayEngine;
pub use runner::{CONTENT_KEY, StageRunner};
