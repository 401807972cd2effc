//! M-Sight - AI Creator in your Pocket!
//!
//! M-Sight turns a web page into a video prompt. A page is scraped into
//! titles, paragraphs and images; a three-agent crew analyzes it, drafts a
//! script prompt and lists content gaps; the user's feedback is replayed into
//! the draft stage only; the refined prompt goes to the video renderer.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use msight::{CallGuard, Crew, GeminiClient, Session, StageRunner, WebpageScraper};
//! use std::time::Duration;
//! use tokio_util::sync::CancellationToken;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let runner = StageRunner::new(GeminiClient::new()?, Crew::bundled()?);
//!     let scraper = WebpageScraper::new(Default::default())?;
//!     let mut session = Session::new();
//!
//!     let guard = CallGuard::new(Duration::from_secs(30));
//!     session.submit_url(&scraper, "https://example.com", &guard).await?;
//!     session.generate_draft(&runner, &CancellationToken::new()).await?;
//!     println!("{}", session.draft_text().unwrap_or_default());
//!     Ok(())
//! }
//! ```
//!
//! # Architecture
//!
//! - `msight_error` - Error types
//! - `msight_core` - Data model, configuration, call guards
//! - `msight_interface` - Collaborator traits
//! - `msight_scraper` - Content extractor
//! - `msight_models` - Gemini driver and video render stub
//! - `msight_pipeline` - Crew, stage runner and feedback replay
//! - `msight_session` - Session state machine
//! - `msight_server` - Web UI
//!
//! This crate re-exports everything for convenience.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod logging;

pub use logging::{LoggingConfig, init_logging};

pub use msight_core::*;
pub use msight_error::*;
pub use msight_interface::*;
pub use msight_models::*;
pub use msight_pipeline::*;
pub use msight_scraper::*;
pub use msight_server::{AppState, SharedDriver, create_router, serve};
pub use msight_session::*;
