//! Collaborator implementations for M-Sight.
//!
//! - **Gemini** (Google) text generation - enable with the `gemini` feature
//!   (on by default)
//! - **Video render stub** - always reports that rendering is unavailable
//!
//! # Example
//!
//! ```no_run
//! # #[cfg(feature = "gemini")]
//! # {
//! use msight_models::GeminiClient;
//! use msight_interface::GenerationDriver;
//! use msight_core::{GenerateRequest, Message};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let client = GeminiClient::new()?;
//! let request = GenerateRequest::builder()
//!     .messages(vec![Message::user("Hello")])
//!     .build()?;
//! let response = client.generate(&request).await?;
//! println!("{}", response.text);
//! # Ok(())
//! # }
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod video;

pub use video::{UnavailableRenderer, VIDEO_UNAVAILABLE};

#[cfg(feature = "gemini")]
mod gemini;

#[cfg(feature = "gemini")]
pub use gemini::GeminiClient;
