//! Command-line interface module.
//!
//! This module provides the CLI structure and command handlers for the msight binary.

mod collaborators;
mod commands;
mod run;
mod serve;

pub use collaborators::Collaborators;
pub use commands::{Cli, Commands};
pub use run::run_session;
pub use serve::serve_ui;
