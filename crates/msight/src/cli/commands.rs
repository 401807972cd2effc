//! CLI command definitions.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// M-Sight - AI Creator in your Pocket!
#[derive(Parser, Debug)]
#[command(name = "msight")]
#[command(about = "Turn a web page into a refined video prompt", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Command to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    pub json_logs: bool,

    /// Configuration file layered over the defaults
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Serve the web UI
    Serve {
        /// Listen address, overriding the configured one
        #[arg(long)]
        bind: Option<String>,
    },

    /// Drive one session from the terminal
    Run {
        /// Website to scrape
        #[arg(long)]
        url: String,

        /// Feedback used to refine the draft
        #[arg(long)]
        feedback: String,

        /// Also request the video
        #[arg(long)]
        video: bool,
    },
}
