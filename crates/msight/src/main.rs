//! M-Sight CLI binary.
//!
//! This binary provides command-line access to M-Sight:
//! - Serve the web UI
//! - Drive one session from the terminal

use clap::Parser;
use msight::{LoggingConfig, MsightConfig, init_logging};

mod cli;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    use cli::{Cli, Commands, run_session, serve_ui};

    // Load .env before anything reads GEMINI_API_KEY
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    init_logging(
        &LoggingConfig::new()
            .with_verbose(cli.verbose)
            .with_json_logs(cli.json_logs),
    )?;

    let config = MsightConfig::load_with(cli.config.as_deref())?;

    match cli.command {
        Commands::Serve { bind } => {
            serve_ui(config, bind).await?;
        }

        Commands::Run {
            url,
            feedback,
            video,
        } => {
            run_session(config, &url, &feedback, video).await?;
        }
    }

    Ok(())
}
