//! Headless session command handler.

use crate::cli::Collaborators;
use msight_core::{CallGuard, MsightConfig};
use msight_error::MsightResult;
use msight_pipeline::ReplayEngine;
use msight_session::Session;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

/// Handle the `run` command.
///
/// Walks one session through every step, printing each result. Ctrl+C
/// cancels the step in flight.
pub async fn run_session(
    config: MsightConfig,
    url: &str,
    feedback: &str,
    video: bool,
) -> MsightResult<()> {
    let collaborators = Collaborators::from_config(&config)?;
    let runner = Arc::new(collaborators.runner);
    let engine = ReplayEngine::new(Arc::clone(&runner));

    let cancel = CancellationToken::new();
    let on_interrupt = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("Interrupt received, cancelling");
            on_interrupt.cancel();
        }
    });

    let timeouts = config.timeouts();
    let mut session = Session::new();

    let content = session
        .submit_url(
            collaborators.extractor.as_ref(),
            url,
            &CallGuard::with_token(timeouts.fetch(), cancel.clone()),
        )
        .await?;
    info!(
        titles = content.titles().len(),
        paragraphs = content.paragraphs().len(),
        images = content.images().len(),
        "Website data loaded"
    );
    println!("\n## Titles");
    for title in content.titles() {
        println!("- {}", title);
    }
    println!("\n## Paragraphs");
    for paragraph in content.paragraphs() {
        println!("- {}", paragraph);
    }

    session.generate_draft(runner.as_ref(), &cancel).await?;
    println!("\n## Draft prompt\n{}", session.draft_text().unwrap_or_default());
    if let Some(gaps) = session.gaps_text() {
        println!("\n## Content gaps\n{}", gaps);
    }

    let refined = session.submit_feedback(&engine, feedback, &cancel).await?;
    println!("\n## Refined prompt\n{}", refined.text());

    if video {
        let outcome = session
            .request_video(
                collaborators.renderer.as_ref(),
                &CallGuard::with_token(timeouts.render(), cancel.clone()),
            )
            .await?;
        println!("\n## Video\n{}", outcome);
    }

    Ok(())
}
