//! Web UI command handler.

use crate::cli::Collaborators;
use msight_core::MsightConfig;
use msight_error::MsightResult;
use msight_server::AppState;

/// Handle the `serve` command
pub async fn serve_ui(config: MsightConfig, bind: Option<String>) -> MsightResult<()> {
    let config = match bind {
        Some(bind) => config.with_bind(bind),
        None => config,
    };

    let collaborators = Collaborators::from_config(&config)?;
    let state = AppState::new(
        collaborators.runner,
        collaborators.extractor,
        collaborators.renderer,
        config.timeouts().clone(),
    );

    tracing::info!("Web UI starting. Press Ctrl+C to stop.");
    msight_server::serve(config.server(), state).await
}
