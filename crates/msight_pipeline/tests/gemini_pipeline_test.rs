//! End-to-end pipeline against the real Gemini API.
//!
//! Requires the `api` feature and `GEMINI_API_KEY`.

use msight_core::ExtractedContent;
use msight_models::GeminiClient;
use msight_pipeline::{Crew, ReplayEngine, StageRunner};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

#[tokio::test]
#[cfg_attr(not(feature = "api"), ignore)]
async fn test_gemini_run_and_replay() -> Result<(), Box<dyn std::error::Error>> {
    let _ = dotenvy::dotenv();
    let driver = GeminiClient::new()?;
    let runner = Arc::new(StageRunner::new(driver, Crew::bundled()?));
    let cancel = CancellationToken::new();

    let content = ExtractedContent::new(
        vec!["Fresh coffee, delivered".to_string()],
        vec!["Beans roasted weekly and shipped within a day.".to_string()],
        vec![],
    );

    let result = runner.run(&content, &cancel).await?;
    assert!(result.is_complete());

    let draft_id = *result.draft().ok_or("missing draft")?.id();
    let engine = ReplayEngine::new(Arc::clone(&runner));
    let revised = engine
        .replay(&result, &draft_id, "mention pricing", &cancel)
        .await?;

    let refined = revised.task(&draft_id).and_then(|t| t.output().clone());
    assert!(refined.is_some_and(|text| !text.trim().is_empty()));
    Ok(())
}
