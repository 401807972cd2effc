//! Tests for the generation stage runner.

mod test_utils;

use msight_core::{ExtractedContent, Role, StageKind, TaskStatus};
use msight_error::{MsightErrorKind, StageFailure};
use msight_pipeline::{CONTENT_KEY, Crew, StageRunner};
use serde_json::json;
use std::collections::HashSet;
use std::time::Duration;
use test_utils::{MockDriver, MockResponse, sample_content};
use tokio_util::sync::CancellationToken;

fn runner(driver: MockDriver) -> StageRunner<MockDriver> {
    StageRunner::new(driver, Crew::bundled().unwrap())
}

#[tokio::test]
async fn test_run_produces_three_ordered_complete_tasks() {
    let driver = MockDriver::counting();
    let runner = runner(driver.clone());

    let result = runner
        .run(&sample_content(), &CancellationToken::new())
        .await
        .unwrap();

    let kinds: Vec<StageKind> = result.tasks().iter().map(|t| *t.kind()).collect();
    assert_eq!(kinds, StageKind::ORDER);

    let names: Vec<&str> = result.tasks().iter().map(|t| t.name().as_str()).collect();
    assert_eq!(names, ["AnalyzeData", "DraftScript", "IdentifyGaps"]);

    for task in result.tasks() {
        assert_eq!(*task.status(), TaskStatus::Complete);
        assert!(!task.output().as_deref().unwrap_or_default().trim().is_empty());
    }

    let ids: HashSet<_> = result.tasks().iter().map(|t| *t.id()).collect();
    assert_eq!(ids.len(), 3);
    assert!(result.is_complete());
    assert_eq!(driver.call_count(), 3);
}

#[tokio::test]
async fn test_each_stage_receives_previous_output() {
    let driver = MockDriver::counting();
    let runner = runner(driver.clone());
    let content = sample_content();

    let result = runner.run(&content, &CancellationToken::new()).await.unwrap();

    let analyze = result.by_kind(StageKind::Analyze).unwrap();
    assert_eq!(
        analyze.input().get(CONTENT_KEY),
        Some(&json!({"titles": ["T1"], "paragraphs": ["P1", "P2"], "images": []}))
    );

    let draft = result.by_kind(StageKind::Draft).unwrap();
    assert_eq!(draft.input().get("AnalyzeData"), Some(&json!("response 1")));
    assert_eq!(draft.input().len(), 1);

    let gaps = result.by_kind(StageKind::DetectGaps).unwrap();
    assert_eq!(gaps.input().get("DraftScript"), Some(&json!("response 2")));
    assert_eq!(gaps.output().as_deref(), Some("response 3"));

    let requests = driver.requests();
    assert!(requests[1].last_user_text().unwrap().contains("response 1"));
    assert!(requests[2].last_user_text().unwrap().contains("response 2"));
}

#[tokio::test]
async fn test_requests_carry_persona_and_task() {
    let driver = MockDriver::counting();
    let runner = runner(driver.clone());

    runner
        .run(&sample_content(), &CancellationToken::new())
        .await
        .unwrap();

    let requests = driver.requests();
    let draft = &requests[1];
    assert_eq!(draft.messages().len(), 2);
    assert_eq!(draft.messages()[0].role, Role::System);
    assert!(draft.messages()[0].content.contains("ScriptWriter"));
    assert!(
        draft
            .last_user_text()
            .unwrap()
            .starts_with("Draft a video script based on the insights.")
    );
    assert_eq!(draft.model().as_deref(), Some("gemini-2.0-flash"));
}

#[tokio::test]
async fn test_failure_halts_downstream_stages() {
    let driver = MockDriver::scripted(vec![
        MockResponse::Text("insights".to_string()),
        MockResponse::Error("quota exceeded".to_string()),
    ]);
    let runner = runner(driver.clone());

    let err = runner
        .run(&sample_content(), &CancellationToken::new())
        .await
        .unwrap_err();

    match err.kind() {
        MsightErrorKind::Stage(stage) => {
            assert_eq!(stage.stage_name, "DraftScript");
            assert!(matches!(&stage.cause, StageFailure::Generation(msg) if msg.contains("quota exceeded")));
        }
        other => panic!("Expected stage error, got {other:?}"),
    }
    assert_eq!(driver.call_count(), 2, "DetectGaps must not be attempted");
}

#[tokio::test]
async fn test_empty_output_is_a_stage_failure() {
    let driver = MockDriver::scripted(vec![MockResponse::Empty]);
    let runner = runner(driver.clone());

    let err = runner
        .run(&sample_content(), &CancellationToken::new())
        .await
        .unwrap_err();

    match err.kind() {
        MsightErrorKind::Stage(stage) => {
            assert_eq!(stage.stage_name, "AnalyzeData");
            assert_eq!(stage.cause, StageFailure::EmptyOutput);
        }
        other => panic!("Expected stage error, got {other:?}"),
    }
    assert_eq!(driver.call_count(), 1);
}

#[tokio::test]
async fn test_hung_stage_times_out() {
    let driver = MockDriver::scripted(vec![
        MockResponse::Text("insights".to_string()),
        MockResponse::Hang,
    ]);
    let runner = runner(driver.clone()).with_timeout(Duration::from_millis(50));

    let err = runner
        .run(&sample_content(), &CancellationToken::new())
        .await
        .unwrap_err();

    assert!(matches!(
        err.kind(),
        MsightErrorKind::Stage(stage)
            if stage.stage_name == "DraftScript"
                && matches!(stage.cause, StageFailure::TimedOut { .. })
    ));
}

#[tokio::test]
async fn test_cancelled_run_makes_no_calls() {
    let driver = MockDriver::counting();
    let runner = runner(driver.clone());
    let cancel = CancellationToken::new();
    cancel.cancel();

    let err = runner.run(&sample_content(), &cancel).await.unwrap_err();

    assert!(matches!(
        err.kind(),
        MsightErrorKind::Stage(stage) if stage.cause == StageFailure::Cancelled
    ));
    assert_eq!(driver.call_count(), 0);
}

#[tokio::test]
async fn test_cancel_mid_stage() {
    let driver = MockDriver::scripted(vec![MockResponse::Hang]);
    let runner = runner(driver.clone());
    let cancel = CancellationToken::new();

    let trigger = cancel.clone();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(30)).await;
        trigger.cancel();
    });

    let err = runner.run(&sample_content(), &cancel).await.unwrap_err();
    assert!(matches!(
        err.kind(),
        MsightErrorKind::Stage(stage)
            if stage.stage_name == "AnalyzeData" && stage.cause == StageFailure::Cancelled
    ));
}

#[tokio::test]
async fn test_empty_page_still_runs() {
    let driver = MockDriver::counting();
    let runner = runner(driver);

    let result = runner
        .run(&ExtractedContent::default(), &CancellationToken::new())
        .await
        .unwrap();
    assert_eq!(result.len(), 3);
}

#[test]
fn test_plan_creates_pending_tasks() {
    let runner = runner(MockDriver::counting());
    let plan = runner.plan(&sample_content()).unwrap();

    assert_eq!(plan.len(), 3);
    assert!(plan.tasks().iter().all(|t| *t.status() == TaskStatus::Pending));
    assert!(plan.tasks().iter().all(|t| t.output().is_none()));
    assert!(plan.draft().unwrap().input().is_empty());
}
