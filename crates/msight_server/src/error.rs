//! HTTP status and banner text for session action errors.

use axum::http::StatusCode;
use msight_error::{MsightError, MsightErrorKind, SessionErrorKind, StageFailure};

/// HTTP status reported for a failed action.
///
/// Session misuse is the client's fault (409 for an out-of-order action, 422
/// for blank input), upstream failures are 502, interrupted calls are 504.
pub fn status_for(err: &MsightError) -> StatusCode {
    match err.kind() {
        MsightErrorKind::Session(e) => match e.kind {
            SessionErrorKind::InvalidTransition { .. } => StatusCode::CONFLICT,
            SessionErrorKind::EmptyUrl | SessionErrorKind::EmptyFeedback => {
                StatusCode::UNPROCESSABLE_ENTITY
            }
        },
        MsightErrorKind::Fetch(_) | MsightErrorKind::Parse(_) | MsightErrorKind::Gemini(_) => {
            StatusCode::BAD_GATEWAY
        }
        MsightErrorKind::Stage(e) => match e.cause {
            StageFailure::Generation(_) | StageFailure::EmptyOutput => StatusCode::BAD_GATEWAY,
            StageFailure::TimedOut { .. } | StageFailure::Cancelled => StatusCode::GATEWAY_TIMEOUT,
        },
        MsightErrorKind::Interrupted(_) => StatusCode::GATEWAY_TIMEOUT,
        MsightErrorKind::ReplayTargetNotFound(_)
        | MsightErrorKind::Config(_)
        | MsightErrorKind::Json(_)
        | MsightErrorKind::Server(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// Message shown in the error banner.
///
/// Source locations stay in the logs.
pub fn banner_for(err: &MsightError) -> String {
    match err.kind() {
        MsightErrorKind::Session(e) => e.kind.to_string(),
        MsightErrorKind::Fetch(e) => format!("Could not load the website. {}", e.kind),
        MsightErrorKind::Parse(e) => format!("Could not read the website. {}", e.message),
        MsightErrorKind::Stage(e) => format!("Step '{}' failed: {}", e.stage_name, e.cause),
        MsightErrorKind::Interrupted(e) => format!("Step '{}' {}", e.operation, e.kind),
        MsightErrorKind::Gemini(e) => format!("Text generation failed: {}", e.kind),
        _ => "Something went wrong. Check the server logs for details.".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use msight_error::{
        FetchError, FetchErrorKind, InterruptedError, Interruption, ReplayTargetNotFoundError,
        SessionError, StageExecutionError,
    };

    #[test]
    fn test_session_misuse_is_a_client_error() {
        let out_of_order: MsightError = SessionError::new(SessionErrorKind::InvalidTransition {
            state: "Init".into(),
            action: "generate a draft".into(),
        })
        .into();
        assert_eq!(status_for(&out_of_order), StatusCode::CONFLICT);

        let blank: MsightError = SessionError::new(SessionErrorKind::EmptyUrl).into();
        assert_eq!(status_for(&blank), StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(banner_for(&blank), "A website URL is required");
    }

    #[test]
    fn test_upstream_failures_are_bad_gateway() {
        let fetch: MsightError = FetchError::new(FetchErrorKind::Status {
            status: 404,
            url: "http://example.test".into(),
        })
        .into();
        assert_eq!(status_for(&fetch), StatusCode::BAD_GATEWAY);
        assert!(banner_for(&fetch).contains("HTTP 404"));

        let stage: MsightError =
            StageExecutionError::new("id", "DraftScript", StageFailure::EmptyOutput).into();
        assert_eq!(status_for(&stage), StatusCode::BAD_GATEWAY);
        assert!(banner_for(&stage).contains("DraftScript"));
    }

    #[test]
    fn test_interruptions_are_gateway_timeouts() {
        let fetch: MsightError =
            InterruptedError::new("extract", Interruption::TimedOut { seconds: 30 }).into();
        assert_eq!(status_for(&fetch), StatusCode::GATEWAY_TIMEOUT);
        assert_eq!(banner_for(&fetch), "Step 'extract' timed out after 30s");

        let stage: MsightError =
            StageExecutionError::new("id", "AnalyzeData", StageFailure::Cancelled).into();
        assert_eq!(status_for(&stage), StatusCode::GATEWAY_TIMEOUT);
    }

    #[test]
    fn test_internal_errors_hide_details() {
        let err: MsightError = ReplayTargetNotFoundError::new("missing").into();
        assert_eq!(status_for(&err), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(!banner_for(&err).contains("missing"));
    }
}
