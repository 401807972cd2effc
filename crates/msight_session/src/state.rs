//! Session states, user actions and the transition table between them.

use serde::{Deserialize, Serialize};

/// Where the workflow stands. States are strictly ordered.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    derive_more::Display,
)]
#[serde(rename_all = "snake_case")]
pub enum SessionState {
    /// Nothing loaded yet
    #[default]
    Init,
    /// Page content extracted
    Scraped,
    /// Pipeline run complete, draft available
    Drafted,
    /// Draft refined with feedback
    FeedbackSubmitted,
    /// Video requested (terminal)
    VideoRequested,
}

/// A user action on the session.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::Display,
)]
#[serde(rename_all = "snake_case")]
pub enum SessionAction {
    /// Enter a URL and extract its content
    #[display("submit a URL")]
    SubmitUrl,
    /// Run the generation pipeline
    #[display("generate a draft")]
    GenerateDraft,
    /// Refine the draft with feedback
    #[display("submit feedback")]
    SubmitFeedback,
    /// Ask for the video
    #[display("request a video")]
    RequestVideo,
}

/// One row of the transition table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    /// Lowest state from which the action may run
    pub requires: SessionState,
    /// State the session is rewound to before the action runs; everything
    /// derived after it is discarded
    pub rewinds_to: SessionState,
    /// State reached when the action succeeds
    pub reaches: SessionState,
}

impl SessionAction {
    /// The transition table.
    pub const fn transition(self) -> Transition {
        use SessionState::*;
        match self {
            SessionAction::SubmitUrl => Transition {
                requires: Init,
                rewinds_to: Init,
                reaches: Scraped,
            },
            SessionAction::GenerateDraft => Transition {
                requires: Scraped,
                rewinds_to: Scraped,
                reaches: Drafted,
            },
            SessionAction::SubmitFeedback => Transition {
                requires: Drafted,
                rewinds_to: Drafted,
                reaches: FeedbackSubmitted,
            },
            SessionAction::RequestVideo => Transition {
                requires: FeedbackSubmitted,
                rewinds_to: FeedbackSubmitted,
                reaches: VideoRequested,
            },
        }
    }
}

impl SessionState {
    /// Whether `action` may run from this state.
    ///
    /// # Examples
    ///
    /// ```
    /// use msight_session::{SessionAction, SessionState};
    ///
    /// assert!(SessionState::Init.permits(SessionAction::SubmitUrl));
    /// assert!(!SessionState::Scraped.permits(SessionAction::SubmitFeedback));
    /// assert!(SessionState::VideoRequested.permits(SessionAction::GenerateDraft));
    /// ```
    pub fn permits(self, action: SessionAction) -> bool {
        self >= action.transition().requires
    }

    /// Actions that may run from this state.
    pub fn permitted_actions(self) -> Vec<SessionAction> {
        [
            SessionAction::SubmitUrl,
            SessionAction::GenerateDraft,
            SessionAction::SubmitFeedback,
            SessionAction::RequestVideo,
        ]
        .into_iter()
        .filter(|action| self.permits(*action))
        .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_states_are_linear() {
        use SessionState::*;
        assert!(Init < Scraped);
        assert!(Scraped < Drafted);
        assert!(Drafted < FeedbackSubmitted);
        assert!(FeedbackSubmitted < VideoRequested);
    }

    #[test]
    fn test_each_action_reaches_the_next_state() {
        for action in SessionState::VideoRequested.permitted_actions() {
            let t = action.transition();
            assert_eq!(t.rewinds_to, t.requires);
            assert!(t.reaches > t.rewinds_to, "{action} must move forward");
        }
    }

    #[test]
    fn test_permitted_actions_by_state() {
        assert_eq!(
            SessionState::Init.permitted_actions(),
            vec![SessionAction::SubmitUrl]
        );
        assert_eq!(
            SessionState::Drafted.permitted_actions(),
            vec![
                SessionAction::SubmitUrl,
                SessionAction::GenerateDraft,
                SessionAction::SubmitFeedback
            ]
        );
        assert_eq!(SessionState::FeedbackSubmitted.permitted_actions().len(), 4);
    }
}
