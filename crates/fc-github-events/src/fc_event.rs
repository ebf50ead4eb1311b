use std::fmt;

use serde::{Deserialize, Serialize};

use crate::supported_event::PayloadAction;
use crate::webhook_payload::WebhookPayload;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
/// Where a first-contribution event occurred.
pub enum FcEventName {
    Issue,
    Pr,
}

impl FcEventName {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Issue => "issue",
            Self::Pr => "pr",
        }
    }
}

impl fmt::Display for FcEventName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
/// Lifecycle state of the issue or pull request behind an event.
pub enum FcEventState {
    Opened,
    Completed,
    NotPlanned,
    Merged,
    Closed,
}

impl FcEventState {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Opened => "opened",
            Self::Completed => "completed",
            Self::NotPlanned => "not-planned",
            Self::Merged => "merged",
            Self::Closed => "closed",
        }
    }
}

impl fmt::Display for FcEventState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Normalized first-contribution event derived from a webhook delivery.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FcEvent {
    pub name: FcEventName,
    pub state: FcEventState,
}

impl FcEvent {
    /// Name of the `-msg` input configured for this event, e.g. `pr-merged-msg`.
    pub fn msg_input_name(&self) -> String {
        format!("{}-{}-msg", self.name, self.state)
    }
}

/// Builds the [`FcEvent`] for a supported action.
///
/// Returns `None` when the payload carries neither an issue nor a pull request.
pub fn fc_event(action: PayloadAction, payload: &WebhookPayload) -> Option<FcEvent> {
    if let Some(pull_request) = &payload.pull_request {
        let state = match action {
            PayloadAction::Opened => FcEventState::Opened,
            PayloadAction::Closed if pull_request.merged == Some(true) => FcEventState::Merged,
            PayloadAction::Closed => FcEventState::Closed,
        };
        return Some(FcEvent {
            name: FcEventName::Pr,
            state,
        });
    }

    let issue = payload.issue.as_ref()?;
    let state = match action {
        PayloadAction::Opened => FcEventState::Opened,
        PayloadAction::Closed if issue.state_reason.as_deref() == Some("completed") => {
            FcEventState::Completed
        }
        // any other reason, including a missing one
        PayloadAction::Closed => FcEventState::NotPlanned,
    };
    Some(FcEvent {
        name: FcEventName::Issue,
        state,
    })
}
