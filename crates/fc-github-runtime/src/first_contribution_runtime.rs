//! Single-delivery pipeline: classify the event, gate on the contributor, then
//! apply the configured reactions, comment, and labels.

use std::sync::Arc;

use anyhow::{Context, Result};
use fc_github_events::action_inputs::{resolve_action_inputs, InputSource};
use fc_github_events::contribution_history::ContributionMode;
use fc_github_events::fc_event::{fc_event, FcEventName};
use fc_github_events::supported_event::{is_supported_event, PayloadAction};
use fc_github_events::webhook_payload::WebhookPayload;

use crate::contributor_status::qualifies_as_first_contribution;
use crate::issue_tracker::IssueTracker;
use crate::side_effects::{add_labels, add_reactions, create_comment, ReactionReport};

const CONTRIBUTION_MODE_INPUT: &str = "contribution-mode";

#[derive(Debug, Clone, PartialEq, Eq)]
/// Values published once a first contribution has been handled.
pub struct ActionOutputs {
    pub comment_url: String,
    pub number: u64,
    pub kind: FcEventName,
    pub username: String,
}

impl ActionOutputs {
    /// Output name/value pairs in publication order.
    pub fn pairs(&self) -> [(&'static str, String); 4] {
        [
            ("comment-url", self.comment_url.clone()),
            ("number", self.number.to_string()),
            ("type", self.kind.as_str().to_string()),
            ("username", self.username.clone()),
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Enumerates supported `RunOutcome` values.
pub enum RunOutcome {
    Unsupported,
    NotQualifying,
    Completed {
        outputs: ActionOutputs,
        reactions: ReactionReport,
        labels_added: bool,
    },
}

/// Handles one webhook delivery against an issue tracker.
pub struct FirstContributionRuntime {
    tracker: Arc<dyn IssueTracker>,
    inputs: Arc<dyn InputSource + Send + Sync>,
}

impl FirstContributionRuntime {
    pub fn new(tracker: Arc<dyn IssueTracker>, inputs: Arc<dyn InputSource + Send + Sync>) -> Self {
        Self { tracker, inputs }
    }

    pub async fn run(&self, event_name: &str, payload: &WebhookPayload) -> Result<RunOutcome> {
        let raw_action = payload.action.as_deref();
        if !is_supported_event(event_name, raw_action) {
            tracing::info!(event_name, action = ?raw_action, "unsupported event, nothing to do");
            return Ok(RunOutcome::Unsupported);
        }
        let Some(action) = raw_action.and_then(PayloadAction::parse) else {
            return Ok(RunOutcome::Unsupported);
        };
        let (Some(contribution), Some(event)) = (payload.contribution(), fc_event(action, payload))
        else {
            tracing::warn!(
                event_name,
                action = action.as_str(),
                "payload carries neither an issue nor a pull request"
            );
            return Ok(RunOutcome::NotQualifying);
        };

        let mode = ContributionMode::from_input(&self.inputs.input(CONTRIBUTION_MODE_INPUT));
        let qualifies = qualifies_as_first_contribution(
            self.tracker.as_ref(),
            action,
            contribution.author_login,
            contribution.kind,
            contribution.number,
            mode,
        )
        .await
        .with_context(|| {
            format!(
                "failed to check contribution history of '{}'",
                contribution.author_login
            )
        })?;
        if !qualifies {
            tracing::info!(
                author = contribution.author_login,
                number = contribution.number,
                "author is not a first-time contributor"
            );
            return Ok(RunOutcome::NotQualifying);
        }

        let inputs = resolve_action_inputs(self.inputs.as_ref(), &event);
        tracing::debug!(
            event = %event.msg_input_name(),
            labels = ?inputs.labels,
            reactions = ?inputs.reactions,
            "resolved action inputs"
        );

        let reactions = add_reactions(
            self.tracker.as_ref(),
            action,
            contribution.number,
            &inputs.reactions,
        )
        .await;
        let comment_url = create_comment(
            self.tracker.as_ref(),
            contribution.number,
            &inputs.msg,
            contribution.author_login,
        )
        .await
        .with_context(|| format!("failed to comment on #{}", contribution.number))?;
        let labels_added = add_labels(
            self.tracker.as_ref(),
            action,
            contribution.number,
            &inputs.labels,
        )
        .await
        .with_context(|| format!("failed to add labels to #{}", contribution.number))?;

        Ok(RunOutcome::Completed {
            outputs: ActionOutputs {
                comment_url,
                number: contribution.number,
                kind: event.name,
                username: contribution.author_login.to_string(),
            },
            reactions,
            labels_added,
        })
    }
}
