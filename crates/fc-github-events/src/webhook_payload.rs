use serde::{Deserialize, Serialize};

use crate::contribution_history::ContributionKind;

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
/// Public struct `WebhookUser` used across first-contribution components.
pub struct WebhookUser {
    pub login: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
/// Issue object carried by an `issues` webhook delivery.
pub struct WebhookIssue {
    pub number: u64,
    pub user: WebhookUser,
    #[serde(default)]
    pub state_reason: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
/// Pull request object carried by `pull_request` and `pull_request_target` deliveries.
pub struct WebhookPullRequest {
    pub number: u64,
    pub user: WebhookUser,
    #[serde(default)]
    pub merged: Option<bool>,
    #[serde(default)]
    pub author_association: Option<String>,
}

/// The subset of a GitHub webhook payload the workflow reads.
///
/// Unknown fields are ignored so full deliveries deserialize directly.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct WebhookPayload {
    #[serde(default)]
    pub action: Option<String>,
    #[serde(default)]
    pub issue: Option<WebhookIssue>,
    #[serde(default)]
    pub pull_request: Option<WebhookPullRequest>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// The issue or pull request a payload is about.
pub struct PayloadContribution<'a> {
    pub kind: ContributionKind,
    pub number: u64,
    pub author_login: &'a str,
}

impl WebhookPayload {
    pub fn from_json_str(raw: &str) -> serde_json::Result<Self> {
        serde_json::from_str(raw)
    }

    /// Returns the pull request when present, otherwise the issue.
    pub fn contribution(&self) -> Option<PayloadContribution<'_>> {
        if let Some(pull_request) = &self.pull_request {
            return Some(PayloadContribution {
                kind: ContributionKind::PullRequest,
                number: pull_request.number,
                author_login: pull_request.user.login.as_str(),
            });
        }
        self.issue.as_ref().map(|issue| PayloadContribution {
            kind: ContributionKind::Issue,
            number: issue.number,
            author_login: issue.user.login.as_str(),
        })
    }
}
