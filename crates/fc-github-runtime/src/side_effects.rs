use fc_github_events::supported_event::PayloadAction;

use crate::issue_tracker::{GithubApiError, IssueTracker};

/// Placeholder replaced by the author's login in comment bodies.
pub const AUTHOR_USERNAME_PLACEHOLDER: &str = "{{username}}";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
/// Outcome of adding reactions; failures never abort the run.
pub struct ReactionReport {
    pub added: Vec<String>,
    pub failed: Vec<String>,
}

pub fn render_comment_body(body: &str, author_username: &str) -> String {
    body.trim()
        .replace(AUTHOR_USERNAME_PLACEHOLDER, author_username)
}

/// Posts `body` on the issue or pull request and returns the comment URL.
///
/// Returns an empty string without calling the tracker when `body` is blank.
pub async fn create_comment<T: IssueTracker + ?Sized>(
    tracker: &T,
    issue_number: u64,
    body: &str,
    author_username: &str,
) -> Result<String, GithubApiError> {
    if body.trim().is_empty() {
        tracing::info!(issue_number, "no message configured, skipping comment");
        return Ok(String::new());
    }
    let body = render_comment_body(body, author_username);
    let comment = tracker.create_comment(issue_number, &body).await?;
    let url = comment.html_url.unwrap_or_default();
    tracing::info!(issue_number, comment_url = %url, "created comment");
    Ok(url)
}

/// Adds `labels` to a newly opened issue or pull request.
///
/// Returns whether the tracker was called. Labels are never added on close.
pub async fn add_labels<T: IssueTracker + ?Sized>(
    tracker: &T,
    action: PayloadAction,
    issue_number: u64,
    labels: &[String],
) -> Result<bool, GithubApiError> {
    if action != PayloadAction::Opened || labels.is_empty() {
        return Ok(false);
    }
    // fails when a label does not exist in the repository
    tracker.add_labels(issue_number, labels).await?;
    tracing::info!(issue_number, labels = ?labels, "added labels");
    Ok(true)
}

/// Adds each reaction independently; a rejected reaction is logged and skipped.
pub async fn add_reactions<T: IssueTracker + ?Sized>(
    tracker: &T,
    action: PayloadAction,
    issue_number: u64,
    reactions: &[String],
) -> ReactionReport {
    let mut report = ReactionReport::default();
    if action != PayloadAction::Opened || reactions.is_empty() {
        tracing::info!(issue_number, "no reaction was added");
        return report;
    }

    tracing::debug!(issue_number, reactions = ?reactions, "adding reactions");
    for reaction in reactions {
        match tracker.add_reaction(issue_number, reaction).await {
            Ok(()) => report.added.push(reaction.clone()),
            Err(error) => {
                tracing::warn!(issue_number, reaction = %reaction, %error, "failed to add reaction");
                report.failed.push(reaction.clone());
            }
        }
    }

    if !report.added.is_empty() {
        tracing::info!(issue_number, added = ?report.added, "reactions added");
    }
    if !report.failed.is_empty() {
        tracing::warn!(issue_number, failed = ?report.failed, "failed to add reaction(s)");
    }
    report
}
