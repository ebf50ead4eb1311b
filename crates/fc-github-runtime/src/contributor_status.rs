//! Decides whether the author of an issue or pull request counts as a first-time
//! contributor, querying the tracker for their full history on every call.

use fc_github_events::contribution_history::{
    earliest_of_kind, is_first_time, ContributionKind, ContributionMode,
};
use fc_github_events::supported_event::PayloadAction;

use crate::issue_tracker::{GithubApiError, IssueTracker};

/// Checks whether `creator` is a first-time contributor when opening a
/// contribution of `kind`.
///
/// A user with any authored commit in the repository is an existing
/// contributor regardless of their issue and pull request history.
pub async fn is_first_time_contributor<T: IssueTracker + ?Sized>(
    tracker: &T,
    creator: &str,
    kind: ContributionKind,
    mode: ContributionMode,
) -> Result<bool, GithubApiError> {
    let commits = tracker.list_commits_by_author(creator).await?;
    if !commits.is_empty() {
        tracing::info!(creator, "author has commits in the repository");
        return Ok(false);
    }

    let contributions = tracker.list_contributions(creator).await?;
    let first_time = is_first_time(&contributions, kind, mode);
    tracing::info!(
        creator,
        kind = kind.as_str(),
        mode = ?mode,
        contribution_count = contributions.len(),
        first_time,
        "classified contributor"
    );
    Ok(first_time)
}

/// Checks whether contribution `number` was the first of its `kind` that
/// `creator` ever opened.
pub async fn was_the_first_contribution<T: IssueTracker + ?Sized>(
    tracker: &T,
    creator: &str,
    kind: ContributionKind,
    number: u64,
) -> Result<bool, GithubApiError> {
    let contributions = tracker.list_contributions(creator).await?;
    let Some(first) = earliest_of_kind(&contributions, kind) else {
        // the closed contribution should always be part of its author's history
        tracing::warn!(
            creator,
            kind = kind.as_str(),
            number,
            history = %serde_json::to_string(&contributions).unwrap_or_default(),
            "no contributions of this kind found for author"
        );
        return Ok(false);
    };
    tracing::info!(
        creator,
        kind = kind.as_str(),
        first_number = first.number,
        number,
        "found author's first contribution"
    );
    Ok(first.number == number)
}

/// Runs the check matching the payload action.
pub async fn qualifies_as_first_contribution<T: IssueTracker + ?Sized>(
    tracker: &T,
    action: PayloadAction,
    creator: &str,
    kind: ContributionKind,
    number: u64,
    mode: ContributionMode,
) -> Result<bool, GithubApiError> {
    match action {
        PayloadAction::Opened => is_first_time_contributor(tracker, creator, kind, mode).await,
        PayloadAction::Closed => was_the_first_contribution(tracker, creator, kind, number).await,
    }
}
