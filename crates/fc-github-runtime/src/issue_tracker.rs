use async_trait::async_trait;
use fc_github_events::contribution_history::ContributionRecord;
use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
/// Public struct `CreatedComment` used across first-contribution components.
pub struct CreatedComment {
    pub id: u64,
    #[serde(default)]
    pub html_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CommitSummary {
    pub sha: String,
}

#[derive(Debug, Error)]
/// Enumerates supported `GithubApiError` values.
pub enum GithubApiError {
    #[error("invalid github authorization header")]
    InvalidHeader(#[from] reqwest::header::InvalidHeaderValue),
    #[error("failed to create github api client: {0}")]
    ClientBuild(#[source] reqwest::Error),
    #[error("github api {operation} request failed: {source}")]
    Transport {
        operation: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("failed to decode github {operation}: {source}")]
    Decode {
        operation: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("github api {operation} failed with status {status}: {message}")]
    Status {
        operation: String,
        status: u16,
        message: String,
    },
}

impl GithubApiError {
    /// HTTP status of a rejected request, if the API answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Trait contract for the issue tracker operations the workflow needs.
///
/// Implementations are bound to a single repository.
#[async_trait]
pub trait IssueTracker: Send + Sync {
    /// Every issue and pull request created by `creator`, in any state.
    async fn list_contributions(
        &self,
        creator: &str,
    ) -> Result<Vec<ContributionRecord>, GithubApiError>;

    /// At most one commit authored by `author`; used as an existence check.
    async fn list_commits_by_author(
        &self,
        author: &str,
    ) -> Result<Vec<CommitSummary>, GithubApiError>;

    async fn create_comment(
        &self,
        issue_number: u64,
        body: &str,
    ) -> Result<CreatedComment, GithubApiError>;

    async fn add_labels(&self, issue_number: u64, labels: &[String])
        -> Result<(), GithubApiError>;

    async fn add_reaction(&self, issue_number: u64, content: &str) -> Result<(), GithubApiError>;
}
