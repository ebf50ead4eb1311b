//! GitHub runtime for the first-contribution workflow.
//!
//! Wires the pure event model from `fc-github-events` to the GitHub REST API:
//! contributor classification, comment/label/reaction side effects, and the
//! single-event pipeline.

pub mod contributor_status;
pub mod first_contribution_runtime;
pub mod github_api_client;
pub mod github_transport_helpers;
pub mod issue_tracker;
pub mod side_effects;

pub use first_contribution_runtime::{ActionOutputs, FirstContributionRuntime, RunOutcome};
pub use github_api_client::{GithubApiClient, RepoRef};
pub use issue_tracker::{CommitSummary, CreatedComment, GithubApiError, IssueTracker};
