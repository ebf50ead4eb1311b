//! Contribution records and the first-time-contributor decisions made over them.
//!
//! A contributor's history is every issue and pull request they created in the
//! repository. The history always includes the contribution that triggered the
//! current webhook delivery, which is why "first time" means a count of one.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
/// Enumerates supported `ContributionKind` values.
pub enum ContributionKind {
    Issue,
    PullRequest,
}

impl ContributionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Issue => "issue",
            Self::PullRequest => "pull_request",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContributionState {
    Open,
    Closed,
}

/// One issue or pull request as listed by the issues endpoint.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ContributionRecord {
    pub number: u64,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub pull_request: Option<Value>,
    #[serde(default)]
    pub state: Option<ContributionState>,
}

impl ContributionRecord {
    /// A record is a pull request iff it carries the `pull_request` marker.
    pub fn kind(&self) -> ContributionKind {
        match self.pull_request {
            Some(_) => ContributionKind::PullRequest,
            None => ContributionKind::Issue,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
/// How first contributions are tracked across issues and pull requests.
pub enum ContributionMode {
    /// A user is a first-timer only for their very first issue or pull request.
    Once,
    /// Issues and pull requests are tracked separately.
    #[default]
    Independent,
}

impl ContributionMode {
    /// Parses the `contribution-mode` input. Anything but `once` selects the default.
    pub fn from_input(raw: &str) -> Self {
        if raw.trim() == "once" {
            Self::Once
        } else {
            Self::Independent
        }
    }
}

pub fn count_of_kind(records: &[ContributionRecord], kind: ContributionKind) -> usize {
    records
        .iter()
        .filter(|record| record.kind() == kind)
        .count()
}

/// Returns the earliest record of `kind` ordered by `(created_at, number)`.
///
/// The order of `records` is irrelevant; identical timestamps fall back to the
/// lower number.
pub fn earliest_of_kind(
    records: &[ContributionRecord],
    kind: ContributionKind,
) -> Option<&ContributionRecord> {
    records
        .iter()
        .filter(|record| record.kind() == kind)
        .min_by_key(|record| (record.created_at, record.number))
}

/// Decides whether `records` describe a first-time contributor for `kind`.
pub fn is_first_time(
    records: &[ContributionRecord],
    kind: ContributionKind,
    mode: ContributionMode,
) -> bool {
    match mode {
        ContributionMode::Once => records.len() == 1,
        ContributionMode::Independent => count_of_kind(records, kind) == 1,
    }
}

/// Returns true when the earliest record of `kind` is the contribution `number`.
pub fn is_earliest_of_kind(
    records: &[ContributionRecord],
    kind: ContributionKind,
    number: u64,
) -> bool {
    earliest_of_kind(records, kind).is_some_and(|earliest| earliest.number == number)
}
