use std::{collections::BTreeMap, sync::Arc};

use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use fc_github_events::contribution_history::ContributionRecord;
use fc_github_events::fc_event::FcEventName;
use fc_github_events::webhook_payload::WebhookPayload;
use fc_github_runtime::{
    CommitSummary, CreatedComment, FirstContributionRuntime, GithubApiClient, GithubApiError,
    IssueTracker, RepoRef, RunOutcome,
};
use httpmock::prelude::*;
use serde_json::json;
use tokio::sync::Mutex as AsyncMutex;

#[derive(Debug, Clone, PartialEq, Eq)]
enum Call {
    Contributions(String),
    Commits(String),
    Comment(u64, String),
    Labels(u64, Vec<String>),
    Reaction(u64, String),
}

struct ScriptedTracker {
    contributions: Vec<ContributionRecord>,
    commits: Vec<CommitSummary>,
    calls: AsyncMutex<Vec<Call>>,
}

impl ScriptedTracker {
    fn new(contributions: Vec<ContributionRecord>, commits: Vec<CommitSummary>) -> Self {
        Self {
            contributions,
            commits,
            calls: AsyncMutex::new(Vec::new()),
        }
    }

    async fn calls(&self) -> Vec<Call> {
        self.calls.lock().await.clone()
    }
}

#[async_trait]
impl IssueTracker for ScriptedTracker {
    async fn list_contributions(
        &self,
        creator: &str,
    ) -> Result<Vec<ContributionRecord>, GithubApiError> {
        self.calls
            .lock()
            .await
            .push(Call::Contributions(creator.to_string()));
        Ok(self.contributions.clone())
    }

    async fn list_commits_by_author(
        &self,
        author: &str,
    ) -> Result<Vec<CommitSummary>, GithubApiError> {
        self.calls.lock().await.push(Call::Commits(author.to_string()));
        Ok(self.commits.clone())
    }

    async fn create_comment(
        &self,
        issue_number: u64,
        body: &str,
    ) -> Result<CreatedComment, GithubApiError> {
        self.calls
            .lock()
            .await
            .push(Call::Comment(issue_number, body.to_string()));
        Ok(CreatedComment {
            id: 99,
            html_url: Some(format!("https://example.test/{issue_number}#comment")),
        })
    }

    async fn add_labels(
        &self,
        issue_number: u64,
        labels: &[String],
    ) -> Result<(), GithubApiError> {
        self.calls
            .lock()
            .await
            .push(Call::Labels(issue_number, labels.to_vec()));
        Ok(())
    }

    async fn add_reaction(&self, issue_number: u64, content: &str) -> Result<(), GithubApiError> {
        self.calls
            .lock()
            .await
            .push(Call::Reaction(issue_number, content.to_string()));
        if content == "rocket" {
            return Err(GithubApiError::Status {
                operation: "create reaction".to_string(),
                status: 422,
                message: "Validation Failed".to_string(),
            });
        }
        Ok(())
    }
}

fn record(number: u64, day: u32, pull_request: bool) -> ContributionRecord {
    ContributionRecord {
        number,
        created_at: Utc
            .with_ymd_and_hms(2025, 3, day, 12, 0, 0)
            .single()
            .expect("valid timestamp"),
        pull_request: pull_request.then(|| json!({})),
        state: None,
    }
}

fn inputs(pairs: &[(&str, &str)]) -> Arc<BTreeMap<String, String>> {
    Arc::new(
        pairs
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect(),
    )
}

fn payload(raw: serde_json::Value) -> WebhookPayload {
    serde_json::from_value(raw).expect("payload should deserialize")
}

#[tokio::test]
async fn integration_opened_pull_request_reacts_comments_and_labels_in_order() {
    let tracker = Arc::new(ScriptedTracker::new(
        vec![record(5, 1, false), record(8, 2, true)],
        Vec::new(),
    ));
    let runtime = FirstContributionRuntime::new(
        tracker.clone(),
        inputs(&[
            ("pr-opened-msg", "Thanks @{{username}}, welcome aboard!"),
            ("pr-labels", "first-pr, needs review"),
            ("reactions", "heart,rocket"),
        ]),
    );

    let outcome = runtime
        .run(
            "pull_request_target",
            &payload(json!({
                "action": "opened",
                "pull_request": {"number": 8, "user": {"login": "newcomer"}}
            })),
        )
        .await
        .expect("pipeline should succeed");

    let RunOutcome::Completed {
        outputs,
        reactions,
        labels_added,
    } = outcome
    else {
        panic!("expected completed outcome, got {outcome:?}");
    };
    assert_eq!(outputs.comment_url, "https://example.test/8#comment");
    assert_eq!(outputs.number, 8);
    assert_eq!(outputs.kind, FcEventName::Pr);
    assert_eq!(outputs.username, "newcomer");
    assert_eq!(reactions.added, vec!["heart".to_string()]);
    assert_eq!(reactions.failed, vec!["rocket".to_string()]);
    assert!(labels_added);
    assert_eq!(
        tracker.calls().await,
        vec![
            Call::Commits("newcomer".to_string()),
            Call::Contributions("newcomer".to_string()),
            Call::Reaction(8, "heart".to_string()),
            Call::Reaction(8, "rocket".to_string()),
            Call::Comment(8, "Thanks @newcomer, welcome aboard!".to_string()),
            Call::Labels(
                8,
                vec!["first-pr".to_string(), "needs review".to_string()]
            ),
        ]
    );
}

#[tokio::test]
async fn integration_once_mode_rejects_pull_request_after_earlier_issue() {
    let tracker = Arc::new(ScriptedTracker::new(
        vec![record(5, 1, false), record(8, 2, true)],
        Vec::new(),
    ));
    let runtime = FirstContributionRuntime::new(
        tracker.clone(),
        inputs(&[("contribution-mode", "once"), ("pr-opened-msg", "Welcome!")]),
    );

    let outcome = runtime
        .run(
            "pull_request",
            &payload(json!({
                "action": "opened",
                "pull_request": {"number": 8, "user": {"login": "newcomer"}}
            })),
        )
        .await
        .expect("pipeline should succeed");

    assert_eq!(outcome, RunOutcome::NotQualifying);
    assert!(!tracker
        .calls()
        .await
        .iter()
        .any(|call| matches!(call, Call::Comment(..) | Call::Labels(..))));
}

#[tokio::test]
async fn integration_closed_issue_only_comments_for_earliest_issue() {
    let tracker = Arc::new(ScriptedTracker::new(
        vec![record(11, 4, false), record(3, 2, false)],
        vec![CommitSummary {
            sha: "abc123".to_string(),
        }],
    ));
    let runtime = FirstContributionRuntime::new(
        tracker.clone(),
        inputs(&[
            ("issue-completed-msg", "Resolved, thanks @{{username}}."),
            ("labels", "first-timer"),
            ("reactions", "hooray"),
        ]),
    );

    let outcome = runtime
        .run(
            "issues",
            &payload(json!({
                "action": "closed",
                "issue": {
                    "number": 3,
                    "user": {"login": "reporter"},
                    "state_reason": "completed"
                }
            })),
        )
        .await
        .expect("pipeline should succeed");

    let RunOutcome::Completed {
        outputs,
        reactions,
        labels_added,
    } = outcome
    else {
        panic!("expected completed outcome, got {outcome:?}");
    };
    assert_eq!(outputs.number, 3);
    assert_eq!(outputs.kind, FcEventName::Issue);
    assert!(reactions.added.is_empty());
    assert!(!labels_added);
    assert_eq!(
        tracker.calls().await,
        vec![
            Call::Contributions("reporter".to_string()),
            Call::Comment(3, "Resolved, thanks @reporter.".to_string()),
        ]
    );
}

#[tokio::test]
async fn integration_runtime_drives_github_rest_api_end_to_end() {
    let server = MockServer::start();
    let commits = server.mock(|when, then| {
        when.method(GET)
            .path("/repos/owner/repo/commits")
            .query_param("author", "first-timer")
            .header("authorization", "Bearer integration-token");
        then.status(409)
            .json_body(json!({"message": "Git Repository is empty."}));
    });
    let history = server.mock(|when, then| {
        when.method(GET)
            .path("/repos/owner/repo/issues")
            .query_param("creator", "first-timer")
            .query_param("state", "all");
        then.status(200).json_body(json!([
            {"number": 1, "created_at": "2025-04-01T08:00:00Z", "state": "open"}
        ]));
    });
    let reaction = server.mock(|when, then| {
        when.method(POST)
            .path("/repos/owner/repo/issues/1/reactions")
            .json_body(json!({"content": "eyes"}));
        then.status(201).json_body(json!({"id": 10, "content": "eyes"}));
    });
    let comment = server.mock(|when, then| {
        when.method(POST)
            .path("/repos/owner/repo/issues/1/comments")
            .json_body(json!({"body": "Hi @first-timer"}));
        then.status(201).json_body(json!({
            "id": 77,
            "html_url": "https://github.test/owner/repo/issues/1#issuecomment-77"
        }));
    });

    let client = GithubApiClient::new(
        server.base_url(),
        "integration-token".to_string(),
        RepoRef::parse("owner/repo").expect("repo"),
        5_000,
    )
    .expect("client");
    let runtime = FirstContributionRuntime::new(
        Arc::new(client),
        inputs(&[
            ("issue-opened-msg", "issue-completed-msg"),
            ("issue-completed-msg", "Hi @{{username}}"),
            ("issue-reactions", "eyes"),
        ]),
    );

    let outcome = runtime
        .run(
            "issues",
            &payload(json!({
                "action": "opened",
                "issue": {"number": 1, "user": {"login": "first-timer"}}
            })),
        )
        .await
        .expect("pipeline should succeed");

    commits.assert();
    history.assert();
    reaction.assert();
    comment.assert();
    let RunOutcome::Completed { outputs, .. } = outcome else {
        panic!("expected completed outcome, got {outcome:?}");
    };
    assert_eq!(
        outputs.comment_url,
        "https://github.test/owner/repo/issues/1#issuecomment-77"
    );
}
