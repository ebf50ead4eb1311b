use std::time::Duration;

use anyhow::{anyhow, bail, Result};
use async_trait::async_trait;
use fc_github_events::contribution_history::ContributionRecord;
use serde::de::DeserializeOwned;
use serde_json::{json, Value};

use crate::github_transport_helpers::error_message_from_body;
use crate::issue_tracker::{CommitSummary, CreatedComment, GithubApiError, IssueTracker};

const CONTRIBUTIONS_PAGE_SIZE: usize = 100;

#[derive(Debug, Clone, PartialEq, Eq)]
/// Repository coordinates in `owner/repo` form.
pub struct RepoRef {
    pub owner: String,
    pub name: String,
}

impl RepoRef {
    pub fn parse(raw: &str) -> Result<Self> {
        let trimmed = raw.trim();
        let (owner, name) = trimmed
            .split_once('/')
            .ok_or_else(|| anyhow!("invalid repository '{raw}', expected owner/repo"))?;
        let owner = owner.trim();
        let name = name.trim();
        if owner.is_empty() || name.is_empty() || name.contains('/') {
            bail!("invalid repository '{raw}', expected owner/repo");
        }
        Ok(Self {
            owner: owner.to_string(),
            name: name.to_string(),
        })
    }

    pub fn as_slug(&self) -> String {
        format!("{}/{}", self.owner, self.name)
    }
}

#[derive(Clone)]
/// GitHub REST client bound to one repository.
pub struct GithubApiClient {
    http: reqwest::Client,
    api_base: String,
    repo: RepoRef,
}

impl GithubApiClient {
    pub fn new(
        api_base: String,
        token: String,
        repo: RepoRef,
        request_timeout_ms: u64,
    ) -> Result<Self, GithubApiError> {
        let mut headers = reqwest::header::HeaderMap::new();
        headers.insert(
            reqwest::header::USER_AGENT,
            reqwest::header::HeaderValue::from_static("first-contribution"),
        );
        headers.insert(
            reqwest::header::ACCEPT,
            reqwest::header::HeaderValue::from_static("application/vnd.github+json"),
        );
        headers.insert(
            "x-github-api-version",
            reqwest::header::HeaderValue::from_static("2022-11-28"),
        );
        let auth_header = format!("Bearer {}", token.trim());
        headers.insert(
            reqwest::header::AUTHORIZATION,
            reqwest::header::HeaderValue::from_str(&auth_header)?,
        );

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_millis(request_timeout_ms.max(1)))
            .build()
            .map_err(GithubApiError::ClientBuild)?;
        Ok(Self {
            http: client,
            api_base: api_base.trim_end_matches('/').to_string(),
            repo,
        })
    }

    pub fn repo(&self) -> &RepoRef {
        &self.repo
    }

    fn repo_url(&self, path: &str) -> String {
        format!(
            "{}/repos/{}/{}/{}",
            self.api_base, self.repo.owner, self.repo.name, path
        )
    }

    async fn send(
        &self,
        operation: &str,
        request: reqwest::RequestBuilder,
    ) -> Result<reqwest::Response, GithubApiError> {
        tracing::debug!(operation, repo = %self.repo.as_slug(), "github api request");
        let response = request
            .send()
            .await
            .map_err(|source| GithubApiError::Transport {
                operation: operation.to_string(),
                source,
            })?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        Err(GithubApiError::Status {
            operation: operation.to_string(),
            status: status.as_u16(),
            message: error_message_from_body(&body),
        })
    }

    async fn request_json<T>(
        &self,
        operation: &str,
        request: reqwest::RequestBuilder,
    ) -> Result<T, GithubApiError>
    where
        T: DeserializeOwned,
    {
        let response = self.send(operation, request).await?;
        response
            .json::<T>()
            .await
            .map_err(|source| GithubApiError::Decode {
                operation: operation.to_string(),
                source,
            })
    }
}

#[async_trait]
impl IssueTracker for GithubApiClient {
    async fn list_contributions(
        &self,
        creator: &str,
    ) -> Result<Vec<ContributionRecord>, GithubApiError> {
        let mut page = 1_u32;
        let mut rows = Vec::new();
        loop {
            let page_value = page.to_string();
            let per_page = CONTRIBUTIONS_PAGE_SIZE.to_string();
            let request = self.http.get(self.repo_url("issues")).query(&[
                ("creator", creator),
                ("state", "all"),
                ("sort", "created"),
                ("direction", "asc"),
                ("per_page", per_page.as_str()),
                ("page", page_value.as_str()),
            ]);
            let chunk: Vec<ContributionRecord> =
                self.request_json("list contributions", request).await?;
            let chunk_len = chunk.len();
            rows.extend(chunk);
            if chunk_len < CONTRIBUTIONS_PAGE_SIZE {
                break;
            }
            page = page.saturating_add(1);
        }
        tracing::debug!(creator, count = rows.len(), "listed contributions");
        Ok(rows)
    }

    async fn list_commits_by_author(
        &self,
        author: &str,
    ) -> Result<Vec<CommitSummary>, GithubApiError> {
        let request = self
            .http
            .get(self.repo_url("commits"))
            .query(&[("author", author), ("per_page", "1")]);
        match self.request_json("list commits", request).await {
            // empty repository
            Err(GithubApiError::Status { status: 409, .. }) => Ok(Vec::new()),
            other => other,
        }
    }

    async fn create_comment(
        &self,
        issue_number: u64,
        body: &str,
    ) -> Result<CreatedComment, GithubApiError> {
        let payload = json!({ "body": body });
        let request = self
            .http
            .post(self.repo_url(&format!("issues/{issue_number}/comments")))
            .json(&payload);
        self.request_json("create issue comment", request).await
    }

    async fn add_labels(
        &self,
        issue_number: u64,
        labels: &[String],
    ) -> Result<(), GithubApiError> {
        let payload = json!({ "labels": labels });
        let request = self
            .http
            .post(self.repo_url(&format!("issues/{issue_number}/labels")))
            .json(&payload);
        self.request_json::<Value>("add labels", request).await?;
        Ok(())
    }

    async fn add_reaction(&self, issue_number: u64, content: &str) -> Result<(), GithubApiError> {
        let payload = json!({ "content": content });
        let request = self
            .http
            .post(self.repo_url(&format!("issues/{issue_number}/reactions")))
            .json(&payload);
        self.request_json::<Value>("add reaction", request).await?;
        Ok(())
    }
}
