//! GitHub commit-listing signal source.
//!
//! One request per tracked day: the commit list for the repository,
//! bounded to the day's UTC window, capped at a single result — the
//! tracker only needs "at least one commit", not the commits themselves.

use async_trait::async_trait;
use chrono::{NaiveDate, SecondsFormat};
use reqwest::header;
use tracing::debug;

use cadence_core::date::day_window;
use cadence_core::error::SourceError;
use cadence_core::traits::SignalSource;

const GITHUB_API: &str = "https://api.github.com";
const PROVIDER: &str = "github";

/// Commit-occurrence source for one GitHub repository.
pub struct GithubCommitSource {
    client: reqwest::Client,
    base_url: String,
    owner: String,
    repo: String,
    token: String,
}

impl GithubCommitSource {
    /// Create a source for `owner/repo`, authenticating with a personal
    /// access token.
    pub fn new(
        owner: impl Into<String>,
        repo: impl Into<String>,
        token: impl Into<String>,
    ) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: GITHUB_API.to_string(),
            owner: owner.into(),
            repo: repo.into(),
            token: token.into(),
        }
    }

    /// Point the source at a different API host (GitHub Enterprise).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    fn commits_url(&self) -> String {
        format!("{}/repos/{}/{}/commits", self.base_url, self.owner, self.repo)
    }
}

#[async_trait]
impl SignalSource for GithubCommitSource {
    async fn occurred_on(&self, day: NaiveDate) -> Result<bool, SourceError> {
        let (since, until) = day_window(day);

        let response = self
            .client
            .get(self.commits_url())
            .query(&[
                ("since", since.to_rfc3339_opts(SecondsFormat::Secs, true)),
                ("until", until.to_rfc3339_opts(SecondsFormat::Secs, true)),
                ("per_page", "1".to_string()),
            ])
            .header(header::AUTHORIZATION, format!("Bearer {}", self.token))
            .header(header::ACCEPT, "application/vnd.github+json")
            .header(header::USER_AGENT, "cadence-tracker")
            .send()
            .await
            .map_err(|e| SourceError::Http(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(SourceError::Status { provider: PROVIDER, status: status.as_u16() });
        }

        let commits: Vec<serde_json::Value> = response
            .json()
            .await
            .map_err(|e| SourceError::Malformed { provider: PROVIDER, detail: e.to_string() })?;

        let had_commit = !commits.is_empty();
        debug!(%day, had_commit, "commit window checked");
        Ok(had_commit)
    }
}
