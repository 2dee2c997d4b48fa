//! Commit-tracker configuration loaded from environment variables.

use anyhow::{Context, Result};

#[derive(Clone, Debug)]
pub struct Config {
    /// Repository owner on GitHub.
    pub owner: String,
    /// Repository name whose commits drive the score.
    pub repo: String,
    /// Personal access token for the commit-listing API.
    pub token: String,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self> {
        let owner =
            std::env::var("CADENCE_GITHUB_OWNER").context("CADENCE_GITHUB_OWNER is required")?;
        let repo =
            std::env::var("CADENCE_GITHUB_REPO").context("CADENCE_GITHUB_REPO is required")?;
        let token =
            std::env::var("CADENCE_GITHUB_TOKEN").context("CADENCE_GITHUB_TOKEN is required")?;

        Ok(Config { owner, repo, token })
    }
}
