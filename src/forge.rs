// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! Thin client for the hosted forge API (GitHub REST)
//!
//! Only the handful of endpoints the publisher needs: user lookup, repository
//! metadata, pull-request create/query, and a contents probe for duplicate
//! detection. Failures surface directly; nothing is retried.

use crate::types::PrState;
use anyhow::{bail, Context, Result};
use reqwest::blocking::Client;
use reqwest::StatusCode;
use serde::Deserialize;

const USER_AGENT: &str = concat!("fihrist/", env!("CARGO_PKG_VERSION"));

/// A pull request as returned by the forge
#[derive(Debug, Clone, Deserialize)]
pub struct PullRequest {
    /// PR number
    pub number: u64,
    /// HTML URL of the PR
    pub html_url: String,
    /// `open` or `closed`
    pub state: String,
}

impl PullRequest {
    /// Map the forge's state string onto [`PrState`]
    #[must_use]
    pub fn pr_state(&self) -> PrState {
        state_from_str(&self.state)
    }
}

#[derive(Debug, Deserialize)]
struct RepoInfo {
    default_branch: String,
}

/// Forge API client
pub struct Forge {
    client: Client,
    api_base: String,
    token: Option<String>,
}

impl Forge {
    /// Create a client against the public GitHub API
    pub fn new(token: Option<String>) -> Result<Self> {
        Self::with_base("https://api.github.com", token)
    }

    /// Create a client against an arbitrary API base URL
    pub fn with_base(api_base: impl Into<String>, token: Option<String>) -> Result<Self> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            client,
            api_base: api_base.into().trim_end_matches('/').to_string(),
            token,
        })
    }

    fn get(&self, path: &str) -> reqwest::blocking::RequestBuilder {
        let builder = self
            .client
            .get(format!("{}{path}", self.api_base))
            .header("Accept", "application/vnd.github+json");
        match &self.token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    fn post(&self, path: &str) -> reqwest::blocking::RequestBuilder {
        let builder = self
            .client
            .post(format!("{}{path}", self.api_base))
            .header("Accept", "application/vnd.github+json");
        match &self.token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    /// Whether `login` names an existing user on the forge
    pub fn user_exists(&self, login: &str) -> Result<bool> {
        let response = self
            .get(&format!("/users/{login}"))
            .send()
            .with_context(|| format!("Failed to look up user {login}"))?;

        match response.status() {
            StatusCode::OK => Ok(true),
            StatusCode::NOT_FOUND => Ok(false),
            status => bail!("User lookup for {login} failed: {status}"),
        }
    }

    /// Default branch of `owner/repo`
    pub fn default_branch(&self, slug: &str) -> Result<String> {
        let response = self
            .get(&format!("/repos/{slug}"))
            .send()
            .with_context(|| format!("Failed to look up repository {slug}"))?;

        if !response.status().is_success() {
            bail!("Repository lookup for {slug} failed: {}", response.status());
        }

        let info: RepoInfo = response
            .json()
            .with_context(|| format!("Failed to parse repository metadata for {slug}"))?;
        Ok(info.default_branch)
    }

    /// Open a pull request from `head` into `base`
    pub fn create_pull(
        &self,
        slug: &str,
        title: &str,
        body: &str,
        head: &str,
        base: &str,
    ) -> Result<PullRequest> {
        let response = self
            .post(&format!("/repos/{slug}/pulls"))
            .json(&serde_json::json!({
                "title": title,
                "body": body,
                "head": head,
                "base": base,
            }))
            .send()
            .with_context(|| format!("Failed to open pull request on {slug}"))?;

        if !response.status().is_success() {
            let status = response.status();
            let detail = response.text().unwrap_or_default();
            bail!("Opening pull request on {slug} failed: {status}: {detail}");
        }

        response
            .json()
            .context("Failed to parse pull-request response")
    }

    /// Current state of pull request `number` on `owner/repo`
    pub fn pull_state(&self, slug: &str, number: u64) -> Result<PrState> {
        let response = self
            .get(&format!("/repos/{slug}/pulls/{number}"))
            .send()
            .with_context(|| format!("Failed to look up PR #{number} on {slug}"))?;

        if !response.status().is_success() {
            bail!(
                "PR lookup for #{number} on {slug} failed: {}",
                response.status()
            );
        }

        let pr: PullRequest = response
            .json()
            .with_context(|| format!("Failed to parse PR #{number}"))?;
        Ok(pr.pr_state())
    }

    /// Whether a dataset file is already present in the catalogue
    pub fn dataset_exists(&self, slug: &str, datasets_dir: &str, file_name: &str) -> Result<bool> {
        let response = self
            .get(&format!("/repos/{slug}/contents/{datasets_dir}/{file_name}"))
            .send()
            .with_context(|| format!("Failed to probe {datasets_dir}/{file_name} on {slug}"))?;

        match response.status() {
            StatusCode::OK => Ok(true),
            StatusCode::NOT_FOUND => Ok(false),
            status => bail!("Catalogue probe on {slug} failed: {status}"),
        }
    }
}

fn state_from_str(state: &str) -> PrState {
    if state.eq_ignore_ascii_case("open") {
        PrState::Open
    } else {
        PrState::Closed
    }
}
