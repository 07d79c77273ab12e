//! GitHub milestone listing.
//!
//! One call: list the open milestones of a repository, sorted ascending by
//! due date. No pagination, no retries; a failed request fails the whole
//! invocation.

use std::fs;
use std::io::Read;
use std::time::Duration;

use serde::Deserialize;
use thiserror::Error;
use time::OffsetDateTime;

pub const DEFAULT_API_BASE: &str = "https://api.github.com";

/// Env var pointing at a canned listing file; bypasses the network when set.
pub const MILESTONES_JSON_ENV: &str = "RCM_MILESTONES_JSON";

const USER_AGENT: &str = concat!("rc-milestone/", env!("CARGO_PKG_VERSION"));
const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MilestoneState {
    Open,
    Closed,
}

/// Milestone record as returned by the listing call.
///
/// `due_on` is nullable on the wire; a present but malformed timestamp fails
/// deserialization (and with it the whole fetch).
#[derive(Debug, Clone, Deserialize)]
pub struct Milestone {
    pub title: String,
    pub number: u64,
    pub id: u64,
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub due_on: Option<OffsetDateTime>,
    pub state: MilestoneState,
}

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum FetchError {
    #[error("milestone listing request failed: {0}")]
    Transport(Box<ureq::Error>),

    #[error("failed to read milestone listing body: {0}")]
    Body(#[from] std::io::Error),

    #[error("failed to decode milestone listing: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("failed to read milestones json {path}: {source}")]
    Fixture {
        path: String,
        source: std::io::Error,
    },
}

pub struct MilestoneClient {
    agent: ureq::Agent,
    base_url: String,
    token: String,
}

impl MilestoneClient {
    pub fn new(token: impl Into<String>) -> Self {
        Self::with_base_url(token, DEFAULT_API_BASE)
    }

    pub fn with_base_url(token: impl Into<String>, base_url: impl Into<String>) -> Self {
        let agent = ureq::AgentBuilder::new().timeout(REQUEST_TIMEOUT).build();
        let base_url = base_url.into();
        Self {
            agent,
            base_url: base_url.trim_end_matches('/').to_string(),
            token: token.into(),
        }
    }

    /// List open milestones sorted ascending by due date.
    pub fn list_open_milestones(
        &self,
        owner: &str,
        repo: &str,
    ) -> Result<Vec<Milestone>, FetchError> {
        if let Ok(path) = std::env::var(MILESTONES_JSON_ENV) {
            let contents = fs::read_to_string(&path)
                .map_err(|source| FetchError::Fixture { path, source })?;
            return Ok(serde_json::from_str(&contents)?);
        }

        let url = format!("{}/repos/{owner}/{repo}/milestones", self.base_url);
        let resp = self
            .agent
            .get(&url)
            .query("state", "open")
            .query("sort", "due_on")
            .query("direction", "asc")
            .set("Authorization", &format!("Bearer {}", self.token))
            .set("Accept", "application/vnd.github+json")
            .set("X-GitHub-Api-Version", "2022-11-28")
            .set("User-Agent", USER_AGENT)
            .call()
            .map_err(|e| FetchError::Transport(Box::new(e)))?;

        let mut body = String::new();
        resp.into_reader().read_to_string(&mut body)?;
        Ok(serde_json::from_str(&body)?)
    }
}
