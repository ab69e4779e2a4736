use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::config::CLOSED_ACTION;
use crate::error::AutotagError;

/// The parts of a `pull_request` webhook payload the release flow reads.
#[derive(Debug, Clone, Deserialize)]
pub struct PullRequestEvent {
    pub action: String,
    pub pull_request: PullRequest,
    pub repository: Repository,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PullRequest {
    pub number: u64,
    #[serde(default)]
    pub merged: bool,
    #[serde(default)]
    pub merge_commit_sha: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Repository {
    pub name: String,
    pub owner: Owner,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Owner {
    pub login: String,
}

impl PullRequestEvent {
    pub fn from_path(path: &Path) -> Result<Self, AutotagError> {
        let raw = fs::read_to_string(path).map_err(|e| {
            AutotagError::Event(format!("could not read {}: {}", path.display(), e))
        })?;
        Self::from_json(&raw)
    }

    pub fn from_json(raw: &str) -> Result<Self, AutotagError> {
        serde_json::from_str(raw)
            .map_err(|e| AutotagError::Event(format!("could not unmarshal event info: {}", e)))
    }

    /// A closed pull request whose changes landed.
    pub fn is_merged(&self) -> bool {
        self.action == CLOSED_ACTION && self.pull_request.merged
    }

    pub fn merge_commit(&self) -> Option<&str> {
        self.pull_request
            .merge_commit_sha
            .as_deref()
            .filter(|sha| !sha.is_empty())
    }
}
