use std::fmt;
use std::path::Path;

use chrono::{DateTime, Utc};
use log::debug;
use regex::Regex;

use crate::config::{self, Config, PULL_REQUEST_EVENT, TAG_REF_PREFIX};
use crate::error::AutotagError;
use crate::event::PullRequestEvent;
use crate::github::{GitHubClient, HostingApi};
use crate::logger;
use crate::version::{next_version, resolve_last_version, should_tag, NextVersionStyle};

/// Why a run ended without tagging. None of these are failures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    WrongTrigger(String),
    NotMerged { action: String, merged: bool },
    NoMatchingChanges,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::WrongTrigger(name) => write!(f, "Ignoring trigger {:?}", name),
            SkipReason::NotMerged { action, merged } => write!(
                f,
                "PR not ready to tag (action: {}, merged: {})",
                action, merged
            ),
            SkipReason::NoMatchingChanges => {
                write!(f, "No changes matching pattern. This code won't be tagged.")
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Tagged { version: String },
    DryRun { version: String },
    Skipped(SkipReason),
}

/// The slice of [`Config`] the release flow needs once the event is known.
#[derive(Debug, Clone)]
pub struct Settings {
    pub tag_prefix: String,
    pub file_pattern: Regex,
    pub build_metadata: bool,
    pub dry_run: bool,
}

impl Settings {
    pub fn from_config(config: &Config, dry_run: bool) -> Self {
        Self {
            tag_prefix: config.tag_prefix.clone(),
            file_pattern: config.file_pattern.clone(),
            build_metadata: config.build_metadata,
            dry_run,
        }
    }
}

pub struct Autotagger<A: HostingApi> {
    api: A,
    settings: Settings,
}

impl<A: HostingApi> Autotagger<A> {
    pub fn new(api: A, settings: Settings) -> Self {
        Self { api, settings }
    }

    pub fn run(&self, event: &PullRequestEvent) -> Result<Outcome, AutotagError> {
        self.run_at(event, Utc::now())
    }

    /// Same as [`Autotagger::run`] with `now` used for build metadata.
    pub fn run_at(
        &self,
        event: &PullRequestEvent,
        now: DateTime<Utc>,
    ) -> Result<Outcome, AutotagError> {
        if !event.is_merged() {
            return Ok(Outcome::Skipped(SkipReason::NotMerged {
                action: event.action.clone(),
                merged: event.pull_request.merged,
            }));
        }

        let merge_commit = event
            .merge_commit()
            .ok_or(AutotagError::MissingMergeCommit)?;
        let prefix = self.settings.tag_prefix.as_str();

        logger::progress("Looking up the latest version");
        let last = resolve_last_version(&self.api, prefix)?;
        let base = format!("{}v{}", prefix, last);
        logger::info(&format!("Latest version: {}", base));

        if !should_tag(&self.api, &base, merge_commit, &self.settings.file_pattern)? {
            return Ok(Outcome::Skipped(SkipReason::NoMatchingChanges));
        }

        let style = if self.settings.build_metadata {
            NextVersionStyle::BuildMetadata {
                commit: merge_commit.to_string(),
                date: now,
            }
        } else {
            NextVersionStyle::Plain
        };
        let version = next_version(&last, prefix, &style)?;
        debug!("Next version for {}: {}", merge_commit, version);

        if self.settings.dry_run {
            logger::info(&format!("Dry run: new tag would be {}", version));
            return Ok(Outcome::DryRun { version });
        }

        let ref_name = format!("{}{}", TAG_REF_PREFIX, version);
        self.api.create_tag_ref(&ref_name, merge_commit)?;
        logger::success(&format!("Tagged version {}", version));

        self.api.create_comment(
            event.pull_request.number,
            &config::release_comment(&version),
        )?;
        logger::success("Done");

        Ok(Outcome::Tagged { version })
    }
}

/// Runs one invocation end to end against GitHub.
///
/// `event_path` overrides `GITHUB_EVENT_PATH` when given.
pub fn run(
    config: &Config,
    event_path: Option<&Path>,
    dry_run: bool,
) -> Result<Outcome, AutotagError> {
    let trigger = config.event_name.as_deref().unwrap_or_default();
    if trigger != PULL_REQUEST_EVENT {
        return Ok(Outcome::Skipped(SkipReason::WrongTrigger(
            trigger.to_string(),
        )));
    }

    let token = config.token.as_deref().ok_or(AutotagError::MissingToken)?;

    let path = event_path
        .or(config.event_path.as_deref())
        .ok_or_else(|| AutotagError::Event("GITHUB_EVENT_PATH is not set".to_string()))?;
    let event = PullRequestEvent::from_path(path)?;

    let client = GitHubClient::new(
        &config.api_url,
        token,
        &event.repository.owner.login,
        &event.repository.name,
        config.timeout,
    )?;

    Autotagger::new(client, Settings::from_config(config, dry_run)).run(&event)
}
