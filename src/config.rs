use std::env;
use std::path::PathBuf;
use std::time::Duration;

use regex::Regex;

use crate::error::AutotagError;

/// Exit code the Actions runner reads as "no error, but stop processing".
pub const EX_CONFIG: i32 = 78;
pub const FATAL_EXIT: i32 = 1;

pub const DEFAULT_FILE_REGEXP: &str = ".*";
pub const DEFAULT_API_URL: &str = "https://api.github.com";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

pub const PULL_REQUEST_EVENT: &str = "pull_request";
pub const CLOSED_ACTION: &str = "closed";
pub const TAG_REF_PREFIX: &str = "refs/tags/";

pub const ENV_HELP: &str = "ENVIRONMENT:
    NO_EX_CONFIG          disables the EX_CONFIG returns, returning success instead
    NEVER_FAIL            in cases where the bot should fail, it will return EX_CONFIG instead
    FILE_REGEXP           only tag when changes since the last tag include files that match this regex (default: .*)
    TAG_PREFIX            prefix your tag with this. Great for Go modules in a subdir!
    TAG_BUILD_METADATA    append +YYYY-MM-DD.<short sha> build metadata to new tags";

pub fn release_comment(version: &str) -> String {
    format!(
        "Your friendly autotagging bot has tagged this as release **{}**",
        version
    )
}

fn flag(value: Option<String>) -> bool {
    value.as_deref() == Some("true")
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExitCodes {
    pub no_op: i32,
    pub fatal: i32,
}

impl Default for ExitCodes {
    fn default() -> Self {
        Self {
            no_op: EX_CONFIG,
            fatal: FATAL_EXIT,
        }
    }
}

impl ExitCodes {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// `NEVER_FAIL` maps onto whatever the no-op code is after `NO_EX_CONFIG`.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut codes = Self::default();
        if flag(lookup("NO_EX_CONFIG")) {
            codes.no_op = 0;
        }
        if flag(lookup("NEVER_FAIL")) {
            codes.fatal = codes.no_op;
        }
        codes
    }
}

/// Everything the run needs from the execution environment, read once at startup.
/// Exit codes are resolved separately by [`ExitCodes`] so they are known before
/// anything here can fail.
#[derive(Debug, Clone)]
pub struct Config {
    pub file_pattern: Regex,
    pub tag_prefix: String,
    pub build_metadata: bool,
    pub event_name: Option<String>,
    pub event_path: Option<PathBuf>,
    pub token: Option<String>,
    pub api_url: String,
    pub timeout: Duration,
}

impl Config {
    pub fn from_env() -> Result<Self, AutotagError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, AutotagError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let file_regexp =
            lookup("FILE_REGEXP").unwrap_or_else(|| DEFAULT_FILE_REGEXP.to_string());
        let file_pattern = Regex::new(&file_regexp)?;

        let timeout = match lookup("GITHUB_TIMEOUT_SECS") {
            Some(raw) => raw.trim().parse::<u64>().map_err(|e| {
                AutotagError::Config(format!("invalid GITHUB_TIMEOUT_SECS {:?}: {}", raw, e))
            })?,
            None => DEFAULT_TIMEOUT_SECS,
        };

        Ok(Config {
            file_pattern,
            tag_prefix: lookup("TAG_PREFIX").unwrap_or_default(),
            build_metadata: flag(lookup("TAG_BUILD_METADATA")),
            event_name: lookup("GITHUB_EVENT_NAME"),
            event_path: lookup("GITHUB_EVENT_PATH")
                .filter(|p| !p.is_empty())
                .map(PathBuf::from),
            token: lookup("GITHUB_TOKEN").filter(|t| !t.is_empty()),
            api_url: lookup("GITHUB_API_URL")
                .filter(|u| !u.is_empty())
                .unwrap_or_else(|| DEFAULT_API_URL.to_string()),
            timeout: Duration::from_secs(timeout),
        })
    }
}
