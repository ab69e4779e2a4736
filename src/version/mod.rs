mod resolver;

pub use resolver::{resolve_last_version, should_tag};

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use semver::Prerelease;
use thiserror::Error;

use crate::error::AutotagError;

static VERSION_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^v?(?P<segments>[0-9]+(?:\.[0-9]+)*)(?:-(?P<pre>[0-9A-Za-z~-]+(?:\.[0-9A-Za-z~-]+)*))?(?:\+(?P<meta>[0-9A-Za-z~-]+(?:\.[0-9A-Za-z~-]+)*))?$",
    )
    .expect("version grammar is a valid regex")
});

const SHORT_COMMIT_LEN: usize = 12;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum VersionError {
    #[error("{0:?} is not a valid semantic version")]
    Malformed(String),

    #[error("segment {segment:?} of {input:?} is out of range")]
    SegmentOverflow { input: String, segment: String },
}

/// A version with one or more numeric segments, padded to at least
/// major.minor.patch when parsed.
///
/// Precedence follows semver: numeric segments first, then a release
/// outranks any of its pre-releases. Build metadata is carried along for
/// display only and never takes part in comparisons.
#[derive(Debug, Clone)]
pub struct SemanticVersion {
    segments: Vec<u64>,
    pre: Option<String>,
    metadata: Option<String>,
}

impl SemanticVersion {
    pub fn new(major: u64, minor: u64, patch: u64) -> Self {
        Self {
            segments: vec![major, minor, patch],
            pre: None,
            metadata: None,
        }
    }

    pub fn zero() -> Self {
        Self::new(0, 0, 0)
    }

    pub fn parse(input: &str) -> Result<Self, VersionError> {
        let captures = VERSION_REGEX
            .captures(input)
            .ok_or_else(|| VersionError::Malformed(input.to_string()))?;

        let mut segments = captures["segments"]
            .split('.')
            .map(|segment| {
                segment
                    .parse::<u64>()
                    .map_err(|_| VersionError::SegmentOverflow {
                        input: input.to_string(),
                        segment: segment.to_string(),
                    })
            })
            .collect::<Result<Vec<_>, _>>()?;
        if segments.len() < 3 {
            segments.resize(3, 0);
        }

        Ok(Self {
            segments,
            pre: captures.name("pre").map(|m| m.as_str().to_string()),
            metadata: captures.name("meta").map(|m| m.as_str().to_string()),
        })
    }

    pub fn segments(&self) -> &[u64] {
        &self.segments
    }

    pub fn pre_release(&self) -> Option<&str> {
        self.pre.as_deref()
    }

    pub fn metadata(&self) -> Option<&str> {
        self.metadata.as_deref()
    }

    fn segment(&self, index: usize) -> u64 {
        self.segments.get(index).copied().unwrap_or(0)
    }

    /// Major, minor and patch; anything past the third segment is ignored.
    pub fn core(&self) -> (u64, u64, u64) {
        (self.segment(0), self.segment(1), self.segment(2))
    }
}

fn compare_pre_release(a: &str, b: &str) -> Ordering {
    match (Prerelease::new(a), Prerelease::new(b)) {
        (Ok(a_pre), Ok(b_pre)) => a_pre.cmp(&b_pre),
        _ => a.cmp(b),
    }
}

impl Ord for SemanticVersion {
    fn cmp(&self, other: &Self) -> Ordering {
        let len = self.segments.len().max(other.segments.len());
        for index in 0..len {
            match self.segment(index).cmp(&other.segment(index)) {
                Ordering::Equal => continue,
                unequal => return unequal,
            }
        }

        match (&self.pre, &other.pre) {
            (None, None) => Ordering::Equal,
            (None, Some(_)) => Ordering::Greater,
            (Some(_), None) => Ordering::Less,
            (Some(a), Some(b)) => compare_pre_release(a, b),
        }
    }
}

impl PartialOrd for SemanticVersion {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for SemanticVersion {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for SemanticVersion {}

impl FromStr for SemanticVersion {
    type Err = VersionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for SemanticVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let segments = self
            .segments
            .iter()
            .map(u64::to_string)
            .collect::<Vec<_>>()
            .join(".");
        write!(f, "{}", segments)?;
        if let Some(pre) = &self.pre {
            write!(f, "-{}", pre)?;
        }
        if let Some(metadata) = &self.metadata {
            write!(f, "+{}", metadata)?;
        }
        Ok(())
    }
}

/// Shape of the tag produced by [`next_version`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NextVersionStyle {
    Plain,
    /// Appends `+YYYY-MM-DD.<first 12 chars of commit>`.
    BuildMetadata { commit: String, date: DateTime<Utc> },
}

/// Bumps the patch segment of `last` and renders the new tag name.
///
/// Major and minor are carried through untouched; pre-release and build
/// metadata of `last` are dropped. Fails when the patch segment is already
/// `u64::MAX`.
pub fn next_version(
    last: &SemanticVersion,
    prefix: &str,
    style: &NextVersionStyle,
) -> Result<String, AutotagError> {
    let (major, minor, patch) = last.core();
    let patch = patch
        .checked_add(1)
        .ok_or_else(|| AutotagError::VersionOverflow(last.to_string()))?;
    let tag = format!("{}v{}.{}.{}", prefix, major, minor, patch);

    Ok(match style {
        NextVersionStyle::Plain => tag,
        NextVersionStyle::BuildMetadata { commit, date } => {
            let short: String = commit.chars().take(SHORT_COMMIT_LEN).collect();
            format!("{}+{}.{}", tag, date.format("%Y-%m-%d"), short)
        }
    })
}
