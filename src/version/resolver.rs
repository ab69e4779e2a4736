use log::{debug, info, warn};
use regex::Regex;

use super::SemanticVersion;
use crate::config::TAG_REF_PREFIX;
use crate::error::AutotagError;
use crate::github::HostingApi;

/// Walks every page of tag references and returns the highest version found.
///
/// References are stripped of `refs/tags/` and `prefix` before parsing; ones
/// that don't carry the prefix or don't parse are skipped. Only a strictly
/// greater version replaces the current maximum, so the first of several
/// equal tags wins.
pub fn resolve_last_version<A>(api: &A, prefix: &str) -> Result<SemanticVersion, AutotagError>
where
    A: HostingApi + ?Sized,
{
    let mut last = SemanticVersion::zero();
    let mut page = 1;

    loop {
        let tags = api.list_tag_refs(page)?;

        for name in &tags.names {
            debug!("Ref: {}", name);

            let short = name.strip_prefix(TAG_REF_PREFIX).unwrap_or(name);
            let Some(candidate) = short.strip_prefix(prefix) else {
                debug!("Tag {} does not start with prefix {:?}, ignoring", short, prefix);
                continue;
            };

            match SemanticVersion::parse(candidate) {
                Ok(version) if version > last => {
                    info!("Found newer version: {}", version);
                    last = version;
                }
                Ok(_) => {}
                Err(e) => warn!("Tag {} is not a valid semver, ignoring: {}", candidate, e),
            }
        }

        if !tags.has_next {
            break;
        }
        page += 1;
    }

    if last == SemanticVersion::zero() {
        return Err(AutotagError::NoVersionsFound);
    }

    Ok(last)
}

/// Whether any file changed between `base` and `merge` matches `file_pattern`.
pub fn should_tag<A>(
    api: &A,
    base: &str,
    merge: &str,
    file_pattern: &Regex,
) -> Result<bool, AutotagError>
where
    A: HostingApi + ?Sized,
{
    let files = api.compare_files(base, merge)?;
    debug!("{} file(s) changed between {} and {}", files.len(), base, merge);

    Ok(files.iter().any(|file| file_pattern.is_match(file)))
}
