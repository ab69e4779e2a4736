//! Access to the hosting service that owns the repository.
//!
//! The release flow only ever talks to [`HostingApi`]; [`GitHubClient`] is
//! the implementation used at runtime and tests substitute their own.

mod client;

pub use client::{has_next_page, GitHubClient};

use crate::error::AutotagError;

/// One page of tag references.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagPage {
    /// Full reference names, e.g. `refs/tags/v1.2.3`.
    pub names: Vec<String>,
    /// Whether another page follows this one.
    pub has_next: bool,
}

#[cfg_attr(test, mockall::automock)]
pub trait HostingApi {
    /// Fetch page `page` (1-based) of the repository's tag references.
    fn list_tag_refs(&self, page: u32) -> Result<TagPage, AutotagError>;

    /// File names changed between `base` and `head`.
    fn compare_files(&self, base: &str, head: &str) -> Result<Vec<String>, AutotagError>;

    /// Create `ref_name` pointing at commit `sha`. Fails with
    /// [`AutotagError::TagExists`] when the reference is already there.
    fn create_tag_ref(&self, ref_name: &str, sha: &str) -> Result<(), AutotagError>;

    fn create_comment(&self, number: u64, body: &str) -> Result<(), AutotagError>;
}
