//! Trait abstraction for the repository adapter.
//!
//! This module defines the `RepoOps` trait consumed by the workflow
//! controller, enabling dependency injection and testability.

use std::path::Path;

use crate::outcome::{FileChange, PullOutcome, RefUpdate};
use crate::Result;

/// Adapter contract over a working directory under (or about to be put
/// under) version control.
///
/// Operations are synchronous since git2 is a synchronous library; the
/// controller calls them from a blocking UI context.
#[allow(clippy::missing_errors_doc)]
pub trait RepoOps {
    /// Get the working directory path, if the repository has one.
    fn workdir(&self) -> Option<&Path>;

    /// Create a new repository at the given path.
    ///
    /// Independent of the bound repository; callers rebind afterwards.
    fn init_git(&self, path: &Path) -> Result<()>;

    /// Stage a path (file or directory) for the next commit.
    fn add_to_index(&self, path: &Path) -> Result<()>;

    /// Unstage a path, restoring the index entry from HEAD.
    fn remove_from_index(&self, path: &Path) -> Result<()>;

    /// Check whether anything is staged for commit.
    fn has_staged_objects(&self) -> Result<bool>;

    /// Commit the staged changes with an explicit author identity.
    fn commit(&self, author_name: &str, author_email: &str, message: &str) -> Result<()>;

    /// Fetch and merge from the remote.
    ///
    /// Conflicts are reported in the outcome, not as an error; the
    /// working tree is left conflicted for the caller to handle.
    fn pull(&self) -> Result<PullOutcome>;

    /// Hard-reset the working tree and index to HEAD, discarding any
    /// in-progress merge.
    fn reset_hard(&self) -> Result<()>;

    /// Check whether a remote is configured.
    fn has_remote(&self) -> bool;

    /// Get the configured remote URL, if any.
    fn remote_url(&self) -> Option<String>;

    /// Set the remote URL, creating the remote if needed.
    ///
    /// Rejects syntactically invalid URLs with
    /// [`crate::Error::InvalidRemoteUrl`] before touching the config.
    fn add_remote(&self, url: &str) -> Result<()>;

    /// Remove the remote. Removing an absent remote is not an error.
    fn remove_remote(&self) -> Result<()>;

    /// Push the current branch, returning one result per ref update
    /// the remote reported.
    fn push(&self) -> Result<Vec<RefUpdate>>;

    /// Scan the index and working tree for changes relative to HEAD.
    ///
    /// Unchanged paths are omitted; absence means unchanged.
    fn status_scan(&self) -> Result<Vec<FileChange>>;
}
