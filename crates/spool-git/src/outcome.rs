//! Result types returned by pull, push, and the working-tree status scan.
//!
//! Pull conflicts and rejected ref updates are data, not errors: the
//! workflow controller inspects these structs to decide on recovery,
//! while [`crate::Error`] is reserved for operations that failed outright.

use std::path::PathBuf;

use serde::Serialize;

/// How a pull's merge phase ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MergeStatus {
    /// Local branch already contained the remote history.
    AlreadyUpToDate,
    /// Local branch was fast-forwarded to the remote tip.
    FastForward,
    /// A merge commit was created.
    Merged,
    /// The merge stopped on conflicts; the working tree holds conflict
    /// markers until the caller resolves or resets.
    Conflicting,
}

/// Outcome of a pull.
#[derive(Debug, Clone, Copy)]
pub struct PullOutcome {
    /// Whether the pull completed without leaving the tree conflicted.
    pub successful: bool,
    /// Merge phase result, when a merge phase ran.
    pub merge_status: Option<MergeStatus>,
}

impl PullOutcome {
    /// A pull that completed cleanly with the given merge status.
    #[must_use]
    pub const fn success(status: MergeStatus) -> Self {
        Self {
            successful: true,
            merge_status: Some(status),
        }
    }

    /// A pull that stopped on merge conflicts.
    #[must_use]
    pub const fn conflicted() -> Self {
        Self {
            successful: false,
            merge_status: Some(MergeStatus::Conflicting),
        }
    }

    /// Whether the merge phase ended in conflicts.
    #[must_use]
    pub fn is_conflicting(&self) -> bool {
        self.merge_status == Some(MergeStatus::Conflicting)
    }
}

/// Status of a single pushed ref, as reported by the remote.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RefUpdateStatus {
    /// The remote accepted the update.
    Ok,
    /// The remote ref already matched.
    UpToDate,
    /// Rejected because the update is not a fast-forward.
    RejectedNonFastForward,
    /// Rejected for another reason, with the remote's message.
    Rejected(String),
}

impl RefUpdateStatus {
    /// Whether this status counts toward an overall successful push.
    #[must_use]
    pub const fn is_ok(&self) -> bool {
        matches!(self, Self::Ok | Self::UpToDate)
    }
}

/// Result of pushing one named ref to the remote.
#[derive(Debug, Clone)]
pub struct RefUpdate {
    /// Fully qualified ref name, e.g. `refs/heads/main`.
    pub refname: String,
    /// What the remote did with it.
    pub status: RefUpdateStatus,
}

/// Per-file change relative to HEAD, covering index and working tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ChangeStatus {
    Added,
    Changed,
    Removed,
    Unchanged,
}

impl ChangeStatus {
    /// Stable lowercase label, used as the canvas annotation value.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Added => "added",
            Self::Changed => "changed",
            Self::Removed => "removed",
            Self::Unchanged => "unchanged",
        }
    }

    /// Parse a label produced by [`Self::as_str`].
    #[must_use]
    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "added" => Some(Self::Added),
            "changed" => Some(Self::Changed),
            "removed" => Some(Self::Removed),
            "unchanged" => Some(Self::Unchanged),
            _ => None,
        }
    }
}

/// One row of the working-tree status scan.
#[derive(Debug, Clone, Serialize)]
pub struct FileChange {
    /// Path relative to the repository root.
    pub path: PathBuf,
    /// Change classification for the path.
    pub status: ChangeStatus,
}
