//! Error types for spool-git.

/// Result type alias using [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur during git operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Not inside a git repository.
    #[error("not a git repository")]
    NotARepository,

    /// Repository is bare (no working tree to stage from).
    #[error("repository has no working tree")]
    BareRepository,

    /// HEAD is detached (not on a branch).
    #[error("HEAD is detached - checkout a branch first")]
    DetachedHead,

    /// No remote is configured.
    #[error("no remote configured")]
    RemoteNotConfigured,

    /// Invalid remote URL.
    #[error("invalid remote URL: {0}")]
    InvalidRemoteUrl(String),

    /// Push failed at the transport level.
    #[error("push failed: {0}")]
    PushFailed(String),

    /// Fetch failed.
    #[error("fetch failed: {0}")]
    FetchFailed(String),

    /// Underlying git2 error.
    #[error("git error: {0}")]
    Git2(#[from] git2::Error),
}
