//! # spool-git
//!
//! Git repository adapter for Spool, built on git2-rs.
//! Provides the staging, commit, pull, push, and remote operations the
//! workflow controller orchestrates, plus the working-tree status scan
//! that feeds change markers on the design canvas.

mod error;
mod outcome;
mod repository;
mod traits;

pub use error::{Error, Result};
pub use outcome::{ChangeStatus, FileChange, MergeStatus, PullOutcome, RefUpdate, RefUpdateStatus};
pub use repository::Repository;
pub use traits::RepoOps;
