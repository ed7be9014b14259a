//! Workflow controller orchestrating the Git operations behind the
//! version-control UI.
//!
//! The controller owns the user-supplied commit metadata, decides which
//! adapter operations to invoke per user action, interprets their
//! outcomes, and reports through the presentation bridge. It performs
//! no drawing and no Git plumbing of its own.

use std::path::Path;

use spool_git::{Error as GitError, RefUpdate, RepoOps};

use crate::bridge::{DialogStatus, MessageKind, PresentationBridge, SourceObserver};
use crate::error::{Error, Result};
use crate::identity::CommitIdentity;

/// Controller mediating between the design tool and the repository
/// adapter.
///
/// Holds the current author string and commit message independently of
/// any Git call, plus the adapter bound to the active project. Rebind
/// the adapter with [`Self::bind`] when a different project is opened;
/// binding must happen between operations, never concurrently with one.
pub struct WorkflowController<R, B, O = ()>
where
    R: RepoOps,
    B: PresentationBridge,
    O: SourceObserver,
{
    repo: Option<R>,
    bridge: B,
    observer: O,
    author: String,
    message: String,
}

impl<R, B, O> WorkflowController<R, B, O>
where
    R: RepoOps,
    B: PresentationBridge,
    O: SourceObserver,
{
    /// Create an unbound controller.
    pub fn new(bridge: B, observer: O) -> Self {
        Self {
            repo: None,
            bridge,
            observer,
            author: String::new(),
            message: String::new(),
        }
    }

    /// Bind the adapter for the active project, replacing any previous
    /// binding.
    pub fn bind(&mut self, repo: R) {
        self.repo = Some(repo);
    }

    /// Drop the current binding, returning the adapter.
    pub fn unbind(&mut self) -> Option<R> {
        self.repo.take()
    }

    /// The bound adapter, if any.
    pub fn repository(&self) -> Option<&R> {
        self.repo.as_ref()
    }

    /// The presentation bridge.
    pub fn bridge(&self) -> &B {
        &self.bridge
    }

    /// The source-changed observer.
    pub fn observer(&self) -> &O {
        &self.observer
    }

    /// The current author string, as entered.
    #[must_use]
    pub fn author(&self) -> &str {
        &self.author
    }

    /// Set the author string; validated only when committing.
    pub fn set_author(&mut self, author: impl Into<String>) {
        self.author = author.into();
    }

    /// The current commit message.
    #[must_use]
    pub fn commit_message(&self) -> &str {
        &self.message
    }

    /// Set the commit message.
    pub fn set_commit_message(&mut self, message: impl Into<String>) {
        self.message = message.into();
    }

    fn repo(&self) -> Result<&R> {
        self.repo.as_ref().ok_or(Error::NoRepository)
    }

    /// Initialize a repository at `path` after user confirmation.
    ///
    /// Cancel means no adapter call at all.
    ///
    /// # Errors
    /// Returns error if no adapter is bound or initialization fails.
    pub fn init_git(&self, path: &Path) -> Result<()> {
        let repo = self.repo()?;

        let question = format!("Initialize a Git repository in {}?", path.display());
        if self.bridge.confirm("Initialize repository", &question) == DialogStatus::Cancel {
            return Ok(());
        }

        repo.init_git(path)?;
        self.bridge
            .message(MessageKind::Success, "Repository initialized");
        Ok(())
    }

    /// Stage a path for the next commit.
    ///
    /// # Errors
    /// Returns error if no adapter is bound or staging fails.
    pub fn stage(&self, path: &Path) -> Result<()> {
        self.repo()?.add_to_index(path)?;
        Ok(())
    }

    /// Unstage a path.
    ///
    /// # Errors
    /// Returns error if no adapter is bound or unstaging fails.
    pub fn unstage(&self, path: &Path) -> Result<()> {
        self.repo()?.remove_from_index(path)?;
        Ok(())
    }

    /// Commit the staged changes with the held author and message.
    ///
    /// Gates, in order, each aborting with a message and without
    /// touching the adapter's commit: nothing staged, then malformed
    /// author. On success fires the source-changed signal.
    ///
    /// # Errors
    /// Returns error if no adapter is bound or the commit itself fails.
    pub fn commit(&self) -> Result<()> {
        let repo = self.repo()?;

        if !repo.has_staged_objects()? {
            self.bridge
                .message(MessageKind::Info, "There are no staged changes to commit");
            return Ok(());
        }

        let Ok(identity) = CommitIdentity::parse(&self.author) else {
            self.bridge.message(
                MessageKind::Error,
                &format!("Malformed author '{}': expected \"Name <email>\"", self.author),
            );
            return Ok(());
        };

        repo.commit(identity.name(), identity.email(), &self.message)?;
        self.observer.source_changed();
        Ok(())
    }

    /// Pull from the remote.
    ///
    /// A conflicting merge is resolved by discarding local work with a
    /// hard reset - this controller offers no conflict UI, so the tree
    /// is never left conflicted. The message tells the user exactly
    /// that. Non-conflicting failures are reported without a reset.
    ///
    /// # Errors
    /// Returns error if no adapter is bound or pull/reset fail outright.
    pub fn pull(&self) -> Result<()> {
        let repo = self.repo()?;
        let outcome = repo.pull()?;

        if outcome.successful {
            self.bridge
                .message(MessageKind::Success, "Pulled from the remote repository");
            self.observer.source_changed();
        } else if outcome.is_conflicting() {
            repo.reset_hard()?;
            self.bridge.message(
                MessageKind::Error,
                "Pull hit merge conflicts; uncommitted local changes were discarded and the working tree was reset",
            );
        } else {
            self.bridge
                .message(MessageKind::Error, "Pull failed");
        }
        Ok(())
    }

    /// Push the current branch to the remote.
    ///
    /// Requires a configured remote. Success is reported only when
    /// every per-ref update came back OK; otherwise the rejected refs
    /// are named. One attempt per call, no retry.
    ///
    /// # Errors
    /// Returns error if no adapter is bound or the push fails outright.
    pub fn push(&self) -> Result<()> {
        let repo = self.repo()?;

        if !repo.has_remote() {
            self.bridge.message(
                MessageKind::Error,
                "No remote repository configured - set one up first",
            );
            return Ok(());
        }

        let updates = repo.push()?;
        let rejected: Vec<&RefUpdate> =
            updates.iter().filter(|u| !u.status.is_ok()).collect();

        if rejected.is_empty() {
            self.bridge
                .message(MessageKind::Success, "Pushed to the remote repository");
        } else {
            let refs: Vec<&str> = rejected.iter().map(|u| u.refname.as_str()).collect();
            self.bridge.message(
                MessageKind::Error,
                &format!("Push rejected for: {}", refs.join(", ")),
            );
        }
        Ok(())
    }

    /// Edit the remote URL via a prompt pre-filled with the current one.
    ///
    /// Cancel is a no-op. An accepted empty value clears the remote. An
    /// accepted value the adapter rejects as malformed is reported
    /// without mutating remote state.
    ///
    /// # Errors
    /// Returns error if no adapter is bound or a remote operation fails
    /// for a reason other than URL syntax.
    pub fn edit_remote(&self) -> Result<()> {
        let repo = self.repo()?;

        let current = repo.remote_url().unwrap_or_default();
        let reply = self.bridge.prompt("Remote repository URL", &current);
        if reply.status == DialogStatus::Cancel {
            return Ok(());
        }

        let url = reply.value.trim();
        if url.is_empty() {
            repo.remove_remote()?;
            self.bridge.message(MessageKind::Info, "Remote removed");
            return Ok(());
        }

        match repo.add_remote(url) {
            Ok(()) => self
                .bridge
                .message(MessageKind::Success, "Remote updated"),
            Err(GitError::InvalidRemoteUrl(bad)) => self.bridge.message(
                MessageKind::Error,
                &format!("Invalid remote URL: {bad}"),
            ),
            Err(e) => return Err(e.into()),
        }
        Ok(())
    }
}
