//! Repository wrapper providing the adapter operations for the workflow
//! controller.

use std::cell::RefCell;
use std::path::Path;

use git2::{
    Cred, ErrorCode, FetchOptions, IndexAddOption, ObjectType, PushOptions, RemoteCallbacks,
    ResetType, Signature, Status, StatusOptions,
};

use crate::error::{Error, Result};
use crate::outcome::{
    ChangeStatus, FileChange, MergeStatus, PullOutcome, RefUpdate, RefUpdateStatus,
};
use crate::traits::RepoOps;

/// The single remote this adapter manages.
const REMOTE_NAME: &str = "origin";

/// High-level wrapper around a git repository.
pub struct Repository {
    inner: git2::Repository,
}

impl Repository {
    /// Create a new repository at the given path and open it.
    ///
    /// # Errors
    /// Returns error if repository creation fails.
    pub fn init(path: impl AsRef<Path>) -> Result<Self> {
        let inner = git2::Repository::init(path)?;
        Ok(Self { inner })
    }

    /// Open a repository at the given path.
    ///
    /// # Errors
    /// Returns error if no repository found at path or any parent.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let inner =
            git2::Repository::discover(path).map_err(|_| Error::NotARepository)?;
        Ok(Self { inner })
    }

    /// Open the repository containing the current directory.
    ///
    /// # Errors
    /// Returns error if not inside a git repository.
    pub fn open_current() -> Result<Self> {
        Self::open(".")
    }

    /// Get the name of the current branch.
    ///
    /// # Errors
    /// Returns error if HEAD is detached or unborn.
    pub fn current_branch(&self) -> Result<String> {
        let head = self.inner.head()?;
        if !head.is_branch() {
            return Err(Error::DetachedHead);
        }

        head.shorthand()
            .map(String::from)
            .ok_or(Error::DetachedHead)
    }

    /// Branch name to fetch and merge during a pull.
    ///
    /// Falls back to HEAD's symbolic target when the branch is unborn,
    /// so a freshly initialized repository can still pull.
    fn pull_branch(&self) -> Result<String> {
        match self.current_branch() {
            Ok(branch) => Ok(branch),
            Err(Error::Git2(e)) if e.code() == ErrorCode::UnbornBranch => {
                let head = self.inner.find_reference("HEAD")?;
                head.symbolic_target()
                    .and_then(|t| t.strip_prefix("refs/heads/"))
                    .map(String::from)
                    .ok_or(Error::DetachedHead)
            }
            Err(e) => Err(e),
        }
    }

    /// Install the standard credential chain on a set of remote callbacks:
    /// ssh agent, then the configured credential helper, then default.
    fn install_credentials(&self, callbacks: &mut RemoteCallbacks<'_>) {
        let cfg = self.inner.config().ok();
        callbacks.credentials(move |url, username_from_url, allowed| {
            if allowed.is_ssh_key() {
                if let Some(user) = username_from_url {
                    return Cred::ssh_key_from_agent(user);
                }
            }
            if allowed.is_user_pass_plaintext() {
                if let Some(cfg) = cfg.as_ref() {
                    if let Ok(cred) = Cred::credential_helper(cfg, url, username_from_url) {
                        return Ok(cred);
                    }
                }
            }
            Cred::default()
        });
    }

    /// Create the merge commit that concludes a non-fast-forward pull.
    fn commit_merge(&self, branch: &str, fetched: git2::Oid) -> Result<()> {
        let mut index = self.inner.index()?;
        let tree_id = index.write_tree()?;
        let tree = self.inner.find_tree(tree_id)?;
        let local = self.inner.head()?.peel_to_commit()?;
        let remote = self.inner.find_commit(fetched)?;
        let sig = self.inner.signature()?;
        let message = format!("Merge remote-tracking branch '{REMOTE_NAME}/{branch}'");

        self.inner
            .commit(Some("HEAD"), &sig, &sig, &message, &tree, &[&local, &remote])?;
        self.inner.cleanup_state()?;
        Ok(())
    }

    /// Point the given branch at a fetched commit and check it out.
    fn fast_forward(&self, branch: &str, target: git2::Oid) -> Result<()> {
        let refname = format!("refs/heads/{branch}");
        match self.inner.find_reference(&refname) {
            Ok(mut reference) => {
                reference.set_target(target, "pull: fast-forward")?;
            }
            // Unborn branch: create the ref at the fetched commit.
            Err(_) => {
                self.inner.reference(&refname, target, true, "pull: initial")?;
            }
        }
        self.inner.set_head(&refname)?;
        let mut checkout = git2::build::CheckoutBuilder::default();
        checkout.force();
        self.inner.checkout_head(Some(&mut checkout))?;
        Ok(())
    }

    /// Get a reference to the underlying git2 repository.
    ///
    /// Use sparingly - prefer the [`RepoOps`] methods.
    #[must_use]
    pub fn inner(&self) -> &git2::Repository {
        &self.inner
    }
}

impl RepoOps for Repository {
    fn workdir(&self) -> Option<&Path> {
        self.inner.workdir()
    }

    fn init_git(&self, path: &Path) -> Result<()> {
        git2::Repository::init(path)?;
        Ok(())
    }

    fn add_to_index(&self, path: &Path) -> Result<()> {
        let mut index = self.inner.index()?;
        index.add_all([path], IndexAddOption::DEFAULT, None)?;
        index.write()?;
        Ok(())
    }

    fn remove_from_index(&self, path: &Path) -> Result<()> {
        match self.inner.head() {
            Ok(head) => {
                let target = head.peel(ObjectType::Commit)?;
                self.inner.reset_default(Some(&target), [path])?;
            }
            // Unborn HEAD: nothing to restore the entry from, drop it.
            Err(_) => {
                let mut index = self.inner.index()?;
                index.remove_all([path], None)?;
                index.write()?;
            }
        }
        Ok(())
    }

    fn has_staged_objects(&self) -> Result<bool> {
        let staged = Status::INDEX_NEW
            | Status::INDEX_MODIFIED
            | Status::INDEX_DELETED
            | Status::INDEX_RENAMED
            | Status::INDEX_TYPECHANGE;

        let mut opts = StatusOptions::new();
        opts.include_untracked(false);
        let statuses = self.inner.statuses(Some(&mut opts))?;

        Ok(statuses.iter().any(|e| e.status().intersects(staged)))
    }

    fn commit(&self, author_name: &str, author_email: &str, message: &str) -> Result<()> {
        let sig = Signature::now(author_name, author_email)?;
        let mut index = self.inner.index()?;
        let tree_id = index.write_tree()?;
        let tree = self.inner.find_tree(tree_id)?;

        // First commit on an unborn branch has no parent.
        let parent = match self.inner.head() {
            Ok(head) => Some(head.peel_to_commit()?),
            Err(_) => None,
        };
        let parents: Vec<&git2::Commit<'_>> = parent.iter().collect();

        self.inner
            .commit(Some("HEAD"), &sig, &sig, message, &tree, &parents)?;
        Ok(())
    }

    fn pull(&self) -> Result<PullOutcome> {
        let branch = self.pull_branch()?;
        let mut remote = self
            .inner
            .find_remote(REMOTE_NAME)
            .map_err(|_| Error::RemoteNotConfigured)?;

        let mut callbacks = RemoteCallbacks::new();
        self.install_credentials(&mut callbacks);
        let mut opts = FetchOptions::new();
        opts.remote_callbacks(callbacks);
        remote
            .fetch(&[branch.as_str()], Some(&mut opts), None)
            .map_err(|e| Error::FetchFailed(e.to_string()))?;

        let fetch_head = self.inner.find_reference("FETCH_HEAD")?;
        let fetched = self.inner.reference_to_annotated_commit(&fetch_head)?;
        let (analysis, _) = self.inner.merge_analysis(&[&fetched])?;

        if analysis.is_up_to_date() {
            return Ok(PullOutcome::success(MergeStatus::AlreadyUpToDate));
        }
        if analysis.is_fast_forward() || analysis.is_unborn() {
            self.fast_forward(&branch, fetched.id())?;
            return Ok(PullOutcome::success(MergeStatus::FastForward));
        }

        self.inner.merge(&[&fetched], None, None)?;
        if self.inner.index()?.has_conflicts() {
            // Leave the conflicted tree in place; the caller decides
            // whether to resolve or reset.
            return Ok(PullOutcome::conflicted());
        }

        self.commit_merge(&branch, fetched.id())?;
        Ok(PullOutcome::success(MergeStatus::Merged))
    }

    fn reset_hard(&self) -> Result<()> {
        let target = self.inner.head()?.peel(ObjectType::Commit)?;
        self.inner.reset(&target, ResetType::Hard, None)?;
        // Drop MERGE_HEAD and friends left behind by an interrupted merge.
        self.inner.cleanup_state()?;
        Ok(())
    }

    fn has_remote(&self) -> bool {
        self.inner.find_remote(REMOTE_NAME).is_ok()
    }

    fn remote_url(&self) -> Option<String> {
        self.inner
            .find_remote(REMOTE_NAME)
            .ok()
            .and_then(|r| r.url().map(String::from))
    }

    fn add_remote(&self, url: &str) -> Result<()> {
        validate_remote_url(url)?;
        if self.has_remote() {
            self.inner.remote_set_url(REMOTE_NAME, url)?;
        } else {
            self.inner.remote(REMOTE_NAME, url)?;
        }
        Ok(())
    }

    fn remove_remote(&self) -> Result<()> {
        match self.inner.remote_delete(REMOTE_NAME) {
            Ok(()) => Ok(()),
            Err(e) if e.code() == ErrorCode::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    fn push(&self) -> Result<Vec<RefUpdate>> {
        let branch = self.current_branch()?;
        let mut remote = self
            .inner
            .find_remote(REMOTE_NAME)
            .map_err(|_| Error::RemoteNotConfigured)?;

        let updates: RefCell<Vec<RefUpdate>> = RefCell::new(Vec::new());

        // Scoped so the callbacks' borrow of `updates` ends before into_inner
        {
            let mut callbacks = RemoteCallbacks::new();
            self.install_credentials(&mut callbacks);
            callbacks.push_update_reference(|refname, status| {
                updates.borrow_mut().push(RefUpdate {
                    refname: refname.to_string(),
                    status: classify_update(status),
                });
                Ok(())
            });

            let mut opts = PushOptions::new();
            opts.remote_callbacks(callbacks);
            let refspec = format!("refs/heads/{branch}:refs/heads/{branch}");
            remote
                .push(&[refspec.as_str()], Some(&mut opts))
                .map_err(|e| Error::PushFailed(e.to_string()))?;
        }

        Ok(updates.into_inner())
    }

    fn status_scan(&self) -> Result<Vec<FileChange>> {
        let mut opts = StatusOptions::new();
        opts.include_untracked(true).recurse_untracked_dirs(true);
        let statuses = self.inner.statuses(Some(&mut opts))?;

        let changes = statuses
            .iter()
            .filter_map(|entry| {
                let status = classify_change(entry.status());
                if status == ChangeStatus::Unchanged {
                    return None;
                }
                entry.path().map(|p| FileChange {
                    path: p.into(),
                    status,
                })
            })
            .collect();

        Ok(changes)
    }
}

/// Map a push callback status message to a per-ref update status.
fn classify_update(status: Option<&str>) -> RefUpdateStatus {
    match status {
        None => RefUpdateStatus::Ok,
        Some(msg) => {
            let lower = msg.to_lowercase();
            if lower.contains("non-fast-forward") || lower.contains("fetch first") {
                RefUpdateStatus::RejectedNonFastForward
            } else {
                RefUpdateStatus::Rejected(msg.to_string())
            }
        }
    }
}

/// Map git2 status flags to a change classification.
fn classify_change(status: Status) -> ChangeStatus {
    if status.intersects(Status::INDEX_NEW | Status::WT_NEW) {
        ChangeStatus::Added
    } else if status.intersects(Status::INDEX_DELETED | Status::WT_DELETED) {
        ChangeStatus::Removed
    } else if status.intersects(
        Status::INDEX_MODIFIED
            | Status::WT_MODIFIED
            | Status::INDEX_RENAMED
            | Status::WT_RENAMED
            | Status::INDEX_TYPECHANGE
            | Status::WT_TYPECHANGE,
    ) {
        ChangeStatus::Changed
    } else {
        ChangeStatus::Unchanged
    }
}

/// Check that a remote URL is one of the shapes git understands:
/// a scheme URL, an scp-like spec, or a filesystem path.
fn validate_remote_url(url: &str) -> Result<()> {
    let invalid = || Error::InvalidRemoteUrl(url.to_string());

    if url.is_empty() || url.chars().any(char::is_whitespace) {
        return Err(invalid());
    }

    if let Some((scheme, rest)) = url.split_once("://") {
        if scheme.is_empty()
            || rest.is_empty()
            || !scheme.chars().all(|c| c.is_ascii_alphanumeric() || c == '+')
        {
            return Err(invalid());
        }
        return Ok(());
    }

    // scp-like: user@host:path
    if let Some((user_host, path)) = url.split_once(':') {
        if let Some((user, host)) = user_host.split_once('@') {
            if !user.is_empty() && !host.is_empty() && !path.is_empty() {
                return Ok(());
            }
        }
    }

    // Local paths.
    if url.starts_with('/')
        || url.starts_with("./")
        || url.starts_with("../")
        || url.starts_with('~')
    {
        return Ok(());
    }

    Err(invalid())
}

impl std::fmt::Debug for Repository {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Repository")
            .field("path", &self.inner.path())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::process::Command;
    use tempfile::TempDir;

    fn init_test_repo() -> (TempDir, Repository) {
        let temp = TempDir::new().unwrap();
        let repo = git2::Repository::init(temp.path()).unwrap();

        // Commits in tests need an identity regardless of host config
        let mut config = repo.config().unwrap();
        config.set_str("user.name", "Test User").unwrap();
        config.set_str("user.email", "test@example.com").unwrap();

        // Create initial commit (scoped to drop borrows before moving repo)
        {
            let sig = repo.signature().unwrap();
            let tree_id = repo.index().unwrap().write_tree().unwrap();
            let tree = repo.find_tree(tree_id).unwrap();
            repo.commit(Some("HEAD"), &sig, &sig, "Initial commit", &tree, &[])
                .unwrap();
        }

        let wrapped = Repository { inner: repo };
        (temp, wrapped)
    }

    fn git(dir: &Path, args: &[&str]) {
        let status = Command::new("git")
            .args(args)
            .current_dir(dir)
            .status()
            .unwrap();
        assert!(status.success(), "git {args:?} failed");
    }

    #[test]
    fn test_stage_and_detect_staged_objects() {
        let (temp, repo) = init_test_repo();

        assert!(!repo.has_staged_objects().unwrap());

        fs::write(temp.path().join("trans.ktr"), "<transformation/>").unwrap();
        repo.add_to_index(Path::new("trans.ktr")).unwrap();

        assert!(repo.has_staged_objects().unwrap());
    }

    #[test]
    fn test_unstage_restores_index() {
        let (temp, repo) = init_test_repo();

        fs::write(temp.path().join("job.kjb"), "<job/>").unwrap();
        repo.add_to_index(Path::new("job.kjb")).unwrap();
        assert!(repo.has_staged_objects().unwrap());

        repo.remove_from_index(Path::new("job.kjb")).unwrap();
        assert!(!repo.has_staged_objects().unwrap());
    }

    #[test]
    fn test_commit_with_explicit_identity() {
        let (temp, repo) = init_test_repo();

        fs::write(temp.path().join("trans.ktr"), "<transformation/>").unwrap();
        repo.add_to_index(Path::new("trans.ktr")).unwrap();
        repo.commit("Jane", "jane@example.com", "add transformation")
            .unwrap();

        let head = repo.inner().head().unwrap().peel_to_commit().unwrap();
        assert_eq!(head.author().name(), Some("Jane"));
        assert_eq!(head.author().email(), Some("jane@example.com"));
        assert_eq!(head.message(), Some("add transformation"));
        assert!(!repo.has_staged_objects().unwrap());
    }

    #[test]
    fn test_status_scan_classifies_changes() {
        let (temp, repo) = init_test_repo();

        fs::write(temp.path().join("tracked.ktr"), "v1").unwrap();
        repo.add_to_index(Path::new("tracked.ktr")).unwrap();
        repo.commit("Jane", "jane@example.com", "add file").unwrap();

        fs::write(temp.path().join("tracked.ktr"), "v2").unwrap();
        fs::write(temp.path().join("new.ktr"), "fresh").unwrap();

        let scan = repo.status_scan().unwrap();
        let find = |name: &str| {
            scan.iter()
                .find(|c| c.path == Path::new(name))
                .map(|c| c.status)
        };

        assert_eq!(find("tracked.ktr"), Some(ChangeStatus::Changed));
        assert_eq!(find("new.ktr"), Some(ChangeStatus::Added));
    }

    #[test]
    fn test_status_scan_reports_removed() {
        let (temp, repo) = init_test_repo();

        fs::write(temp.path().join("doomed.ktr"), "v1").unwrap();
        repo.add_to_index(Path::new("doomed.ktr")).unwrap();
        repo.commit("Jane", "jane@example.com", "add file").unwrap();

        fs::remove_file(temp.path().join("doomed.ktr")).unwrap();

        let scan = repo.status_scan().unwrap();
        assert_eq!(scan.len(), 1);
        assert_eq!(scan[0].status, ChangeStatus::Removed);
    }

    #[test]
    fn test_remote_lifecycle() {
        let (_temp, repo) = init_test_repo();

        assert!(!repo.has_remote());
        assert_eq!(repo.remote_url(), None);

        repo.add_remote("https://example.com/repo.git").unwrap();
        assert!(repo.has_remote());
        assert_eq!(
            repo.remote_url(),
            Some("https://example.com/repo.git".to_string())
        );

        // Re-adding replaces the URL instead of failing
        repo.add_remote("git@example.com:other/repo.git").unwrap();
        assert_eq!(
            repo.remote_url(),
            Some("git@example.com:other/repo.git".to_string())
        );

        repo.remove_remote().unwrap();
        assert!(!repo.has_remote());

        // Removing again is not an error
        repo.remove_remote().unwrap();
    }

    #[test]
    fn test_add_remote_rejects_malformed_url() {
        let (_temp, repo) = init_test_repo();

        for bad in ["", "not a url", "://missing-scheme", "plainword"] {
            let err = repo.add_remote(bad).unwrap_err();
            assert!(matches!(err, Error::InvalidRemoteUrl(_)), "{bad:?}");
            assert!(!repo.has_remote());
        }
    }

    #[test]
    fn test_validate_remote_url_accepts_common_shapes() {
        for good in [
            "https://github.com/acme/pipelines.git",
            "ssh://git@example.com/repo.git",
            "git@github.com:acme/pipelines.git",
            "/srv/git/pipelines.git",
            "../shared/pipelines.git",
        ] {
            assert!(validate_remote_url(good).is_ok(), "{good:?}");
        }
    }

    #[test]
    fn test_push_to_local_bare_remote() {
        let (temp, repo) = init_test_repo();

        let bare = TempDir::new().unwrap();
        git2::Repository::init_bare(bare.path()).unwrap();
        repo.add_remote(bare.path().to_str().unwrap()).unwrap();

        fs::write(temp.path().join("trans.ktr"), "<transformation/>").unwrap();
        repo.add_to_index(Path::new("trans.ktr")).unwrap();
        repo.commit("Jane", "jane@example.com", "add transformation")
            .unwrap();

        let updates = repo.push().unwrap();
        assert!(!updates.is_empty());
        assert!(updates.iter().all(|u| u.status.is_ok()));
    }

    #[test]
    fn test_push_without_remote_fails() {
        let (_temp, repo) = init_test_repo();
        let err = repo.push().unwrap_err();
        assert!(matches!(err, Error::RemoteNotConfigured));
    }

    #[test]
    fn test_pull_fast_forwards_from_local_remote() {
        let (upstream_dir, upstream) = init_test_repo();
        let branch = upstream.current_branch().unwrap();

        let local_dir = TempDir::new().unwrap();
        let local = Repository {
            inner: git2::Repository::clone(
                upstream_dir.path().to_str().unwrap(),
                local_dir.path(),
            )
            .unwrap(),
        };

        fs::write(upstream_dir.path().join("trans.ktr"), "v2").unwrap();
        upstream.add_to_index(Path::new("trans.ktr")).unwrap();
        upstream
            .commit("Jane", "jane@example.com", "upstream change")
            .unwrap();

        let outcome = local.pull().unwrap();
        assert!(outcome.successful);
        assert_eq!(outcome.merge_status, Some(MergeStatus::FastForward));
        assert_eq!(
            local.inner().head().unwrap().target(),
            upstream.inner().head().unwrap().target()
        );
        assert_eq!(local.current_branch().unwrap(), branch);
    }

    #[test]
    fn test_pull_up_to_date() {
        let (upstream_dir, _upstream) = init_test_repo();

        let local_dir = TempDir::new().unwrap();
        let local = Repository {
            inner: git2::Repository::clone(
                upstream_dir.path().to_str().unwrap(),
                local_dir.path(),
            )
            .unwrap(),
        };

        let outcome = local.pull().unwrap();
        assert!(outcome.successful);
        assert_eq!(outcome.merge_status, Some(MergeStatus::AlreadyUpToDate));
    }

    #[test]
    fn test_pull_conflict_then_reset_hard() {
        let (upstream_dir, upstream) = init_test_repo();

        fs::write(upstream_dir.path().join("trans.ktr"), "base").unwrap();
        upstream.add_to_index(Path::new("trans.ktr")).unwrap();
        upstream.commit("Jane", "jane@example.com", "base").unwrap();

        let local_dir = TempDir::new().unwrap();
        let local = Repository {
            inner: git2::Repository::clone(
                upstream_dir.path().to_str().unwrap(),
                local_dir.path(),
            )
            .unwrap(),
        };
        let mut config = local.inner().config().unwrap();
        config.set_str("user.name", "Local User").unwrap();
        config.set_str("user.email", "local@example.com").unwrap();
        drop(config);

        // Divergent edits to the same file on both sides
        fs::write(upstream_dir.path().join("trans.ktr"), "upstream").unwrap();
        upstream.add_to_index(Path::new("trans.ktr")).unwrap();
        upstream
            .commit("Jane", "jane@example.com", "upstream edit")
            .unwrap();

        fs::write(local_dir.path().join("trans.ktr"), "local").unwrap();
        local.add_to_index(Path::new("trans.ktr")).unwrap();
        local
            .commit("Local User", "local@example.com", "local edit")
            .unwrap();

        let outcome = local.pull().unwrap();
        assert!(!outcome.successful);
        assert!(outcome.is_conflicting());

        local.reset_hard().unwrap();
        assert!(!local.inner().index().unwrap().has_conflicts());
        assert_eq!(
            fs::read_to_string(local_dir.path().join("trans.ktr")).unwrap(),
            "local"
        );
    }

    // Kept as a shell-based sanity check that the wrapper agrees with
    // stock git about what counts as staged.
    #[test]
    fn test_has_staged_objects_agrees_with_git_cli() {
        let (temp, repo) = init_test_repo();

        fs::write(temp.path().join("a.ktr"), "x").unwrap();
        git(temp.path(), &["add", "a.ktr"]);

        assert!(repo.has_staged_objects().unwrap());
    }
}
