use anyhow::{Context, Result};
use spool_core::WorkflowController;
use spool_git::{RepoOps, Repository};

use crate::bridge::{ConsoleBridge, RefreshFlag};

/// Controller type every command works with.
pub type Controller = WorkflowController<Repository, ConsoleBridge, RefreshFlag>;

/// Open the enclosing repository and bind a controller to it.
pub fn open_controller(bridge: ConsoleBridge) -> Result<Controller> {
    let repo = Repository::open_current().context("Not inside a git repository")?;
    let mut controller = WorkflowController::new(bridge, RefreshFlag::default());
    controller.bind(repo);
    Ok(controller)
}

/// Default author string from the repository identity, as "Name <email>".
pub fn default_author(repo: &Repository) -> Option<String> {
    let sig = repo.inner().signature().ok()?;
    match (sig.name(), sig.email()) {
        (Some(name), Some(email)) => Some(format!("{name} <{email}>")),
        _ => None,
    }
}

/// Path of the per-project config file.
pub fn config_path(repo: &Repository) -> Option<std::path::PathBuf> {
    repo.workdir().map(|w| w.join(".spool.toml"))
}
