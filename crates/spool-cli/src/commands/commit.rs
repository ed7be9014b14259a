//! `spool commit` command - Commit the staged changes.

use anyhow::{Context, Result, bail};
use spool_core::Config;

use crate::bridge::ConsoleBridge;
use crate::commands::utils::{config_path, default_author, open_controller};

/// Run the commit command.
///
/// The author falls back to the project config, then to the repository
/// identity; the controller still validates the final string before
/// any commit is made.
pub fn run(message: &str, author: Option<&str>) -> Result<()> {
    let mut controller = open_controller(ConsoleBridge::new(false))?;

    let author = match author {
        Some(author) => author.to_string(),
        None => {
            let repo = controller
                .repository()
                .context("repository not bound")?;
            let configured = config_path(repo)
                .map(Config::load)
                .transpose()?
                .and_then(|c| c.commit.author);
            match configured.or_else(|| default_author(repo)) {
                Some(author) => author,
                None => bail!(
                    "No author available - pass --author \"Name <email>\" or set user.name/user.email"
                ),
            }
        }
    };

    controller.set_author(author);
    controller.set_commit_message(message);
    controller.commit()?;

    // The gates report their own reason when nothing was committed.
    if controller.observer().changed() {
        crate::output::success("Committed staged changes");
    }
    Ok(())
}
