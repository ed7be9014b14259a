//! `spool status` command - Show working-tree changes.

use anyhow::{Context, Result};
use serde::Serialize;
use spool_git::{FileChange, RepoOps, Repository};

use crate::output;

/// Run the status command.
pub fn run(json: bool) -> Result<()> {
    let repo = Repository::open_current().context("Not inside a git repository")?;
    let changes = repo.status_scan()?;

    if json {
        println!("{}", serde_json::to_string_pretty(&JsonOutput { changes })?);
        return Ok(());
    }

    if changes.is_empty() {
        output::info("Working tree clean");
        return Ok(());
    }

    for change in &changes {
        output::detail(&format!(
            "{} {}",
            output::change_indicator(change.status),
            change.path.display()
        ));
    }
    Ok(())
}

#[derive(Debug, Serialize)]
struct JsonOutput {
    changes: Vec<FileChange>,
}
