//! `spool init` command - Put a project directory under version control.

use std::path::Path;

use anyhow::Result;
use spool_core::{DialogStatus, PresentationBridge};
use spool_git::Repository;

use crate::bridge::ConsoleBridge;
use crate::output;

/// Run the init command.
pub fn run(path: Option<&Path>, yes: bool) -> Result<()> {
    let path = path.unwrap_or_else(|| Path::new("."));

    if Repository::open(path).is_ok() {
        output::info("Already under version control");
        return Ok(());
    }

    let bridge = ConsoleBridge::new(yes);
    let question = format!("Initialize a Git repository in {}?", path.display());
    if bridge.confirm("Initialize repository", &question) == DialogStatus::Cancel {
        return Ok(());
    }

    Repository::init(path)?;
    output::success("Repository initialized");
    Ok(())
}
