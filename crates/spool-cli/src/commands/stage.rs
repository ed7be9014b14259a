//! `spool stage` / `spool unstage` commands.

use std::path::Path;

use anyhow::Result;

use crate::bridge::ConsoleBridge;
use crate::commands::utils::open_controller;
use crate::output;

/// Run the stage command.
pub fn run_stage(path: &Path) -> Result<()> {
    let controller = open_controller(ConsoleBridge::new(false))?;
    controller.stage(path)?;
    output::success(&format!("Staged {}", path.display()));
    Ok(())
}

/// Run the unstage command.
pub fn run_unstage(path: &Path) -> Result<()> {
    let controller = open_controller(ConsoleBridge::new(false))?;
    controller.unstage(path)?;
    output::success(&format!("Unstaged {}", path.display()));
    Ok(())
}
