//! `spool pull` command - Pull from the remote repository.

use anyhow::Result;

use crate::bridge::ConsoleBridge;
use crate::commands::utils::open_controller;

/// Run the pull command. Outcome reporting, including the
/// conflicts-discard-local-work policy, happens in the controller.
pub fn run() -> Result<()> {
    let controller = open_controller(ConsoleBridge::new(false))?;
    controller.pull()?;
    Ok(())
}
