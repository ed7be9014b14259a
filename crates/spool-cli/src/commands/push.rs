//! `spool push` command - Push the current branch to the remote.

use anyhow::Result;

use crate::bridge::ConsoleBridge;
use crate::commands::utils::open_controller;

/// Run the push command.
pub fn run() -> Result<()> {
    let controller = open_controller(ConsoleBridge::new(false))?;
    controller.push()?;
    Ok(())
}
