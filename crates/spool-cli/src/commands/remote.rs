//! `spool remote` command - Show or change the remote URL.

use anyhow::{Context, Result};
use spool_git::RepoOps;

use crate::bridge::ConsoleBridge;
use crate::commands::utils::open_controller;
use crate::output;

/// Run the remote command.
///
/// With no arguments, shows the current URL and prompts for a new one;
/// a URL argument or `--unset` presets the prompt reply so the edit
/// runs non-interactively. An empty value clears the remote.
pub fn run(url: Option<&str>, unset: bool) -> Result<()> {
    let mut bridge = ConsoleBridge::new(false);
    if unset {
        bridge = bridge.with_preset_prompt("");
    } else if let Some(url) = url {
        bridge = bridge.with_preset_prompt(url);
    }

    let controller = open_controller(bridge)?;
    let repo = controller.repository().context("repository not bound")?;

    if url.is_none() && !unset {
        match repo.remote_url() {
            Some(current) => output::detail(&current),
            None => output::info("No remote configured"),
        }
    }

    controller.edit_remote()?;
    Ok(())
}
