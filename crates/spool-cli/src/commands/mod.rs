//! CLI argument definitions and command implementations.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

pub mod commit;
pub mod init;
pub mod pull;
pub mod push;
pub mod remote;
pub mod stage;
pub mod status;
pub mod utils;

#[derive(Parser)]
#[command(
    name = "spool",
    about = "Keep pipeline definitions under Git with change markers",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Suppress informational output
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Answer yes to confirmation dialogs
    #[arg(short = 'y', long, global = true)]
    pub yes: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Put a project directory under version control
    Init {
        /// Directory to initialize (defaults to the current one)
        path: Option<PathBuf>,
    },
    /// Stage a file for the next commit
    Stage {
        /// Path relative to the repository root
        path: PathBuf,
    },
    /// Unstage a file
    Unstage {
        /// Path relative to the repository root
        path: PathBuf,
    },
    /// Commit the staged changes
    Commit {
        /// Commit message
        #[arg(short, long)]
        message: String,

        /// Author as "Name <email>" (defaults to the repository identity)
        #[arg(long)]
        author: Option<String>,
    },
    /// Pull from the remote repository
    Pull,
    /// Push the current branch to the remote repository
    Push,
    /// Show or change the remote URL
    Remote {
        /// New remote URL; prompts when omitted
        url: Option<String>,

        /// Remove the configured remote
        #[arg(long, conflicts_with = "url")]
        unset: bool,
    },
    /// Show working-tree changes
    Status {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}
