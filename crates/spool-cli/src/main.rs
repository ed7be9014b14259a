//! Spool CLI - Git workflow for pipeline designers.

use clap::Parser;

mod bridge;
mod commands;
mod output;

use commands::{Cli, Commands};

fn main() {
    let cli = Cli::parse();
    output::set_quiet(cli.quiet);

    let result = match cli.command {
        Commands::Init { path } => commands::init::run(path.as_deref(), cli.yes),
        Commands::Stage { path } => commands::stage::run_stage(&path),
        Commands::Unstage { path } => commands::stage::run_unstage(&path),
        Commands::Commit { message, author } => {
            commands::commit::run(&message, author.as_deref())
        }
        Commands::Pull => commands::pull::run(),
        Commands::Push => commands::push::run(),
        Commands::Remote { url, unset } => commands::remote::run(url.as_deref(), unset),
        Commands::Status { json } => commands::status::run(json),
    };

    if let Err(e) = result {
        output::error(&e.to_string());
        std::process::exit(1);
    }
}
