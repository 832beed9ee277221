//! devprep - developer workstation bootstrap
//!
//! Installs or upgrades the git client, collects the developer's identity and
//! access token, and writes them into git configuration, the credential store
//! and the shell profile so private repositories clone over HTTPS without
//! further setup.

use clap::Parser;

mod cli;
mod collect;
mod commands;
mod elevation;
mod error;
mod logging;
mod merge;
mod probe;
mod runner;
mod steps;
mod vcs;

use cli::{Cli, Commands};

fn main() {
    let cli = Cli::parse();

    let result = match &cli.command {
        None | Some(Commands::Setup) => commands::setup::run(&cli),
        Some(Commands::Version) => commands::version::run(),
        Some(Commands::Completions(args)) => commands::completions::run(args),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
