mod agents;
mod cli;
mod error;
mod inventory;
mod rpm;
mod utils;
mod workflow;

use agents::upgrade::SecurityMode;
use clap::Parser;
use cli::{Cli, Commands};
use colored::Colorize;
use std::process;

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Upgrade { targets, security } => {
            let mode = if security {
                SecurityMode::All
            } else {
                SecurityMode::None
            };
            workflow::execute_upgrade(&cli.root, &targets, mode, cli.json, cli.verbose)
        }
        Commands::UpgradeMinimal { targets } => workflow::execute_upgrade(
            &cli.root,
            &targets,
            SecurityMode::Minimal,
            cli.json,
            cli.verbose,
        ),
    };

    if let Err(e) = result {
        eprintln!("{} {}", "Error:".red().bold(), e);
        process::exit(1);
    }
}
