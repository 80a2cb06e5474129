//! Launchkit - deployment bootstrap
//!
//! Prepares a runtime environment and starts an application in three
//! fail-fast steps: upgrade the package manager, install the dependencies
//! declared in the manifest, launch the application.

use std::io::Write;

use clap::Parser;
use miette::Diagnostic;

mod cli;
mod commands;
mod config;
mod error;
mod logging;
mod manifest;
mod orchestrator;
mod runner;
mod ui;

use cli::{Cli, Commands};
use error::LaunchkitError;

fn report_error(err: &LaunchkitError) {
    eprintln!("Error: {}", err);
    if let Some(help) = err.help() {
        eprintln!("  help: {}", help);
    }
}

fn main() {
    let cli = Cli::parse();
    logging::init(cli.global.verbose, cli.global.quiet);

    let result = match cli.command.unwrap_or(Commands::Run) {
        Commands::Run => commands::run::run(&cli.global),
        Commands::Plan(args) => commands::plan::run(&cli.global, args).map(|()| 0),
        Commands::Version => commands::version::run().map(|()| 0),
        Commands::Completions(args) => commands::completions::run(args).map(|()| 0),
    };

    // process::exit skips buffered stdout
    let _ = std::io::stdout().flush();

    match result {
        Ok(code) => std::process::exit(code),
        Err(e) => {
            report_error(&e);
            std::process::exit(e.exit_code());
        }
    }
}
