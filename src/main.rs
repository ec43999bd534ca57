//! smlm-sync - channel reconciliation for SUSE Manager
//!
//! Reads a YAML list of packages and makes sure each one is present in its
//! declared target channels, adding it where it is missing.

use clap::Parser;
use miette::Diagnostic;
use tracing_subscriber::EnvFilter;

mod cli;
mod commands;
mod config;
mod domain;
mod error;
mod reconcile;
mod rpc;
mod session;
mod ui;

use cli::{Cli, Commands};

/// Log level for a `-v` count, used when `RUST_LOG` is unset
fn default_level(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    }
}

fn init_logging(verbose: u8) {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(default_level(verbose))),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match cli.command {
        Commands::AddPackages(args) => commands::add_packages::run(&cli.server, args, cli.verbose),
        Commands::ListPackages(args) => commands::list_packages::run(&cli.server, args),
        Commands::Version => commands::version::run(),
        Commands::Completions(args) => commands::completions::run(args),
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        if let Some(help) = e.help() {
            eprintln!("  help: {help}");
        }
        std::process::exit(1);
    }
}
