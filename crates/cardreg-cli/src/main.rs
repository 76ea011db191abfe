//! Agent Card registry CLI
//!
//! Builds and verifies the checksum manifest, validates cards against their
//! schemas, and keeps card files in canonical form.

mod cli;
mod commands;
mod error;

use std::path::PathBuf;

use clap::Parser;
use colored::Colorize;
use tracing::Level;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use cli::{Cli, Commands};
use error::Result;

fn main() {
    if let Err(e) = run() {
        eprintln!("{}: {}", "error".red().bold(), e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let root = match cli.root {
        Some(root) => root,
        None => std::env::current_dir()?,
    };

    match cli.command {
        Some(cmd) => execute_command(cmd, root),
        None => {
            println!("{} Agent Card registry tool", "cardreg".green().bold());
            println!();
            println!("Run {} for available commands.", "cardreg --help".cyan());
            Ok(())
        }
    }
}

fn init_tracing(verbose: bool) {
    // Logs go to stderr so command output stays clean.
    let builder = FmtSubscriber::builder().with_writer(std::io::stderr);
    let result = if verbose {
        tracing::subscriber::set_global_default(
            builder.with_max_level(Level::DEBUG).with_target(true).finish(),
        )
    } else {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("error"));
        tracing::subscriber::set_global_default(builder.with_env_filter(filter).finish())
    };
    if let Err(e) = result {
        eprintln!("{}: {}", "warning".yellow().bold(), e);
    }
    tracing::debug!("Verbose mode enabled");
}

fn execute_command(cmd: Commands, root: PathBuf) -> Result<()> {
    match cmd {
        Commands::Checksums { verify, diff } => commands::run_checksums(&root, verify, diff),
        Commands::Validate { mode } => commands::run_validate(&root, mode),
        Commands::Sidecars => commands::run_sidecars(&root),
        Commands::Reorder { dry_run } => commands::run_reorder(&root, dry_run),
        Commands::Mirror { dry_run } => commands::run_mirror(&root, dry_run),
    }
}
