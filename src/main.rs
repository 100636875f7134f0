//! CLI entry point for the fetchq download queue.

use anyhow::Result;
use clap::Parser;
use tracing::debug;

mod cli;
mod commands;
mod output;

use cli::{Cli, Command};

#[tokio::main]
async fn main() -> Result<()> {
    // Parse CLI arguments first (before tracing, so --help works without logs)
    let cli = Cli::parse();

    // Console level priority: RUST_LOG env var > quiet flag > verbose flag
    let console_level = if cli.quiet {
        "error"
    } else {
        match cli.verbose {
            0 => "info",
            1 => "debug",
            _ => "trace",
        }
    };

    fetchq::logging::init(&cli.log_file, console_level)?;

    debug!(command = ?cli.command, db_file = %cli.db_file.display(), "arguments parsed");

    match &cli.command {
        Command::DbCreate => commands::run_db_create_command(&cli.db_file).await,
        Command::Enqueue { urls, destdir } => {
            commands::run_enqueue_command(&cli.db_file, urls, destdir).await
        }
        Command::Show { n } => commands::run_show_command(&cli.db_file, *n).await,
        Command::Dequeue { n, continuous } => {
            commands::run_dequeue_command(&cli.db_file, &cli.downloader, *n, *continuous).await
        }
        Command::Failed { n } => commands::run_failed_command(&cli.db_file, *n).await,
    }
}
