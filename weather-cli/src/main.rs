//! Binary crate for the `weather` command-line tool.
//!
//! This crate focuses on:
//! - Parsing CLI arguments
//! - Batch and interactive lookups with human-friendly output
//! - The full-screen terminal dashboard

use std::{fs::OpenOptions, sync::Mutex};

use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli;
mod dashboard;
mod session;
#[cfg(test)]
mod testing;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cmd = cli::Cli::parse();
    init_tracing(matches!(cmd.command, Some(cli::Command::Dashboard { .. })));
    cmd.run().await
}

/// stderr by default; the dashboard logs to a file so the screen stays clean.
fn init_tracing(dashboard: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    if dashboard {
        let log_path = std::env::temp_dir().join("weather-dashboard.log");
        if let Ok(file) = OpenOptions::new().create(true).append(true).open(&log_path) {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .init();
        }
        return;
    }

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
