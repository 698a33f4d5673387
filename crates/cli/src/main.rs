//! Cashdesk CLI - Main entry point
//!
//! Usage:
//! ```bash
//! cashdesk
//! cashdesk --data-file ~/bank/accounts.json
//! RUST_LOG=debug cashdesk 2> cashdesk.log
//! ```

use anyhow::{Context, Result};
use cashdesk_cli::{Shell, ShellConfig};
use clap::Parser;
use std::io;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Cashdesk - console bank accounts with cash on hand, savings interest and credit lines
#[derive(Parser)]
#[command(name = "cashdesk")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Account file path [default: $CASHDESK_DATA_FILE or data/accounts.json]
    #[arg(long)]
    data_file: Option<PathBuf>,

    /// Log filter used when RUST_LOG is not set
    #[arg(long, default_value = "warn")]
    log_level: String,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing (stderr, so logs never mix with the menu)
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| cli.log_level.as_str().into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let config = ShellConfig::resolve(cli.data_file);
    tracing::info!(data_file = %config.data_file.display(), "Starting cashdesk");

    let stdin = io::stdin();
    let mut shell = Shell::open(stdin.lock(), io::stdout(), &config)
        .context("Failed to start the interactive shell")?;
    shell.run().context("Console I/O failed")?;

    Ok(())
}
