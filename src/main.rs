//! QR Lens - find and decode every QR code in an image
//!
//! Upload one still image; every QR code in it is located, decoded and
//! outlined. Detection is done by the `rqrr` crate behind a small detector
//! trait, so the backend can be swapped without touching the rest.

mod commands;
mod config;
mod dashboard;
mod ingest;
mod vision;

#[cfg(test)]
mod test_support;

use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use crate::commands::{Cli, Commands};
use crate::config::AppConfig;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging; RUST_LOG wins over -v
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_log_level(cli.verbose)));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let (config, config_path) = load_config(cli.config.clone());

    match cli.command {
        Some(Commands::Scan(ref args)) => {
            commands::scan::run(args, &config)?;
        }
        None => {
            info!("QR Lens starting...");
            dashboard::run_dashboard(config, config_path)
                .map_err(|e| anyhow::anyhow!("Scanner window error: {}", e))?;
            info!("QR Lens shutdown complete");
        }
    }

    Ok(())
}

/// Log level for a `-v` count
fn default_log_level(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// Load configuration from the given file or the platform config directory
fn load_config(explicit: Option<PathBuf>) -> (AppConfig, Option<PathBuf>) {
    let path = match explicit {
        Some(path) => Some(path),
        None => match config::default_config_path() {
            Ok(path) => Some(path),
            Err(e) => {
                tracing::warn!("{}", e);
                None
            }
        },
    };

    let config = match &path {
        Some(path) => config::load_or_default(path),
        None => AppConfig::default(),
    };

    (config, path)
}
