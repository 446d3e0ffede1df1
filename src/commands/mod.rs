//! Command-line interface definitions

pub mod scan;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// QR Lens - find and decode every QR code in an image
#[derive(Parser, Debug)]
#[command(name = "qr-lens")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Configuration file (defaults to the platform config directory)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Without a subcommand the scanner window opens
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Scan a single image and print the results
    Scan(scan::ScanArgs),
}
