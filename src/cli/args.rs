//! CLI argument definitions using clap
//!
//! Commands:
//! - profrate start [--config <path>] [--port <port>]
//! - profrate check-config [--config <path>]

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// profrate - professor reviews with consistent aggregate ratings
#[derive(Parser, Debug)]
#[command(name = "profrate")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Start the HTTP server
    Start {
        /// Path to configuration file (defaults apply when omitted)
        #[arg(long)]
        config: Option<PathBuf>,

        /// Override the configured port
        #[arg(long)]
        port: Option<u16>,
    },

    /// Validate a configuration file and print it with defaults filled in
    CheckConfig {
        /// Path to configuration file
        #[arg(long, default_value = "./profrate.json")]
        config: PathBuf,
    },
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
