//! CLI module
//!
//! Provides command-line interface for:
//! - start: Load configuration and serve the HTTP API
//! - check-config: Validate a configuration file and print the resolved values

mod args;
mod commands;
mod config;
mod errors;

pub use args::{Cli, Command};
pub use commands::{check_config, run, run_command, start};
pub use config::Config;
pub use errors::{CliError, CliErrorCode, CliResult};
