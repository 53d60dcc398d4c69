//! CLI command implementations

use std::path::Path;
use std::sync::Arc;

use super::args::Command;
use super::config::Config;
use super::errors::{CliError, CliResult};
use crate::http_server::{AppState, HttpServer};
use crate::observability::{log_event, log_event_with_fields, Event};

/// Parse arguments and run the selected command
pub fn run() -> CliResult<()> {
    let cli = super::args::Cli::parse_args();
    run_command(cli.command)
}

/// Run the appropriate command based on CLI args
pub fn run_command(cmd: Command) -> CliResult<()> {
    match cmd {
        Command::Start { config, port } => start(config.as_deref(), port),
        Command::CheckConfig { config } => check_config(&config),
    }
}

fn resolve_config(config_path: Option<&Path>, port: Option<u16>) -> CliResult<Config> {
    let mut config = match config_path {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };
    if let Some(port) = port {
        config.server.port = port;
        config.validate()?;
    }
    Ok(config)
}

/// Load configuration, wire the services over a fresh document store, and
/// serve until shutdown.
pub fn start(config_path: Option<&Path>, port: Option<u16>) -> CliResult<()> {
    log_event(Event::BootStart);

    let config = resolve_config(config_path, port).map_err(|e| {
        log_event_with_fields(Event::BootFailed, &[("reason", e.message())]);
        e
    })?;
    log_event_with_fields(
        Event::ConfigLoaded,
        &[
            ("address", config.server.socket_addr().as_str()),
            (
                "max_comment_length",
                config.max_comment_length.to_string().as_str(),
            ),
        ],
    );

    let state = Arc::new(AppState::in_memory(config.review_limits()));
    let server = HttpServer::new(config.server.clone(), state);

    let rt = tokio::runtime::Runtime::new()
        .map_err(|e| boot_failed(format!("Failed to create tokio runtime: {}", e)))?;

    rt.block_on(async {
        server
            .start()
            .await
            .map_err(|e| boot_failed(format!("HTTP server failed: {}", e)))
    })?;

    Ok(())
}

fn boot_failed(reason: String) -> CliError {
    log_event_with_fields(Event::BootFailed, &[("reason", reason.as_str())]);
    CliError::boot_failed(reason)
}

/// Validate a configuration file and print it with defaults applied
pub fn check_config(config_path: &Path) -> CliResult<()> {
    let config = Config::load(config_path)?;
    println!("{}", serde_json::to_string_pretty(&config)?);
    Ok(())
}
