//! keg - formula installer
//!
//! This is the main CLI application. It loads configuration, wires the
//! production collaborators and runs operations through the ops crate
//! while rendering their events.

mod cli;
mod display;
mod error;
mod events;
mod logging;
mod setup;

use crate::cli::{Cli, Commands};
use crate::display::OutputRenderer;
use crate::error::CliError;
use crate::events::EventHandler;
use crate::setup::SystemSetup;
use clap::Parser;
use keg_config::Config;
use keg_events::EventReceiver;
use keg_ops::{InstallRequest, OperationResult, OpsCtx};
use keg_types::OutputFormat;
use std::path::Path;
use std::process;
use tokio::select;
use tracing::{error, info};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Configuration decides the output mode and where debug logs go, so it
    // loads before tracing
    let config = match load_config(&cli.global).await {
        Ok(config) => config,
        Err(e) => {
            if !cli.global.json {
                eprintln!("Error: {e}");
            }
            process::exit(1);
        }
    };
    let json_mode = config.general.default_output == OutputFormat::Json;

    init_tracing(json_mode, cli.global.debug, &config.logs_dir());

    match run(cli, config).await {
        Ok(true) => {}
        // Every formula was attempted but at least one failed
        Ok(false) => process::exit(1),
        Err(e) => {
            error!("Application error: {}", e);
            if !json_mode {
                eprintln!("Error: {e}");
            }
            process::exit(1);
        }
    }
}

/// Load configuration with proper precedence
async fn load_config(global: &cli::GlobalArgs) -> Result<Config, CliError> {
    // 1. Start with file config (or defaults)
    let mut config = Config::load_or_default(&global.config).await?;

    // 2. Merge environment variables
    config.merge_env()?;

    // 3. Apply CLI flags (highest precedence)
    apply_cli_config(&mut config, global);

    Ok(config)
}

/// Main application logic. Returns whether the command fully succeeded.
async fn run(cli: Cli, config: Config) -> Result<bool, CliError> {
    info!("Starting keg v{}", env!("CARGO_PKG_VERSION"));

    let json_output = config.general.default_output == OutputFormat::Json;

    let (event_sender, event_receiver) = keg_events::channel();
    let ops_ctx = SystemSetup::new(config.clone()).build_context(event_sender)?;

    let renderer = OutputRenderer::new(json_output, config.general.color);
    let mut event_handler =
        EventHandler::new(renderer.colors_enabled(), json_output, cli.global.debug);

    let result =
        execute_command_with_events(cli.command, ops_ctx, event_receiver, &mut event_handler)
            .await?;

    renderer.render_result(&result)?;

    info!("Command completed");
    Ok(result.is_success())
}

/// Run the blocking command on a worker thread while rendering its events
async fn execute_command_with_events(
    command: Commands,
    ops_ctx: OpsCtx,
    mut event_receiver: EventReceiver,
    event_handler: &mut EventHandler,
) -> Result<OperationResult, CliError> {
    let mut worker = tokio::task::spawn_blocking(move || execute_command(command, &ops_ctx));
    let mut events_open = true;

    loop {
        select! {
            result = &mut worker => {
                // Drain any remaining events
                while let Ok(event) = event_receiver.try_recv() {
                    event_handler.handle_event(event);
                }
                return result?;
            }

            event = event_receiver.recv(), if events_open => {
                match event {
                    Some(event) => event_handler.handle_event(event),
                    None => events_open = false,
                }
            }
        }
    }
}

/// Execute the specified command
fn execute_command(command: Commands, ctx: &OpsCtx) -> Result<OperationResult, CliError> {
    match command {
        Commands::Install {
            formulae,
            force,
            head,
            lowercase_head,
        } => {
            let request = InstallRequest::new(formulae)
                .with_force(force)
                .with_head(head)
                .with_lowercase_head(lowercase_head);
            let report = keg_ops::install(ctx, &request)?;
            Ok(OperationResult::InstallReport(report))
        }
    }
}

/// Initialize tracing/logging
fn init_tracing(json_mode: bool, debug_enabled_flag: bool, log_dir: &Path) {
    // Check if debug logging is enabled
    let debug_enabled = std::env::var("RUST_LOG").is_ok() || debug_enabled_flag;

    if debug_enabled {
        // Debug mode: structured JSON logs to file
        let log_file = log_dir.join(format!(
            "keg-{}.log",
            chrono::Utc::now().format("%Y%m%d-%H%M%S")
        ));

        let file = std::fs::create_dir_all(log_dir).and_then(|()| std::fs::File::create(&log_file));
        match file {
            Ok(file) => {
                tracing_subscriber::fmt()
                    .json()
                    .with_writer(file)
                    .with_env_filter(
                        tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(
                            |_| tracing_subscriber::EnvFilter::new("info,keg=debug,keg_ops=debug"),
                        ),
                    )
                    .init();

                if !json_mode {
                    eprintln!("Debug logging enabled: {}", log_file.display());
                }
                return;
            }
            Err(e) if !json_mode => {
                eprintln!("Warning: Failed to create log file: {e}");
                // Fallback to stderr
                tracing_subscriber::fmt()
                    .with_writer(std::io::stderr)
                    .with_env_filter(
                        tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(
                            |_| tracing_subscriber::EnvFilter::new("info,keg=debug"),
                        ),
                    )
                    .init();
                return;
            }
            Err(_) => {}
        }
    }

    if json_mode {
        // JSON mode: suppress all console output to avoid contaminating JSON
        tracing_subscriber::fmt()
            .with_writer(std::io::sink)
            .with_env_filter("off")
            .init();
    } else {
        // Normal mode: minimal logging to stderr. The CLI renders its own
        // events, so its records stay out of the terminal.
        tracing_subscriber::fmt()
            .with_writer(std::io::stderr)
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn,keg=off")),
            )
            .init();
    }
}

/// Apply CLI configuration overrides (highest precedence)
fn apply_cli_config(config: &mut Config, global: &cli::GlobalArgs) {
    if let Some(color) = global.color {
        config.general.color = color;
    }
    if global.json {
        config.general.default_output = OutputFormat::Json;
    }
}
