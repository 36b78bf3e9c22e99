use clap::Parser;
use std::process::ExitCode;

mod cli;
mod commands;
mod dispatch;
mod output;

use cli::Cli;
use commands::config::{load_config, Config};
use commands::{resolve_data_dir, CommandContext, CommandError, Stores};
use dispatch::{LocalCommand, LocalDispatch, StoreCommand, StoreDispatch};
use homes_store::StoreError;
use tracing::{debug, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(&cli);

    match run(&cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            if cli.json {
                eprintln!("{}", format_error_json(&e));
            } else {
                eprintln!("Error: {e}");
            }
            error_exit_code(&e)
        }
    }
}

/// Sends diagnostics to stderr. `RUST_LOG` wins over the verbosity flags.
fn init_tracing(cli: &Cli) {
    let default_level = if cli.verbose {
        "debug"
    } else if cli.quiet {
        "error"
    } else {
        "warn"
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .try_init();
}

async fn run(cli: &Cli) -> commands::Result<()> {
    // Config commands and completions run without the stores
    if let Some(dispatch) = LocalDispatch::try_from_cli(cli) {
        // A broken config file must not lock the user out of fixing it
        let config = load_config().unwrap_or_else(|e| {
            warn!("{e}; using defaults");
            Config::default()
        });
        let ctx = CommandContext::from_cli(cli, &config);
        if dispatch.is_config_edit() {
            return commands::config::execute_edit(&ctx).await;
        }
        return dispatch.execute(&ctx);
    }

    let config = load_config()?;
    let ctx = CommandContext::from_cli(cli, &config);
    let data_dir = resolve_data_dir(cli, &config)?;
    debug!(data_dir = %data_dir.display(), "opening stores");
    let stores = Stores::open(&data_dir);

    match StoreDispatch::from_cli(cli) {
        Some(dispatch) => dispatch.execute(&ctx, &stores).await,
        None => Ok(()),
    }
}

/// Renders an error as the `{"error": {"code", "message"}}` JSON object.
fn format_error_json(e: &CommandError) -> String {
    let error_json = serde_json::json!({
        "error": {
            "code": error_code(e),
            "message": e.to_string(),
        }
    });
    serde_json::to_string_pretty(&error_json).unwrap_or_else(|_| error_json.to_string())
}

/// Returns the error code string for JSON output.
fn error_code(e: &CommandError) -> &'static str {
    match e {
        CommandError::Store(StoreError::Validation { .. }) => "VALIDATION_ERROR",
        CommandError::Store(StoreError::NotFound { .. }) => "NOT_FOUND",
        CommandError::Store(StoreError::Unavailable { .. }) => "STORE_ERROR",
        CommandError::Config(_) => "CONFIG_ERROR",
        CommandError::Io(_) => "IO_ERROR",
        CommandError::Json(_) => "JSON_ERROR",
    }
}

/// Returns the exit code for an error.
fn error_exit_code(e: &CommandError) -> ExitCode {
    match e {
        CommandError::Store(err) => ExitCode::from(err.exit_code()),
        CommandError::Config(_) => ExitCode::from(5),
        CommandError::Io(_) => ExitCode::from(3),
        CommandError::Json(_) => ExitCode::from(1),
    }
}
