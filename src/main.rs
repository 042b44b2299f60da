use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;

use bundle_publish::cli::{self, Args};
use bundle_publish::command::ShellRunner;
use bundle_publish::config::{self, Settings};
use bundle_publish::ui::{self, ConsoleInput};

fn initialize_logger(debug: bool) -> Result<()> {
    let level = if debug { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp(None)
        .format_target(false)
        .try_init()
        .context("Failed to initialize logger")?;
    Ok(())
}

fn main() -> Result<ExitCode> {
    let args = Args::parse();

    initialize_logger(args.debug)?;

    let config = match config::load_config(args.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            ui::display_error(&format!("Error loading config: {}", e));
            ui::display_finished();
            return Ok(ExitCode::FAILURE);
        }
    };
    let settings = Settings::from_config(&config);

    let runner = ShellRunner::new();
    let mut input = ConsoleInput::new();

    // Failures are already reported by the flow; only the status is left.
    match cli::run(&args.command, &settings, &runner, &mut input) {
        Ok(()) => Ok(ExitCode::SUCCESS),
        Err(_) => Ok(ExitCode::FAILURE),
    }
}
