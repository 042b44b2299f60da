//! Flow dispatch
//!
//! Maps a parsed subcommand onto its flow and reports the result. Nothing in
//! here exits the process; `main` turns the returned result into an exit
//! status.

pub mod args;
pub mod clean;
pub mod publish;

pub use args::{Args, Commands, PublishArgs};
pub use publish::{PublishFlow, PublishOutcome, PublishStep, Release};

use crate::command::CommandRunner;
use crate::config::Settings;
use crate::error::Result;
use crate::ui::{self, InputProvider};

/// Runs the flow selected by `command`.
///
/// Always prints the closing `Execution finished` line, whether the flow
/// succeeded or not. Errors are displayed before being returned.
pub fn run<R, I>(
    command: &Commands,
    settings: &Settings,
    runner: &R,
    input: &mut I,
) -> Result<()>
where
    R: CommandRunner + ?Sized,
    I: InputProvider + ?Sized,
{
    let result = match command {
        Commands::CleanBuild => {
            ui::display_status("Welcome.");
            let result = clean::run_clean_flow(runner, settings);
            match &result {
                Ok(()) => ui::display_success("Finished cleaning and installed dependencies"),
                Err(e) => ui::display_error(&e.to_string()),
            }
            result
        }
        Commands::Publish(args) => {
            ui::display_status("Welcome. The publishing operation will begin.");
            match PublishFlow::new(runner, input, settings, args).run() {
                PublishOutcome::Published(release) => {
                    log::debug!("published {}", release.new_version);
                    Ok(())
                }
                PublishOutcome::Reverted { error, .. } => Err(error),
            }
        }
    };

    ui::display_finished();
    result
}
