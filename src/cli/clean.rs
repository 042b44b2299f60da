use crate::command::{execute, CommandRunner};
use crate::config::Settings;
use crate::error::Result;
use crate::ui;

/// Removes the lockfile, dependency directory and build output.
///
/// `rm -f` makes every removal idempotent.
pub fn clean_project<R: CommandRunner + ?Sized>(runner: &R, settings: &Settings) -> Result<()> {
    ui::display_step("Cleaning project...");
    execute(runner, &format!("rm -f {}", settings.lockfile_path))?;
    execute(runner, &format!("rm -f -R {}", settings.dependencies_path))?;
    execute(runner, &format!("rm -f -R {}", settings.dist_path))?;
    Ok(())
}

/// Installs dependencies and builds the bundle.
pub fn build_bundle<R: CommandRunner + ?Sized>(runner: &R, settings: &Settings) -> Result<()> {
    ui::display_step("Installing Dependencies...");
    execute(runner, &settings.commands.install)?;

    ui::display_step("Generating Build...");
    execute(runner, &settings.commands.build)?;
    Ok(())
}

/// Clean flow: clean, then install and build. The first failing command
/// aborts the rest.
pub fn run_clean_flow<R: CommandRunner + ?Sized>(runner: &R, settings: &Settings) -> Result<()> {
    clean_project(runner, settings)?;
    build_bundle(runner, settings)
}
