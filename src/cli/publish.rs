//! Publish flow
//!
//! Runs the release steps strictly in order. The first failure stops the
//! sequence, is reported, and triggers a best-effort revert of the docs and
//! manifest in the working tree.

use std::fmt;

use crate::boundary::{self, BoundaryWarning};
use crate::cli::args::PublishArgs;
use crate::cli::clean;
use crate::command::{execute, spawn_interactive, CommandRunner};
use crate::config::Settings;
use crate::docs;
use crate::error::{ReleaseError, Result};
use crate::manifest;
use crate::ui::{self, InputProvider};

pub const VERSION_PROMPT: &str = "No version provided. Type the new version: ";

/// Steps of the publish flow, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PublishStep {
    ReadManifest,
    ResolveVersion,
    Clean,
    GenerateDocs,
    PatchDocs,
    CommitAndPush,
    Publish,
}

impl PublishStep {
    pub fn name(&self) -> &'static str {
        match self {
            PublishStep::ReadManifest => "read-manifest",
            PublishStep::ResolveVersion => "resolve-version",
            PublishStep::Clean => "clean",
            PublishStep::GenerateDocs => "generate-docs",
            PublishStep::PatchDocs => "patch-version-in-docs",
            PublishStep::CommitAndPush => "commit-and-push",
            PublishStep::Publish => "publish",
        }
    }
}

impl fmt::Display for PublishStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Versions known to the flow so far
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Release {
    /// Version read from the manifest, empty when it has none
    pub current_version: String,
    /// Version being published, empty until resolved
    pub new_version: String,
}

/// How a publish attempt ended
#[derive(Debug)]
pub enum PublishOutcome {
    Published(Release),
    Reverted {
        step: PublishStep,
        error: ReleaseError,
        /// Set when the revert itself failed
        revert_error: Option<ReleaseError>,
    },
}

impl PublishOutcome {
    pub fn is_published(&self) -> bool {
        matches!(self, PublishOutcome::Published(_))
    }
}

/// Drives one publish attempt.
pub struct PublishFlow<'a, R: ?Sized, I: ?Sized> {
    runner: &'a R,
    input: &'a mut I,
    settings: &'a Settings,
    args: &'a PublishArgs,
}

impl<'a, R, I> PublishFlow<'a, R, I>
where
    R: CommandRunner + ?Sized,
    I: InputProvider + ?Sized,
{
    pub fn new(
        runner: &'a R,
        input: &'a mut I,
        settings: &'a Settings,
        args: &'a PublishArgs,
    ) -> Self {
        PublishFlow {
            runner,
            input,
            settings,
            args,
        }
    }

    /// Runs every step, reverting on the first failure.
    pub fn run(mut self) -> PublishOutcome {
        let mut step = PublishStep::ReadManifest;
        let mut release = Release::default();

        match self.run_steps(&mut step, &mut release) {
            Ok(()) => {
                ui::display_success("Finished Publishing");
                PublishOutcome::Published(release)
            }
            Err(error) => {
                ui::display_error(&format!("{} failed: {}", step, error));
                let revert_error = revert_changes(self.runner, self.settings).err();
                if let Some(e) = &revert_error {
                    ui::display_error(&format!("Revert failed: {}", e));
                }
                PublishOutcome::Reverted {
                    step,
                    error,
                    revert_error,
                }
            }
        }
    }

    fn run_steps(&mut self, step: &mut PublishStep, release: &mut Release) -> Result<()> {
        *step = PublishStep::ReadManifest;
        release.current_version = read_current_version(self.settings)?;

        *step = PublishStep::ResolveVersion;
        release.new_version = resolve_new_version(self.args, &mut *self.input)?;
        ui::display_version_change(&release.current_version, &release.new_version);
        let warnings = boundary::check_new_version(&release.current_version, &release.new_version);
        for warning in &warnings {
            ui::display_boundary_warning(warning);
        }

        *step = PublishStep::Clean;
        clean::run_clean_flow(self.runner, self.settings)?;

        ui::display_step("Starting the Docs generation");
        *step = PublishStep::GenerateDocs;
        generate_docs(self.runner, self.settings)?;

        *step = PublishStep::PatchDocs;
        patch_docs(self.settings, release)?;

        *step = PublishStep::CommitAndPush;
        commit_and_push(self.runner, self.settings, &release.new_version)?;

        *step = PublishStep::Publish;
        call_publisher(self.runner, self.settings, self.args, &release.new_version)
    }
}

/// Reads the manifest version, warning and falling back to an empty string
/// when the field is missing.
pub fn read_current_version(settings: &Settings) -> Result<String> {
    ui::display_step(&format!("Opening {} file...", settings.manifest_file_name));
    match manifest::read_version(&settings.manifest_path)? {
        Some(version) => {
            ui::display_status(&format!("The current version is {}", version));
            Ok(version)
        }
        None => {
            ui::display_boundary_warning(&BoundaryWarning::MissingManifestVersion {
                manifest: settings.manifest_path.clone(),
            });
            Ok(String::new())
        }
    }
}

/// Takes the version from the arguments, or asks for it.
///
/// A typed answer is used verbatim; an empty answer asks again.
pub fn resolve_new_version<I: InputProvider + ?Sized>(
    args: &PublishArgs,
    input: &mut I,
) -> Result<String> {
    ui::display_step("Checking the new version provided...");
    if let Some(version) = args.requested_version() {
        return Ok(version.to_string());
    }

    loop {
        let answer = input.read_line(VERSION_PROMPT)?;
        if !answer.is_empty() {
            return Ok(answer);
        }
    }
}

pub fn generate_docs<R: CommandRunner + ?Sized>(runner: &R, settings: &Settings) -> Result<()> {
    ui::display_step("Generating Document...");
    execute(runner, &docs::generate_command(settings))
        .map(|_| ())
        .map_err(ReleaseError::doc_generation)
}

/// Swaps the current version for the new one in the generated document.
pub fn patch_docs(settings: &Settings, release: &Release) -> Result<()> {
    ui::display_step("Replacing the old version in the document");
    if release.current_version.is_empty() {
        ui::display_status("Current version unknown, document left as generated");
        return Ok(());
    }

    let count = docs::patch_version(
        &settings.docs_path,
        &release.current_version,
        &release.new_version,
    )?;
    if count == 0 {
        ui::display_boundary_warning(&BoundaryWarning::VersionNotInDocs {
            version: release.current_version.clone(),
            docs: settings.docs_path.clone(),
        });
    }
    Ok(())
}

pub fn commit_message(new_version: &str) -> String {
    format!("📝 docs: Updated docs for {}", new_version)
}

/// Commits the docs and pushes them to the remote branch of the same name.
pub fn commit_and_push<R: CommandRunner + ?Sized>(
    runner: &R,
    settings: &Settings,
    new_version: &str,
) -> Result<()> {
    ui::display_step("Committing and Pushing Docs changes...");
    let branch = execute(runner, "git rev-parse --abbrev-ref HEAD")?;
    let branch = branch.stdout.trim();
    log::debug!("current branch: {}", branch);

    execute(runner, &format!("git add {}", settings.docs_path))?;
    execute(
        runner,
        &format!("git commit -m \"{}\"", commit_message(new_version)),
    )?;
    execute(
        runner,
        &format!("git push -u {} {}", settings.commands.remote, branch),
    )?;
    Ok(())
}

/// Hands the release over to the publisher.
pub fn call_publisher<R: CommandRunner + ?Sized>(
    runner: &R,
    settings: &Settings,
    args: &PublishArgs,
    new_version: &str,
) -> Result<()> {
    ui::display_step("Calling Publisher");
    let command = format!("{} {}", settings.commands.publisher, new_version);
    spawn_interactive(runner, &command, &args.publisher_flags())
}

/// Unstages and discards changes to the docs and manifest.
///
/// Best effort: the first failing command ends the revert.
pub fn revert_changes<R: CommandRunner + ?Sized>(runner: &R, settings: &Settings) -> Result<()> {
    let files = format!("{} {}", settings.docs_path, settings.manifest_path);
    let names = format!(
        "{} and {}",
        settings.docs_file_name, settings.manifest_file_name
    );

    ui::display_revert("Checking for modifications...");
    ui::display_revert(&format!("Unstaging possible changes from {} files", names));
    execute(runner, &format!("git restore --staged {}", files))?;
    ui::display_revert(&format!("Discarding possible changes of {} files", names));
    execute(runner, &format!("git checkout -- {}", files))?;
    Ok(())
}
