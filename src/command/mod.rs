//! External command execution layer
//!
//! Every step of both flows is a shell command. This module provides a
//! trait-based abstraction over running them, so flows can be driven either by
//! a real shell or by a recording mock in tests.
//!
//! # Overview
//!
//! - [CommandRunner]: the raw capability (run a command line, report output)
//! - [shell::ShellRunner]: real implementation using `sh -c`
//! - [mock::MockRunner]: scripted implementation that records every call
//!
//! Flows never call the trait directly. They go through [execute] and
//! [spawn_interactive], which own the logging and the success/failure rules.

pub mod mock;
pub mod shell;

pub use mock::MockRunner;
pub use shell::ShellRunner;

use crate::error::{ReleaseError, Result};

/// Captured result of a short-lived command.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CommandOutput {
    pub stdout: String,
    pub stderr: String,
    /// Exit code, `None` when the process was terminated by a signal
    pub code: Option<i32>,
}

impl CommandOutput {
    /// Successful output carrying the given stdout.
    pub fn ok(stdout: impl Into<String>) -> Self {
        CommandOutput {
            stdout: stdout.into(),
            stderr: String::new(),
            code: Some(0),
        }
    }

    /// Failed output with the given exit code and stderr.
    pub fn failed(code: i32, stderr: impl Into<String>) -> Self {
        CommandOutput {
            stdout: String::new(),
            stderr: stderr.into(),
            code: Some(code),
        }
    }

    pub fn with_stderr(mut self, stderr: impl Into<String>) -> Self {
        self.stderr = stderr.into();
        self
    }

    pub fn success(&self) -> bool {
        self.code == Some(0)
    }
}

/// Runs shell command lines on behalf of the flows.
///
/// ## Error Handling
///
/// Implementations return `Err` only when the process could not be started
/// or waited on. A process that ran and exited non-zero is reported through
/// [CommandOutput::code] and judged by [execute].
pub trait CommandRunner {
    /// Run a command line to completion, capturing stdout and stderr.
    fn run(&self, command: &str) -> Result<CommandOutput>;

    /// Run a command line with live output and inherited stdin.
    ///
    /// Returns the exit code once the child terminates, `None` if it was
    /// killed by a signal.
    fn run_interactive(&self, command_line: &str) -> Result<Option<i32>>;
}

/// Runs a command, logging it and its output.
///
/// Stderr from a successful command is logged as a warning and never fails
/// the call. A non-zero exit status fails with
/// [ReleaseError::CommandExecution].
pub fn execute<R: CommandRunner + ?Sized>(runner: &R, command: &str) -> Result<CommandOutput> {
    log::info!("{}", command);
    let output = runner.run(command)?;

    if !output.success() {
        return Err(ReleaseError::command(
            command,
            output.code,
            output.stderr.trim_end(),
        ));
    }
    if !output.stderr.is_empty() {
        log::warn!("{}", output.stderr.trim_end());
    }
    if !output.stdout.is_empty() {
        log::info!("{}", output.stdout.trim_end());
    }

    Ok(output)
}

/// Runs a long-lived interactive process such as the publisher.
///
/// The command and its arguments are joined into one shell line. Only an exit
/// code of exactly 1 is treated as failure, see [exit_code_is_failure].
pub fn spawn_interactive<R: CommandRunner + ?Sized>(
    runner: &R,
    command: &str,
    args: &[String],
) -> Result<()> {
    let line = shell_line(command, args);
    log::debug!("spawning `{}`", line);
    let code = runner.run_interactive(&line)?;

    match code {
        Some(code) if exit_code_is_failure(Some(code)) => {
            Err(ReleaseError::ProcessExit { command: line, code })
        }
        _ => {
            log::debug!("`{}` exited with {:?}", line, code);
            Ok(())
        }
    }
}

/// Decides whether an interactive process exit code is a failure.
///
/// Only code 1 fails. Other non-zero codes and signal termination (`None`)
/// count as success; callers relying on this must not widen it silently.
pub fn exit_code_is_failure(code: Option<i32>) -> bool {
    code == Some(1)
}

/// Joins a command and its arguments with single spaces, keeping empty
/// arguments as blank slots.
pub fn shell_line(command: &str, args: &[String]) -> String {
    let mut line = command.to_string();
    for arg in args {
        line.push(' ');
        line.push_str(arg);
    }
    line
}
