//! User interface module - interaction (prompts) and formatting.
//!
//! Separates concerns:
//! - `formatter` - Display functions
//! - This module - Line input behind the [InputProvider] trait

use std::collections::VecDeque;
use std::io::{self, IsTerminal};

use console::Term;

use crate::error::{ReleaseError, Result};

pub mod formatter;

// Re-export formatter functions for convenience
pub use formatter::{
    display_boundary_warning, display_error, display_finished, display_revert, display_status, display_step,
    display_success, display_version_change,
};

/// Source of typed answers for interactive questions.
///
/// The flows only ever ask for one line of text at a time; tests swap the
/// terminal for [ScriptedInput].
pub trait InputProvider {
    /// Show `prompt` and block until one line is entered.
    ///
    /// The returned text excludes the line terminator and is otherwise
    /// untouched (no trimming).
    fn read_line(&mut self, prompt: &str) -> Result<String>;
}

/// Reads answers from the controlling terminal.
pub struct ConsoleInput {
    term: Term,
}

impl ConsoleInput {
    pub fn new() -> Self {
        ConsoleInput {
            term: Term::stdout(),
        }
    }
}

impl Default for ConsoleInput {
    fn default() -> Self {
        Self::new()
    }
}

impl InputProvider for ConsoleInput {
    fn read_line(&mut self, prompt: &str) -> Result<String> {
        if !self.term.is_term() || !io::stdin().is_terminal() {
            return read_piped_line(prompt);
        }
        self.term.write_str(prompt)?;
        self.term.flush()?;
        Ok(self.term.read_line()?)
    }
}

/// Fallback for a redirected stdin, where `Term` cannot read.
fn read_piped_line(prompt: &str) -> Result<String> {
    use std::io::Write;

    print!("{}", prompt);
    io::stdout().flush()?;

    let mut input = String::new();
    if io::stdin().read_line(&mut input)? == 0 {
        return Err(ReleaseError::prompt("stdin closed before an answer was given"));
    }
    Ok(strip_line_ending(input))
}

fn strip_line_ending(mut line: String) -> String {
    if line.ends_with('\n') {
        line.pop();
        if line.ends_with('\r') {
            line.pop();
        }
    }
    line
}

/// Pre-recorded answers, consumed in order.
#[derive(Debug, Default)]
pub struct ScriptedInput {
    answers: VecDeque<String>,
    prompts: Vec<String>,
}

impl ScriptedInput {
    pub fn new<I, S>(answers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        ScriptedInput {
            answers: answers.into_iter().map(Into::into).collect(),
            prompts: Vec::new(),
        }
    }

    /// Prompts shown so far
    pub fn prompts(&self) -> &[String] {
        &self.prompts
    }
}

impl InputProvider for ScriptedInput {
    fn read_line(&mut self, prompt: &str) -> Result<String> {
        self.prompts.push(prompt.to_string());
        self.answers
            .pop_front()
            .ok_or_else(|| ReleaseError::prompt("no scripted answer left"))
    }
}
