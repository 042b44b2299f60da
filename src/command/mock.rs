use std::sync::Mutex;

use crate::command::{CommandOutput, CommandRunner};
use crate::error::Result;

/// Mock runner for testing flows without spawning processes.
///
/// Records every command line in call order. Responses are matched by
/// command prefix, first match wins; unmatched commands succeed with empty
/// output.
pub struct MockRunner {
    calls: Mutex<Vec<String>>,
    responses: Mutex<Vec<(String, CommandOutput)>>,
    interactive_exit: Mutex<Option<i32>>,
}

impl MockRunner {
    /// Create a runner where every command succeeds
    pub fn new() -> Self {
        MockRunner {
            calls: Mutex::new(Vec::new()),
            responses: Mutex::new(Vec::new()),
            interactive_exit: Mutex::new(Some(0)),
        }
    }

    /// Answer commands starting with `prefix` with `output`
    pub fn respond(&self, prefix: impl Into<String>, output: CommandOutput) {
        lock(&self.responses).push((prefix.into(), output));
    }

    /// Make commands starting with `prefix` exit with code 1
    pub fn fail_on(&self, prefix: impl Into<String>) {
        self.respond(prefix, CommandOutput::failed(1, "mock failure"));
    }

    /// Exit code reported by interactive processes
    pub fn set_interactive_exit(&self, code: Option<i32>) {
        *lock(&self.interactive_exit) = code;
    }

    /// Every command line seen so far, in order
    pub fn commands(&self) -> Vec<String> {
        lock(&self.calls).clone()
    }

    /// Number of recorded commands starting with `prefix`
    pub fn count(&self, prefix: &str) -> usize {
        lock(&self.calls)
            .iter()
            .filter(|c| c.starts_with(prefix))
            .count()
    }
}

impl Default for MockRunner {
    fn default() -> Self {
        Self::new()
    }
}

fn lock<T>(mutex: &Mutex<T>) -> std::sync::MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

impl CommandRunner for MockRunner {
    fn run(&self, command: &str) -> Result<CommandOutput> {
        lock(&self.calls).push(command.to_string());
        let output = lock(&self.responses)
            .iter()
            .find(|(prefix, _)| command.starts_with(prefix.as_str()))
            .map(|(_, output)| output.clone())
            .unwrap_or_else(|| CommandOutput::ok(""));
        Ok(output)
    }

    fn run_interactive(&self, command_line: &str) -> Result<Option<i32>> {
        lock(&self.calls).push(command_line.to_string());
        Ok(*lock(&self.interactive_exit))
    }
}
