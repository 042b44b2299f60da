use std::io::{self, Read, Write};
use std::process::{Child, Command, Stdio};
use std::thread;

use crate::command::{CommandOutput, CommandRunner};
use crate::error::{ReleaseError, Result};

/// Runs command lines through `sh -c` in the current working directory.
#[derive(Debug, Clone)]
pub struct ShellRunner {
    shell: String,
}

impl ShellRunner {
    pub fn new() -> Self {
        ShellRunner {
            shell: "sh".to_string(),
        }
    }

    fn command(&self, line: &str) -> Command {
        let mut command = Command::new(&self.shell);
        command.arg("-c").arg(line);
        command
    }
}

impl Default for ShellRunner {
    fn default() -> Self {
        Self::new()
    }
}

impl CommandRunner for ShellRunner {
    fn run(&self, command: &str) -> Result<CommandOutput> {
        let output = self
            .command(command)
            .output()
            .map_err(|e| ReleaseError::command(command, None, e.to_string()))?;

        Ok(CommandOutput {
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            code: output.status.code(),
        })
    }

    fn run_interactive(&self, command_line: &str) -> Result<Option<i32>> {
        let mut child = self
            .command(command_line)
            .stdin(Stdio::inherit())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| ReleaseError::spawn(command_line, e))?;

        let stdout = child
            .stdout
            .take()
            .map(|out| forward_chunks(out, io::stdout(), "stdout"));
        let stderr = child
            .stderr
            .take()
            .map(|err| forward_chunks(err, io::stderr(), "stderr"));

        let status = match child.wait() {
            Ok(status) => status,
            Err(e) => {
                terminate(&mut child);
                return Err(ReleaseError::spawn(command_line, e));
            }
        };

        for handle in [stdout, stderr].into_iter().flatten() {
            if handle.join().is_err() {
                log::warn!("output reader for `{}` panicked", command_line);
            }
        }

        Ok(status.code())
    }
}

/// Copies a child stream to `sink` chunk by chunk as it arrives.
///
/// Prompts that end without a newline must reach the user while the child
/// waits for an answer, so nothing is held back for line boundaries.
fn forward_chunks<S, W>(mut stream: S, mut sink: W, label: &'static str) -> thread::JoinHandle<()>
where
    S: Read + Send + 'static,
    W: Write + Send + 'static,
{
    thread::spawn(move || {
        let mut buf = [0u8; 4096];
        loop {
            let n = match stream.read(&mut buf) {
                Ok(0) => break,
                Ok(n) => n,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => {
                    log::debug!("{} closed: {}", label, e);
                    break;
                }
            };
            if let Err(e) = sink.write_all(&buf[..n]).and_then(|()| sink.flush()) {
                log::debug!("cannot forward {}: {}", label, e);
                break;
            }
        }
    })
}

fn terminate(child: &mut Child) {
    drop(child.stdin.take());
    drop(child.stdout.take());
    drop(child.stderr.take());
    if let Err(e) = child.kill() {
        log::debug!("kill after failed wait: {}", e);
    }
}
