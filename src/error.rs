use thiserror::Error;

/// Unified error type for bundle-publish operations
#[derive(Error, Debug)]
pub enum ReleaseError {
    #[error("Command failed: `{command}` (exit code {}): {stderr}", display_code(.code))]
    CommandExecution {
        command: String,
        code: Option<i32>,
        stderr: String,
    },

    #[error("Failed to start process `{command}`: {reason}")]
    ProcessSpawn { command: String, reason: String },

    #[error("Process `{command}` exited with code {code}")]
    ProcessExit { command: String, code: i32 },

    #[error("Cannot read manifest {path}: {source}")]
    ManifestRead {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Cannot parse manifest {path}: {source}")]
    ManifestParse {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Documentation generation failed: {0}")]
    DocGeneration(#[source] Box<ReleaseError>),

    #[error("Input error: {0}")]
    Prompt(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

fn display_code(code: &Option<i32>) -> String {
    code.map_or_else(|| "none".to_string(), |c| c.to_string())
}

/// Convenience type alias for Results in bundle-publish
pub type Result<T> = std::result::Result<T, ReleaseError>;

impl ReleaseError {
    /// Create a command execution error
    pub fn command(
        command: impl Into<String>,
        code: Option<i32>,
        stderr: impl Into<String>,
    ) -> Self {
        ReleaseError::CommandExecution {
            command: command.into(),
            code,
            stderr: stderr.into(),
        }
    }

    /// Create a spawn error for an interactive process
    pub fn spawn(command: impl Into<String>, reason: impl ToString) -> Self {
        ReleaseError::ProcessSpawn {
            command: command.into(),
            reason: reason.to_string(),
        }
    }

    /// Create a prompt error with context
    pub fn prompt(msg: impl Into<String>) -> Self {
        ReleaseError::Prompt(msg.into())
    }

    /// Create a configuration error with context
    pub fn config(msg: impl Into<String>) -> Self {
        ReleaseError::Config(msg.into())
    }

    /// Wrap a failed generator command as a documentation error
    pub fn doc_generation(inner: ReleaseError) -> Self {
        ReleaseError::DocGeneration(Box::new(inner))
    }
}
