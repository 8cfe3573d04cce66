use std::path::PathBuf;

use serde::Serialize;

/// How a child process ended.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ExitOutcome {
    Exited { code: i32 },
    Signaled { signal: String },
    /// The process never started; the message describes why.
    SpawnFailed { error: String },
}

impl ExitOutcome {
    pub fn code(&self) -> Option<i32> {
        match self {
            ExitOutcome::Exited { code } => Some(*code),
            _ => None,
        }
    }

    pub fn signal(&self) -> Option<&str> {
        match self {
            ExitOutcome::Signaled { signal } => Some(signal),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            ExitOutcome::SpawnFailed { error } => Some(error),
            _ => None,
        }
    }

    pub fn describe(&self) -> String {
        match self {
            ExitOutcome::Exited { code } => format!("exited with code {}", code),
            ExitOutcome::Signaled { signal } => format!("was terminated with signal {}", signal),
            ExitOutcome::SpawnFailed { error } => format!("failed to spawn: {}", error),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Invocation {
    /// Identity of the command being run, used for console output.
    pub identity: String,
    pub executable: PathBuf,
    pub args: Vec<String>,
    /// Resolve the executable through the platform shell.
    pub use_shell: bool,
    pub current_dir: Option<PathBuf>,
    pub echo: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommandResult {
    pub identity: String,
    pub args: Vec<String>,
    pub duration_ms: u64,
    #[serde(flatten)]
    pub outcome: ExitOutcome,
}

impl CommandResult {
    pub fn code(&self) -> Option<i32> {
        self.outcome.code()
    }

    pub fn signal(&self) -> Option<&str> {
        self.outcome.signal()
    }

    pub fn is_success(&self) -> bool {
        self.code() == Some(0) && self.signal().is_none()
    }
}
