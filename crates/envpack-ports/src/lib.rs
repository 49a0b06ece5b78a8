//! Capability ports for the envpack pipeline.
//!
//! The engine talks to the outside world only through these traits: user
//! selection (`Prompter`), user-facing reporting (`Notifier`), and external
//! process execution (`CommandRunner`). Concrete implementations live in the
//! app and in `envpack-proc`; tests supply deterministic fakes.

use std::fmt;
use std::path::Path;

/// Interactive selection.
///
/// `Ok(None)` means the user cancelled the prompt. Implementations must not
/// invent a choice when the candidate list is empty.
pub trait Prompter {
    fn choose_one(&self, prompt: &str, candidates: &[String]) -> anyhow::Result<Option<String>>;

    fn choose_many(
        &self,
        prompt: &str,
        candidates: &[String],
    ) -> anyhow::Result<Option<Vec<String>>>;
}

/// Fire-and-forget user-facing messages.
///
/// These are reports, not a programmatic contract. The pipeline never reads
/// anything back from a notifier.
pub trait Notifier {
    fn info(&self, message: &str);
    fn error(&self, message: &str);
}

/// Failure modes of one external command run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunError {
    /// The process could not be launched at all (e.g. command not found).
    Spawn { command: String, message: String },
    /// The process ran but did not exit 0. `code` is `None` when the
    /// process was killed by a signal.
    Exit { command: String, code: Option<i32> },
}

impl RunError {
    /// Exit code carried by an [`RunError::Exit`] failure.
    pub fn exit_code(&self) -> Option<i32> {
        match self {
            RunError::Spawn { .. } => None,
            RunError::Exit { code, .. } => *code,
        }
    }
}

impl fmt::Display for RunError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RunError::Spawn { command, message } => {
                write!(f, "failed to start {command}: {message}")
            }
            RunError::Exit {
                command,
                code: Some(code),
            } => {
                write!(f, "{command} exited with code {code}")
            }
            RunError::Exit {
                command,
                code: None,
            } => {
                write!(f, "{command} was terminated by a signal")
            }
        }
    }
}

impl std::error::Error for RunError {}

/// Blocking execution of an external command.
///
/// Resolves `Ok(())` only on exit code 0; the caller is suspended until the
/// child terminates.
pub trait CommandRunner {
    fn run(&self, program: &str, args: &[String], cwd: &Path) -> Result<(), RunError>;
}
