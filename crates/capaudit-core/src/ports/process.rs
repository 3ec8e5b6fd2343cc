//! External-process invocation port.

use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A program invocation: executable plus arguments.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandSpec {
    /// Executable name or path.
    pub program: String,
    /// Arguments passed verbatim.
    pub args: Vec<String>,
}

impl CommandSpec {
    /// Create a command with no arguments.
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
        }
    }

    /// Append one argument.
    #[must_use]
    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    /// Append several arguments.
    #[must_use]
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }
}

impl fmt::Display for CommandSpec {
    /// Short form for logs and report details. Inline scripts are elided.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.program)?;
        for arg in &self.args {
            if arg.contains('\n') {
                f.write_str(" <script>")?;
            } else {
                write!(f, " {arg}")?;
            }
        }
        Ok(())
    }
}

/// Captured result of a finished process.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProcessOutput {
    /// Exit code, `None` when the process was terminated by a signal.
    pub exit_code: Option<i32>,
    pub stdout: Vec<u8>,
    pub stderr: Vec<u8>,
}

impl ProcessOutput {
    /// Whether the process exited with status 0.
    pub const fn success(&self) -> bool {
        matches!(self.exit_code, Some(0))
    }

    /// Last non-empty stderr line, for diagnostics.
    pub fn stderr_tail(&self) -> String {
        String::from_utf8_lossy(&self.stderr)
            .lines()
            .rev()
            .find(|line| !line.trim().is_empty())
            .map(|line| line.trim().to_string())
            .unwrap_or_default()
    }
}

/// Errors that prevent a process from producing an output at all.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ProcessError {
    /// The program could not be started.
    #[error("failed to spawn {program}: {reason}")]
    Spawn { program: String, reason: String },

    /// The program ran longer than allowed and was killed.
    #[error("{program} did not exit within {}s and was killed", .after.as_secs_f64())]
    TimedOut { program: String, after: Duration },

    /// Reading the program's output failed.
    #[error("I/O error while running {program}: {reason}")]
    Io { program: String, reason: String },
}

impl ProcessError {
    /// Program the error refers to.
    pub fn program(&self) -> &str {
        match self {
            Self::Spawn { program, .. }
            | Self::TimedOut { program, .. }
            | Self::Io { program, .. } => program,
        }
    }
}

/// Port for running external programs.
///
/// Implementations must bound every invocation in time: a child that
/// hangs is killed and reported as [`ProcessError::TimedOut`].
#[async_trait]
pub trait ProcessPort: Send + Sync {
    /// Run the command to completion, capturing stdout and stderr.
    async fn run(&self, command: &CommandSpec) -> Result<ProcessOutput, ProcessError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_display_elides_scripts() {
        let cmd = CommandSpec::new("python3")
            .arg("-c")
            .arg("import sys\nprint(sys.platform)")
            .arg("_scproxy");
        assert_eq!(cmd.to_string(), "python3 -c <script> _scproxy");
    }

    #[test]
    fn test_output_success() {
        let ok = ProcessOutput {
            exit_code: Some(0),
            ..Default::default()
        };
        assert!(ok.success());

        let signalled = ProcessOutput::default();
        assert!(!signalled.success());
    }

    #[test]
    fn test_stderr_tail_skips_blank_lines() {
        let output = ProcessOutput {
            exit_code: Some(1),
            stdout: Vec::new(),
            stderr: b"Traceback:\n  boom\nRuntimeError: nope\n\n".to_vec(),
        };
        assert_eq!(output.stderr_tail(), "RuntimeError: nope");
    }

    #[test]
    fn test_process_error_program() {
        let err = ProcessError::TimedOut {
            program: "uname".to_string(),
            after: Duration::from_millis(1500),
        };
        assert_eq!(err.program(), "uname");
        assert_eq!(err.to_string(), "uname did not exit within 1.5s and was killed");
    }
}
