//! External-process adapter built on `tokio::process`.

use std::process::Stdio;
use std::time::Duration;

use async_trait::async_trait;
use capaudit_core::{CommandSpec, ProcessError, ProcessOutput, ProcessPort};
use tokio::process::Command;
use tokio::time::timeout;
use tracing::{debug, warn};

/// Default upper bound for one child process.
pub const DEFAULT_PROCESS_TIMEOUT: Duration = Duration::from_secs(30);

/// Runs commands as child processes with captured output.
///
/// Children are spawned with `kill_on_drop`, so a child still running
/// when its timeout elapses (or when the calling probe task is aborted)
/// is killed rather than leaked.
#[derive(Debug, Clone)]
pub struct TokioProcessRunner {
    timeout: Duration,
}

impl TokioProcessRunner {
    pub const fn new(timeout: Duration) -> Self {
        Self { timeout }
    }

    pub const fn timeout(&self) -> Duration {
        self.timeout
    }
}

impl Default for TokioProcessRunner {
    fn default() -> Self {
        Self::new(DEFAULT_PROCESS_TIMEOUT)
    }
}

#[async_trait]
impl ProcessPort for TokioProcessRunner {
    async fn run(&self, command: &CommandSpec) -> Result<ProcessOutput, ProcessError> {
        debug!(command = %command, timeout_secs = self.timeout.as_secs_f64(), "spawning process");

        let child = Command::new(&command.program)
            .args(&command.args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| ProcessError::Spawn {
                program: command.program.clone(),
                reason: e.to_string(),
            })?;

        let output = match timeout(self.timeout, child.wait_with_output()).await {
            Ok(Ok(output)) => output,
            Ok(Err(e)) => {
                return Err(ProcessError::Io {
                    program: command.program.clone(),
                    reason: e.to_string(),
                });
            }
            Err(_) => {
                warn!(command = %command, "process timed out, killed");
                return Err(ProcessError::TimedOut {
                    program: command.program.clone(),
                    after: self.timeout,
                });
            }
        };

        debug!(
            command = %command,
            exit_code = ?output.status.code(),
            stdout_bytes = output.stdout.len(),
            stderr_bytes = output.stderr.len(),
            "process finished"
        );

        Ok(ProcessOutput {
            exit_code: output.status.code(),
            stdout: output.stdout,
            stderr: output.stderr,
        })
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;

    fn sh(script: &str) -> CommandSpec {
        CommandSpec::new("sh").arg("-c").arg(script)
    }

    #[tokio::test]
    async fn test_captures_stdout_and_exit_code() {
        let runner = TokioProcessRunner::default();
        let output = runner.run(&sh("printf 'Darwin\\n'")).await.unwrap();
        assert!(output.success());
        assert_eq!(output.stdout, b"Darwin\n");
        assert!(output.stderr.is_empty());
    }

    #[tokio::test]
    async fn test_non_zero_exit_is_not_an_error() {
        let runner = TokioProcessRunner::default();
        let output = runner.run(&sh("echo boom >&2; exit 3")).await.unwrap();
        assert_eq!(output.exit_code, Some(3));
        assert_eq!(output.stderr_tail(), "boom");
    }

    #[tokio::test]
    async fn test_missing_program_is_spawn_error() {
        let runner = TokioProcessRunner::default();
        let err = runner
            .run(&CommandSpec::new("capaudit-definitely-not-a-program"))
            .await
            .unwrap_err();
        assert!(matches!(err, ProcessError::Spawn { .. }));
        assert_eq!(err.program(), "capaudit-definitely-not-a-program");
    }

    #[tokio::test]
    async fn test_hung_child_times_out() {
        let runner = TokioProcessRunner::new(Duration::from_millis(200));
        let err = runner
            .run(&CommandSpec::new("sleep").arg("10"))
            .await
            .unwrap_err();
        assert_eq!(
            err,
            ProcessError::TimedOut {
                program: "sleep".to_string(),
                after: Duration::from_millis(200),
            }
        );
    }
}
