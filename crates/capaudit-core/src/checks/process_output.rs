//! Behavioral check on the output of an external process.

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::{CheckPass, ProbeCheck};
use crate::error::ProbeError;
use crate::ports::{CommandSpec, ProcessPort};

/// Runs a command and asserts its exact stdout bytes.
pub struct ProcessOutputCheck {
    process: Arc<dyn ProcessPort>,
    command: CommandSpec,
    expected_stdout: Vec<u8>,
}

impl ProcessOutputCheck {
    pub fn new(
        process: Arc<dyn ProcessPort>,
        command: CommandSpec,
        expected_stdout: impl Into<Vec<u8>>,
    ) -> Self {
        Self {
            process,
            command,
            expected_stdout: expected_stdout.into(),
        }
    }
}

#[async_trait]
impl ProbeCheck for ProcessOutputCheck {
    async fn check(&self) -> Result<CheckPass, ProbeError> {
        let output = self.process.run(&self.command).await?;

        if !output.success() {
            let status = output
                .exit_code
                .map_or_else(|| "terminated by signal".to_string(), |code| format!("exit status {code}"));
            let tail = output.stderr_tail();
            let reason = if tail.is_empty() {
                status
            } else {
                format!("{status}: {tail}")
            };
            return Err(ProbeError::ExternalProcess {
                command: self.command.to_string(),
                reason,
            });
        }

        if output.stdout != self.expected_stdout {
            return Err(ProbeError::mismatch(
                format!("stdout of `{}`", self.command),
                String::from_utf8_lossy(&self.expected_stdout),
                String::from_utf8_lossy(&output.stdout),
            ));
        }
        Ok(CheckPass::Verified)
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::checks::fakes::FakeProcess;
    use crate::domain::FailureKind;
    use crate::ports::ProcessError;

    fn uname() -> CommandSpec {
        CommandSpec::new("uname").arg("-s")
    }

    #[tokio::test]
    async fn test_matching_stdout_passes() {
        let process = FakeProcess::exits(0, b"Darwin\n");
        let check = ProcessOutputCheck::new(Arc::clone(&process) as _, uname(), b"Darwin\n".to_vec());
        assert_eq!(check.check().await, Ok(CheckPass::Verified));
        assert_eq!(process.seen(), vec![uname()]);
    }

    #[tokio::test]
    async fn test_other_platform_output_is_assertion_mismatch() {
        let check = ProcessOutputCheck::new(
            FakeProcess::exits(0, b"Linux\n"),
            uname(),
            b"Darwin\n".to_vec(),
        );
        let err = check.check().await.unwrap_err();
        assert_eq!(err.kind(), FailureKind::AssertionMismatch);
        let detail = err.to_string();
        assert!(detail.contains(r#"expected "Darwin\n""#), "{detail}");
        assert!(detail.contains(r#"got "Linux\n""#), "{detail}");
    }

    #[tokio::test]
    async fn test_non_zero_exit_is_external_process_error() {
        let check = ProcessOutputCheck::new(
            FakeProcess::exits(2, b"Darwin\n"),
            uname(),
            b"Darwin\n".to_vec(),
        );
        let err = check.check().await.unwrap_err();
        assert_eq!(err.kind(), FailureKind::ExternalProcessError);
        assert!(err.to_string().contains("exit status 2"));
    }

    #[tokio::test]
    async fn test_timeout_is_external_process_error() {
        let check = ProcessOutputCheck::new(
            FakeProcess::fails(ProcessError::TimedOut {
                program: "uname".to_string(),
                after: Duration::from_secs(1),
            }),
            uname(),
            b"Darwin\n".to_vec(),
        );
        let err = check.check().await.unwrap_err();
        assert_eq!(err.kind(), FailureKind::ExternalProcessError);
    }
}
