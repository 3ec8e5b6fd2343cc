//! Python interpreter adapter.
//!
//! Implements [`ModuleLoaderPort`] and [`ForeignBridgePort`] by running
//! the packaged interpreter once per request through a [`ProcessPort`].
//! Every request is a fresh interpreter, so probes share no state.

mod protocol;
mod scripts;
mod validate;

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use capaudit_core::{
    BridgeExpr, CommandSpec, ForeignBridgePort, LoadError, ModuleLoaderPort, ProcessPort,
};
use tracing::debug;

use crate::process::DEFAULT_PROCESS_TIMEOUT;

use protocol::{Reply, Request};
pub use validate::is_identifier;
use validate::{validate_expr, validate_identifier, validate_module};

/// Module that provides Objective-C bridging inside the interpreter.
pub const BRIDGE_MODULE: &str = "rubicon.objc";

/// Time the relay keeps for itself after its child's budget runs out.
const RELAY_GRACE: Duration = Duration::from_millis(500);

/// Exit status of a relay whose child ran out of budget.
pub const RELAY_TIMEOUT_EXIT: i32 = 124;

/// Drives the interpreter of the distribution under audit.
#[derive(Clone)]
pub struct PythonInterpreter {
    python: PathBuf,
    process: Arc<dyn ProcessPort>,
    process_timeout: Duration,
}

impl PythonInterpreter {
    pub fn new(python: impl Into<PathBuf>, process: Arc<dyn ProcessPort>) -> Self {
        Self {
            python: python.into(),
            process,
            process_timeout: DEFAULT_PROCESS_TIMEOUT,
        }
    }

    /// Upper bound the process port puts on one interpreter run.
    ///
    /// Relayed children get a budget below it, so the interpreter kills
    /// them itself instead of being killed while they keep running.
    #[must_use]
    pub fn with_process_timeout(mut self, timeout: Duration) -> Self {
        self.process_timeout = timeout;
        self
    }

    /// Interpreter executable.
    pub fn python(&self) -> &Path {
        &self.python
    }

    /// Process port the interpreter is run through.
    pub fn process(&self) -> Arc<dyn ProcessPort> {
        Arc::clone(&self.process)
    }

    /// Budget a relayed child gets before the interpreter kills it.
    pub fn relay_budget(&self) -> Duration {
        if self.process_timeout > RELAY_GRACE * 2 {
            self.process_timeout - RELAY_GRACE
        } else {
            self.process_timeout / 2
        }
    }

    /// Command that makes the interpreter itself run `argv` through its
    /// `subprocess` module, mirroring the child's output and status.
    ///
    /// A child still running after [`Self::relay_budget`] is killed and
    /// the relay exits with [`RELAY_TIMEOUT_EXIT`].
    pub fn relay_command<I, S>(&self, argv: I) -> CommandSpec
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        CommandSpec::new(self.python.to_string_lossy())
            .arg("-c")
            .arg(scripts::RELAY)
            .arg(format!("{:.3}", self.relay_budget().as_secs_f64()))
            .args(argv)
    }

    async fn request(&self, request: &Request<'_>) -> Result<serde_json::Value, LoadError> {
        let payload = serde_json::to_string(request)
            .map_err(|e| LoadError::Protocol(format!("failed to encode request: {e}")))?;
        let command = CommandSpec::new(self.python.to_string_lossy())
            .arg("-c")
            .arg(scripts::AGENT)
            .arg(payload);

        let output = self.process.run(&command).await?;
        if !output.success() {
            let status = output
                .exit_code
                .map_or_else(|| "a signal".to_string(), |code| format!("status {code}"));
            return Err(LoadError::Protocol(format!(
                "interpreter exited with {status}: {}",
                output.stderr_tail()
            )));
        }

        let reply = Reply::parse(&output.stdout)?;
        debug!(?request, ?reply, "interpreter replied");
        reply.into_result()
    }
}

impl std::fmt::Debug for PythonInterpreter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PythonInterpreter")
            .field("python", &self.python)
            .field("process_timeout", &self.process_timeout)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl ModuleLoaderPort for PythonInterpreter {
    async fn load(&self, module: &str) -> Result<(), LoadError> {
        validate_module(module)?;
        self.request(&Request::Load { module }).await.map(|_| ())
    }

    async fn invoke(
        &self,
        module: &str,
        function: &str,
    ) -> Result<serde_json::Value, LoadError> {
        validate_module(module)?;
        validate_identifier(function)?;
        self.request(&Request::Invoke { module, function }).await
    }
}

#[async_trait]
impl ForeignBridgePort for PythonInterpreter {
    async fn evaluate(&self, expr: &BridgeExpr) -> Result<String, LoadError> {
        validate_expr(expr)?;
        match self.request(&Request::Bridge { expr }).await? {
            serde_json::Value::String(rendered) => Ok(rendered),
            other => Err(LoadError::Protocol(format!(
                "bridge returned a non-string value: {other}"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use capaudit_core::{ProcessError, ProcessOutput};
    use serde_json::json;

    use super::*;

    /// Process port that records commands and answers with a canned output.
    struct CannedProcess {
        output: Result<ProcessOutput, ProcessError>,
        seen: Mutex<Vec<CommandSpec>>,
    }

    impl CannedProcess {
        fn stdout(stdout: &str) -> Arc<Self> {
            Arc::new(Self {
                output: Ok(ProcessOutput {
                    exit_code: Some(0),
                    stdout: stdout.as_bytes().to_vec(),
                    stderr: Vec::new(),
                }),
                seen: Mutex::new(Vec::new()),
            })
        }

        fn with(output: Result<ProcessOutput, ProcessError>) -> Arc<Self> {
            Arc::new(Self {
                output,
                seen: Mutex::new(Vec::new()),
            })
        }

        fn seen(&self) -> Vec<CommandSpec> {
            self.seen.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl ProcessPort for CannedProcess {
        async fn run(&self, command: &CommandSpec) -> Result<ProcessOutput, ProcessError> {
            self.seen.lock().unwrap().push(command.clone());
            self.output.clone()
        }
    }

    fn interpreter(process: &Arc<CannedProcess>) -> PythonInterpreter {
        PythonInterpreter::new("/dist/bin/python3", Arc::clone(process) as _)
    }

    #[tokio::test]
    async fn test_load_sends_request_as_argument() {
        let process = CannedProcess::stdout(r#"{"status": "ok", "value": null}"#);
        interpreter(&process).load("_scproxy").await.unwrap();

        let seen = process.seen();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0].program, "/dist/bin/python3");
        assert_eq!(seen[0].args[0], "-c");
        assert_eq!(seen[0].args[1], scripts::AGENT);
        let request: serde_json::Value = serde_json::from_str(&seen[0].args[2]).unwrap();
        assert_eq!(request, json!({"action": "load", "module": "_scproxy"}));
    }

    #[tokio::test]
    async fn test_missing_module() {
        let process = CannedProcess::stdout(r#"{"status": "missing", "module": "_ghost_module"}"#);
        let err = interpreter(&process).load("_ghost_module").await.unwrap_err();
        assert_eq!(
            err,
            LoadError::NotFound {
                module: "_ghost_module".to_string()
            }
        );
    }

    #[tokio::test]
    async fn test_invalid_name_never_spawns() {
        let process = CannedProcess::stdout("");
        let interp = interpreter(&process);
        assert!(matches!(
            interp.load("os; import shutil").await,
            Err(LoadError::InvalidName(_))
        ));
        assert!(matches!(
            interp.invoke("curses", "can_change_color()").await,
            Err(LoadError::InvalidName(_))
        ));
        assert!(process.seen().is_empty());
    }

    #[tokio::test]
    async fn test_invoke_returns_value() {
        let process =
            CannedProcess::stdout(r#"{"status": "ok", "value": {"exclude_simple": false}}"#);
        let value = interpreter(&process)
            .invoke("_scproxy", "_get_proxy_settings")
            .await
            .unwrap();
        assert_eq!(value, json!({"exclude_simple": false}));
    }

    #[tokio::test]
    async fn test_invoke_raised_keeps_qualified_class() {
        let process = CannedProcess::stdout(
            r#"{"status": "raised", "kind": "_curses.error", "message": "must call initscr() first"}"#,
        );
        let err = interpreter(&process)
            .invoke("curses", "can_change_color")
            .await
            .unwrap_err();
        assert_eq!(
            err,
            LoadError::Raised {
                kind: "_curses.error".to_string(),
                message: "must call initscr() first".to_string(),
            }
        );
    }

    #[tokio::test]
    async fn test_bridge_returns_rendered_string() {
        let process =
            CannedProcess::stdout(r#"{"status": "ok", "value": "https://beeware.org/contributing"}"#);
        let expr = BridgeExpr::class("NSURL")
            .send("URLWithString", vec![BridgeExpr::str("https://beeware.org/contributing")])
            .property("description");
        let rendered = interpreter(&process).evaluate(&expr).await.unwrap();
        assert_eq!(rendered, "https://beeware.org/contributing");
    }

    #[tokio::test]
    async fn test_bridge_non_string_is_protocol_error() {
        let process = CannedProcess::stdout(r#"{"status": "ok", "value": 3}"#);
        let err = interpreter(&process)
            .evaluate(&BridgeExpr::class("NSURL"))
            .await
            .unwrap_err();
        assert!(matches!(err, LoadError::Protocol(_)));
    }

    #[tokio::test]
    async fn test_interpreter_crash_is_protocol_error() {
        let process = CannedProcess::with(Ok(ProcessOutput {
            exit_code: Some(1),
            stdout: Vec::new(),
            stderr: b"Fatal Python error: init_fs_encoding\n".to_vec(),
        }));
        let err = interpreter(&process).load("json").await.unwrap_err();
        assert_eq!(
            err,
            LoadError::Protocol(
                "interpreter exited with status 1: Fatal Python error: init_fs_encoding"
                    .to_string()
            )
        );
    }

    #[tokio::test]
    async fn test_spawn_failure_is_transport() {
        let process = CannedProcess::with(Err(ProcessError::Spawn {
            program: "/dist/bin/python3".to_string(),
            reason: "No such file or directory".to_string(),
        }));
        let err = interpreter(&process).load("json").await.unwrap_err();
        assert!(matches!(err, LoadError::Transport(ProcessError::Spawn { .. })));
    }

    #[test]
    fn test_relay_command() {
        let process = CannedProcess::stdout("");
        let command = interpreter(&process).relay_command(["uname", "-s"]);
        assert_eq!(command.program, "/dist/bin/python3");
        assert_eq!(command.args[2..], ["29.500", "uname", "-s"]);
        assert_eq!(
            command.to_string(),
            "/dist/bin/python3 -c <script> 29.500 uname -s"
        );
    }

    #[test]
    fn test_relay_budget_stays_below_process_timeout() {
        let process = CannedProcess::stdout("");
        let interp = interpreter(&process);
        for (timeout, budget) in [
            (Duration::from_secs(30), Duration::from_millis(29_500)),
            (Duration::from_secs(1), Duration::from_millis(500)),
            (Duration::from_millis(800), Duration::from_millis(400)),
        ] {
            let interp = interp.clone().with_process_timeout(timeout);
            assert_eq!(interp.relay_budget(), budget);
            assert!(interp.relay_budget() < timeout);
        }
    }
}
