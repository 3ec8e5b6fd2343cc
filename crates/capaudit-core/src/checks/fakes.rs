//! In-memory port implementations shared by the check tests.

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::ports::{
    BridgeExpr, CommandSpec, ForeignBridgePort, LoadError, ModuleLoaderPort, ProcessError,
    ProcessOutput, ProcessPort,
};

/// Fake packaged runtime with a fixed set of loadable modules.
#[derive(Default)]
pub struct FakeRuntime {
    present: HashSet<String>,
    broken: HashMap<String, (String, String)>,
    calls: HashMap<String, Result<serde_json::Value, LoadError>>,
    bridge: Option<Result<String, LoadError>>,
    loads: Mutex<Vec<String>>,
}

impl FakeRuntime {
    pub fn with_modules<I, S>(modules: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            present: modules.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    pub fn with_broken(mut self, module: &str, kind: &str, message: &str) -> Self {
        self.broken
            .insert(module.to_string(), (kind.to_string(), message.to_string()));
        self
    }

    pub fn with_call(
        mut self,
        target: &str,
        result: Result<serde_json::Value, LoadError>,
    ) -> Self {
        self.calls.insert(target.to_string(), result);
        self
    }

    pub fn with_bridge(mut self, result: Result<String, LoadError>) -> Self {
        self.bridge = Some(result);
        self
    }

    pub fn shared(self) -> Arc<Self> {
        Arc::new(self)
    }

    /// Modules requested so far, in order.
    pub fn loads(&self) -> Vec<String> {
        self.loads.lock().unwrap().clone()
    }
}

#[async_trait]
impl ModuleLoaderPort for FakeRuntime {
    async fn load(&self, module: &str) -> Result<(), LoadError> {
        self.loads.lock().unwrap().push(module.to_string());
        if let Some((kind, message)) = self.broken.get(module) {
            return Err(LoadError::Broken {
                module: module.to_string(),
                kind: kind.clone(),
                message: message.clone(),
            });
        }
        if self.present.contains(module) {
            Ok(())
        } else {
            Err(LoadError::NotFound {
                module: module.to_string(),
            })
        }
    }

    async fn invoke(
        &self,
        module: &str,
        function: &str,
    ) -> Result<serde_json::Value, LoadError> {
        self.load(module).await?;
        self.calls
            .get(&format!("{module}.{function}"))
            .cloned()
            .unwrap_or(Ok(serde_json::Value::Null))
    }
}

#[async_trait]
impl ForeignBridgePort for FakeRuntime {
    async fn evaluate(&self, _expr: &BridgeExpr) -> Result<String, LoadError> {
        self.bridge
            .clone()
            .unwrap_or_else(|| Err(LoadError::Protocol("no bridge configured".to_string())))
    }
}

/// Fake process port returning a canned result.
pub struct FakeProcess {
    result: Result<ProcessOutput, ProcessError>,
    seen: Mutex<Vec<CommandSpec>>,
}

impl FakeProcess {
    pub fn exits(code: i32, stdout: &[u8]) -> Arc<Self> {
        Arc::new(Self {
            result: Ok(ProcessOutput {
                exit_code: Some(code),
                stdout: stdout.to_vec(),
                stderr: Vec::new(),
            }),
            seen: Mutex::new(Vec::new()),
        })
    }

    pub fn fails(err: ProcessError) -> Arc<Self> {
        Arc::new(Self {
            result: Err(err),
            seen: Mutex::new(Vec::new()),
        })
    }

    pub fn seen(&self) -> Vec<CommandSpec> {
        self.seen.lock().unwrap().clone()
    }
}

#[async_trait]
impl ProcessPort for FakeProcess {
    async fn run(&self, command: &CommandSpec) -> Result<ProcessOutput, ProcessError> {
        self.seen.lock().unwrap().push(command.clone());
        self.result.clone()
    }
}
