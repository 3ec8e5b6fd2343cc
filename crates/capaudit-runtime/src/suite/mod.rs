//! Probe catalogues, one per supported target platform.

mod darwin;

use std::sync::Arc;

use capaudit_core::{
    CommandSpec, ForeignBridgePort, HarnessError, ModuleLoaderPort, PlatformTarget, Probe,
    ProcessPort,
};

use crate::interpreter::PythonInterpreter;

pub use darwin::darwin_suite;

/// Targets that have a catalogue.
pub const SUPPORTED_TARGETS: &[&str] = &["darwin"];

/// The collaborators a catalogue wires into its probes.
#[derive(Clone)]
pub struct SuitePorts {
    pub loader: Arc<dyn ModuleLoaderPort>,
    pub bridge: Arc<dyn ForeignBridgePort>,
    pub process: Arc<dyn ProcessPort>,
    /// Command prefix under which the runtime itself runs the appended argv.
    pub relay: CommandSpec,
}

impl SuitePorts {
    /// Wire every port to one packaged interpreter.
    pub fn for_interpreter(interpreter: PythonInterpreter) -> Self {
        let relay = interpreter.relay_command(std::iter::empty::<String>());
        let process = interpreter.process();
        let interpreter = Arc::new(interpreter);
        Self {
            loader: Arc::clone(&interpreter) as _,
            bridge: interpreter,
            process,
            relay,
        }
    }
}

impl std::fmt::Debug for SuitePorts {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SuitePorts")
            .field("relay", &self.relay)
            .finish_non_exhaustive()
    }
}

/// Build the catalogue for a target.
pub fn suite_for(target: &PlatformTarget, ports: &SuitePorts) -> Result<Vec<Probe>, HarnessError> {
    match target.as_str() {
        "darwin" => Ok(darwin_suite(ports)),
        other => Err(HarnessError::UnsupportedTarget(other.to_string())),
    }
}
