//! Error types for probe checks and harness construction.
//!
//! Every probe-level error is converted into a Fail [`crate::Outcome`] by
//! the runner; none of these escape a harness run.

use std::time::Duration;

use thiserror::Error;

use crate::domain::FailureKind;
use crate::ports::{LoadError, ProcessError};

/// Why a single probe check failed.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ProbeError {
    /// One or more identifiers are not importable.
    #[error("Missing modules: {modules:?}")]
    ModuleMissing { modules: Vec<String> },

    /// Modules exist but raised while loading (corrupt build, not a missing one).
    #[error("{}", describe_broken(.broken, .missing))]
    BrokenModules {
        /// `(module, "ExceptionClass: message")` pairs.
        broken: Vec<(String, String)>,
        /// Identifiers that were absent outright.
        missing: Vec<String>,
    },

    /// Observed value differs from the expected literal.
    #[error("{subject}: expected {expected:?}, got {actual:?}")]
    AssertionMismatch {
        subject: String,
        expected: String,
        actual: String,
    },

    /// An invoked process failed to run or exited unsuccessfully.
    #[error("External process `{command}` failed: {reason}")]
    ExternalProcess { command: String, reason: String },

    /// The check did not finish within the runner's per-probe budget.
    #[error("Probe timed out after {}s", .0.as_secs_f64())]
    TimedOut(Duration),

    /// A condition the probe was not designed for, attached verbatim.
    #[error("{kind}: {message}")]
    Unexpected { kind: String, message: String },

    /// The check panicked.
    #[error("Probe panicked: {0}")]
    Panicked(String),
}

impl ProbeError {
    /// Taxonomy kind reported for this error.
    pub const fn kind(&self) -> FailureKind {
        match self {
            Self::ModuleMissing { .. } => FailureKind::ModuleMissing,
            Self::AssertionMismatch { .. } => FailureKind::AssertionMismatch,
            Self::ExternalProcess { .. } | Self::TimedOut(_) => FailureKind::ExternalProcessError,
            Self::BrokenModules { .. } | Self::Unexpected { .. } | Self::Panicked(_) => {
                FailureKind::UnexpectedError
            }
        }
    }

    /// Build an [`ProbeError::AssertionMismatch`].
    pub fn mismatch(
        subject: impl Into<String>,
        expected: impl Into<String>,
        actual: impl Into<String>,
    ) -> Self {
        Self::AssertionMismatch {
            subject: subject.into(),
            expected: expected.into(),
            actual: actual.into(),
        }
    }
}

impl From<ProcessError> for ProbeError {
    fn from(err: ProcessError) -> Self {
        Self::ExternalProcess {
            command: err.program().to_string(),
            reason: err.to_string(),
        }
    }
}

impl From<LoadError> for ProbeError {
    fn from(err: LoadError) -> Self {
        match err {
            LoadError::NotFound { module } => Self::ModuleMissing {
                modules: vec![module],
            },
            LoadError::Broken { kind, message, .. } | LoadError::Raised { kind, message } => {
                Self::Unexpected { kind, message }
            }
            LoadError::Protocol(message) => Self::Unexpected {
                kind: "ProtocolError".to_string(),
                message,
            },
            LoadError::InvalidName(name) => Self::Unexpected {
                kind: "InvalidName".to_string(),
                message: name,
            },
            LoadError::Transport(process) => process.into(),
        }
    }
}

fn describe_broken(broken: &[(String, String)], missing: &[String]) -> String {
    let listed = broken
        .iter()
        .map(|(module, cause)| format!("{module} ({cause})"))
        .collect::<Vec<_>>()
        .join(", ");
    if missing.is_empty() {
        format!("Modules present but failed to load: {listed}")
    } else {
        format!("Modules present but failed to load: {listed}; missing modules: {missing:?}")
    }
}

/// Errors raised while assembling a harness.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum HarnessError {
    #[error("Duplicate probe name: {0}")]
    DuplicateProbe(String),

    #[error("Unknown probe name: {0}")]
    UnknownProbe(String),

    #[error("No probe suite is defined for target `{0}`")]
    UnsupportedTarget(String),
}
