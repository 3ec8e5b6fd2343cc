//! Per-probe outcomes.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::probe::{CheckPass, ProbeKind};
use crate::error::ProbeError;

/// Pass / Fail / Skip, used for single outcomes and for whole reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Pass,
    Fail,
    Skip,
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pass => f.write_str("PASS"),
            Self::Fail => f.write_str("FAIL"),
            Self::Skip => f.write_str("SKIP"),
        }
    }
}

/// Error taxonomy attached to non-clean outcomes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FailureKind {
    /// Identifier not importable.
    ModuleMissing,
    /// Observed value differs from the expected literal.
    AssertionMismatch,
    /// Non-zero exit, timeout, or spawn failure of an invoked process.
    ExternalProcessError,
    /// The full behavior cannot be exercised safely; only existence was checked.
    CapabilityUnsafe,
    /// Anything else, attached verbatim.
    UnexpectedError,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::ModuleMissing => "ModuleMissing",
            Self::AssertionMismatch => "AssertionMismatch",
            Self::ExternalProcessError => "ExternalProcessError",
            Self::CapabilityUnsafe => "CapabilityUnsafe",
            Self::UnexpectedError => "UnexpectedError",
        };
        f.write_str(name)
    }
}

/// Result of one probe invocation. Immutable once produced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Outcome {
    pub probe_name: String,
    pub probe_kind: ProbeKind,
    pub status: Status,
    /// Taxonomy kind for failures, or `CapabilityUnsafe` on a degraded pass.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kind: Option<FailureKind>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
    pub elapsed_ms: u64,
}

impl Outcome {
    /// Outcome for a check that returned normally.
    pub fn passed(
        probe_name: impl Into<String>,
        probe_kind: ProbeKind,
        pass: CheckPass,
        elapsed_ms: u64,
    ) -> Self {
        let (kind, detail) = match pass {
            CheckPass::Verified => (None, None),
            CheckPass::Degraded { reason } => (Some(FailureKind::CapabilityUnsafe), Some(reason)),
        };
        Self {
            probe_name: probe_name.into(),
            probe_kind,
            status: Status::Pass,
            kind,
            detail,
            elapsed_ms,
        }
    }

    /// Outcome for a check that failed.
    pub fn failed(
        probe_name: impl Into<String>,
        probe_kind: ProbeKind,
        error: &ProbeError,
        elapsed_ms: u64,
    ) -> Self {
        Self {
            probe_name: probe_name.into(),
            probe_kind,
            status: Status::Fail,
            kind: Some(error.kind()),
            detail: Some(error.to_string()),
            elapsed_ms,
        }
    }

    /// Outcome for a probe that was not invoked.
    pub fn skipped(
        probe_name: impl Into<String>,
        probe_kind: ProbeKind,
        reason: impl Into<String>,
    ) -> Self {
        Self {
            probe_name: probe_name.into(),
            probe_kind,
            status: Status::Skip,
            kind: None,
            detail: Some(reason.into()),
            elapsed_ms: 0,
        }
    }

    /// Whether this is a pass that only ran the weaker existence check.
    pub fn is_degraded(&self) -> bool {
        self.status == Status::Pass && self.kind == Some(FailureKind::CapabilityUnsafe)
    }
}
