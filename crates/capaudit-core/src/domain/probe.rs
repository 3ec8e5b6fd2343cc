//! Probe definitions.

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::ProbeError;

/// What a probe validates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProbeKind {
    /// Named modules load.
    ModulePresence,
    /// A capability behaves correctly at runtime.
    Behavioral,
}

impl fmt::Display for ProbeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ModulePresence => f.write_str("module-presence"),
            Self::Behavioral => f.write_str("behavioral"),
        }
    }
}

/// Successful result of a check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckPass {
    /// The full assertion held.
    Verified,
    /// Only a weaker existence check ran, because the full behavior
    /// cannot be exercised safely. `reason` says why.
    Degraded { reason: String },
}

/// The zero-argument operation behind a probe.
///
/// Checks must be independent: no shared mutable state, no reliance on
/// the order in which probes run.
#[async_trait]
pub trait ProbeCheck: Send + Sync {
    async fn check(&self) -> Result<CheckPass, ProbeError>;
}

/// A named, immutable check of one platform capability.
#[derive(Clone)]
pub struct Probe {
    name: String,
    kind: ProbeKind,
    description: String,
    check: Arc<dyn ProbeCheck>,
}

impl Probe {
    /// Create a probe.
    pub fn new(
        name: impl Into<String>,
        kind: ProbeKind,
        description: impl Into<String>,
        check: impl ProbeCheck + 'static,
    ) -> Self {
        Self {
            name: name.into(),
            kind,
            description: description.into(),
            check: Arc::new(check),
        }
    }

    /// Create a module-presence probe.
    pub fn module_presence(
        name: impl Into<String>,
        description: impl Into<String>,
        check: impl ProbeCheck + 'static,
    ) -> Self {
        Self::new(name, ProbeKind::ModulePresence, description, check)
    }

    /// Create a behavioral probe.
    pub fn behavioral(
        name: impl Into<String>,
        description: impl Into<String>,
        check: impl ProbeCheck + 'static,
    ) -> Self {
        Self::new(name, ProbeKind::Behavioral, description, check)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub const fn kind(&self) -> ProbeKind {
        self.kind
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    /// Shared handle to the check, so it can be moved into a task.
    pub fn check(&self) -> Arc<dyn ProbeCheck> {
        Arc::clone(&self.check)
    }
}

impl fmt::Debug for Probe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Probe")
            .field("name", &self.name)
            .field("kind", &self.kind)
            .field("description", &self.description)
            .finish_non_exhaustive()
    }
}
