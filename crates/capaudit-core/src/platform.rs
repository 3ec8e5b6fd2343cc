//! Platform target identification and the Platform Gate.
//!
//! The gate is evaluated once, when a [`crate::Harness`] is constructed,
//! and the resulting [`GateDecision`] is threaded through the runner and
//! the aggregator. A closed gate means no probe executes at all.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Reason recorded on a report when the gate is closed.
pub const PLATFORM_MISMATCH: &str = "platform mismatch";

/// Operating system a packaged runtime is built for.
///
/// Names use the runtime's own vocabulary (`darwin`, `linux`, `win32`).
/// Common aliases are folded in at construction so that `macos` and
/// `darwin` name the same target.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlatformTarget(String);

impl PlatformTarget {
    /// Create a target from a user-supplied OS name.
    pub fn new(name: impl AsRef<str>) -> Self {
        Self(canonical_os_name(name.as_ref()))
    }

    /// The `darwin` target (macOS).
    pub fn darwin() -> Self {
        Self("darwin".to_string())
    }

    /// Canonical OS name.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PlatformTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Fold an OS name onto its canonical spelling.
pub fn canonical_os_name(raw: &str) -> String {
    let lowered = raw.trim().to_ascii_lowercase();
    match lowered.as_str() {
        "macos" | "macosx" | "osx" | "darwin" => "darwin".to_string(),
        "windows" | "win32" | "win64" => "win32".to_string(),
        _ if lowered.starts_with("linux") => "linux".to_string(),
        _ => lowered,
    }
}

/// Pure comparison between the running platform and the declared target.
pub fn evaluate(current_platform: &str, target: &PlatformTarget) -> bool {
    canonical_os_name(current_platform) == target.as_str()
}

/// Result of evaluating the Platform Gate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GateDecision {
    /// Platform reported by the environment.
    pub current: String,
    /// Platform the suite requires.
    pub target: PlatformTarget,
    /// Whether probes may run.
    pub matched: bool,
}

impl GateDecision {
    /// Evaluate the gate for a running platform.
    pub fn evaluate(current_platform: &str, target: &PlatformTarget) -> Self {
        Self {
            current: canonical_os_name(current_platform),
            target: target.clone(),
            matched: evaluate(current_platform, target),
        }
    }

    /// Whether the gate lets probes through.
    pub const fn is_open(&self) -> bool {
        self.matched
    }

    /// Skip reason when the gate is closed.
    pub fn skip_reason(&self) -> Option<String> {
        (!self.matched).then(|| {
            format!(
                "{PLATFORM_MISMATCH}: running on {}, suite targets {}",
                self.current, self.target
            )
        })
    }
}
