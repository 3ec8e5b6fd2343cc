//! Audit settings and validation.
//!
//! Settings are layered by the CLI: defaults, then an optional JSON file,
//! then environment variables and flags (see [`SettingsOverrides`]).

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::platform::PlatformTarget;

/// Default interpreter of the packaged runtime.
pub const DEFAULT_PYTHON: &str = "python3";

/// Default per-probe budget, in seconds.
pub const DEFAULT_PROBE_TIMEOUT_SECS: u64 = 60;

/// Default budget for one external process, in seconds.
pub const DEFAULT_PROCESS_TIMEOUT_SECS: u64 = 30;

const MAX_TIMEOUT_SECS: u64 = 3600;

/// Harness settings.
///
/// All fields are optional so a config file may set only what it needs.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct AuditSettings {
    /// Target OS of the distribution under audit (e.g. `darwin`).
    pub target: Option<String>,

    /// Interpreter of the distribution under audit.
    pub python: Option<PathBuf>,

    /// Upper bound for a single probe.
    pub probe_timeout_secs: Option<u64>,

    /// Upper bound for a single external process.
    pub process_timeout_secs: Option<u64>,

    /// Probes reported as skipped instead of run.
    pub disabled_probes: Vec<String>,
}

impl AuditSettings {
    /// Settings with every default filled in.
    pub fn with_defaults() -> Self {
        Self {
            target: Some(PlatformTarget::darwin().to_string()),
            python: Some(PathBuf::from(DEFAULT_PYTHON)),
            probe_timeout_secs: Some(DEFAULT_PROBE_TIMEOUT_SECS),
            process_timeout_secs: Some(DEFAULT_PROCESS_TIMEOUT_SECS),
            disabled_probes: Vec::new(),
        }
    }

    /// Load settings from a JSON file.
    pub fn from_json_file(path: &Path) -> Result<Self, SettingsError> {
        let raw = fs::read_to_string(path).map_err(|e| SettingsError::Read {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        serde_json::from_str(&raw).map_err(|e| SettingsError::Parse {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })
    }

    /// Effective target platform.
    pub fn effective_target(&self) -> PlatformTarget {
        self.target
            .as_deref()
            .map_or_else(PlatformTarget::darwin, PlatformTarget::new)
    }

    /// Effective interpreter path.
    pub fn effective_python(&self) -> PathBuf {
        self.python
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_PYTHON))
    }

    /// Effective per-probe timeout in seconds.
    pub const fn effective_probe_timeout_secs(&self) -> u64 {
        match self.probe_timeout_secs {
            Some(secs) => secs,
            None => DEFAULT_PROBE_TIMEOUT_SECS,
        }
    }

    /// Effective per-process timeout in seconds.
    pub const fn effective_process_timeout_secs(&self) -> u64 {
        match self.process_timeout_secs {
            Some(secs) => secs,
            None => DEFAULT_PROCESS_TIMEOUT_SECS,
        }
    }

    /// Apply overrides; `None` fields leave the current value untouched
    /// and disabled probes accumulate.
    pub fn merge(&mut self, overrides: &SettingsOverrides) {
        if let Some(ref target) = overrides.target {
            self.target = Some(target.clone());
        }
        if let Some(ref python) = overrides.python {
            self.python = Some(python.clone());
        }
        if let Some(secs) = overrides.probe_timeout_secs {
            self.probe_timeout_secs = Some(secs);
        }
        if let Some(secs) = overrides.process_timeout_secs {
            self.process_timeout_secs = Some(secs);
        }
        for name in &overrides.disabled_probes {
            if !self.disabled_probes.contains(name) {
                self.disabled_probes.push(name.clone());
            }
        }
    }
}

/// Higher-priority values from the environment or command line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SettingsOverrides {
    pub target: Option<String>,
    pub python: Option<PathBuf>,
    pub probe_timeout_secs: Option<u64>,
    pub process_timeout_secs: Option<u64>,
    pub disabled_probes: Vec<String>,
}

impl From<AuditSettings> for SettingsOverrides {
    /// Treat a loaded settings file as one more override layer.
    fn from(settings: AuditSettings) -> Self {
        Self {
            target: settings.target,
            python: settings.python,
            probe_timeout_secs: settings.probe_timeout_secs,
            process_timeout_secs: settings.process_timeout_secs,
            disabled_probes: settings.disabled_probes,
        }
    }
}

/// Settings loading or validation error.
#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
pub enum SettingsError {
    #[error("Failed to read settings file {}: {reason}", .path.display())]
    Read { path: PathBuf, reason: String },

    #[error("Invalid settings file {}: {reason}", .path.display())]
    Parse { path: PathBuf, reason: String },

    #[error("Target platform cannot be empty")]
    EmptyTarget,

    #[error("Interpreter path cannot be empty")]
    EmptyPython,

    #[error("{name} must be between 1 and {MAX_TIMEOUT_SECS} seconds, got {value}")]
    InvalidTimeout { name: &'static str, value: u64 },

    #[error("Process timeout ({process}s) must not exceed probe timeout ({probe}s)")]
    ProcessTimeoutExceedsProbe { process: u64, probe: u64 },
}

/// Validate settings values.
pub fn validate_settings(settings: &AuditSettings) -> Result<(), SettingsError> {
    if settings
        .target
        .as_ref()
        .is_some_and(|t| t.trim().is_empty())
    {
        return Err(SettingsError::EmptyTarget);
    }

    if settings
        .python
        .as_ref()
        .is_some_and(|p| p.as_os_str().is_empty())
    {
        return Err(SettingsError::EmptyPython);
    }

    let probe = settings.effective_probe_timeout_secs();
    if !(1..=MAX_TIMEOUT_SECS).contains(&probe) {
        return Err(SettingsError::InvalidTimeout {
            name: "probe_timeout_secs",
            value: probe,
        });
    }

    let process = settings.effective_process_timeout_secs();
    if !(1..=MAX_TIMEOUT_SECS).contains(&process) {
        return Err(SettingsError::InvalidTimeout {
            name: "process_timeout_secs",
            value: process,
        });
    }

    if process > probe {
        return Err(SettingsError::ProcessTimeoutExceedsProbe { process, probe });
    }

    Ok(())
}
