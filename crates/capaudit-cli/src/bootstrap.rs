//! CLI bootstrap - the composition root.
//!
//! This module is the ONLY place where infrastructure is wired together
//! for the CLI adapter:
//! - Settings layering (defaults, config file, environment, flags)
//! - Process runner and interpreter adapter (via capaudit-runtime)
//! - Probe catalogue and harness (via capaudit-core)

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use capaudit_core::{
    AuditSettings, Harness, PlatformPort, PlatformTarget, Probe, ProbeRunner, SettingsOverrides,
    validate_settings,
};
use capaudit_runtime::{HostPlatform, PythonInterpreter, SuitePorts, TokioProcessRunner, suite_for};
use tracing::debug;

use crate::error::CliError;

/// Bootstrap configuration for the CLI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CliConfig {
    /// Fully layered and validated settings.
    pub settings: AuditSettings,
}

impl CliConfig {
    /// Create config with default settings.
    pub fn with_defaults() -> Self {
        Self {
            settings: AuditSettings::with_defaults(),
        }
    }

    /// Layer settings: defaults, then the optional JSON file, then the
    /// environment and command-line overrides.
    pub fn load(
        config_file: Option<&Path>,
        overrides: &SettingsOverrides,
    ) -> Result<Self, CliError> {
        let mut settings = AuditSettings::with_defaults();
        if let Some(path) = config_file {
            debug!(path = %path.display(), "loading settings file");
            settings.merge(&AuditSettings::from_json_file(path)?.into());
        }
        settings.merge(overrides);
        validate_settings(&settings)?;
        Ok(Self { settings })
    }
}

/// Fully composed context for CLI commands.
pub struct CliContext {
    /// Settings the context was built from.
    pub settings: AuditSettings,
    /// Platform the runtime under audit targets.
    pub target: PlatformTarget,
    /// Identifies the running OS.
    pub platform: Arc<dyn PlatformPort>,
    /// Adapters the probe catalogue is wired to.
    pub ports: SuitePorts,
}

impl CliContext {
    /// The catalogue for the configured target.
    pub fn probes(&self) -> Result<Vec<Probe>, CliError> {
        Ok(suite_for(&self.target, &self.ports)?)
    }

    /// Assemble a harness for the configured target.
    pub fn harness(&self) -> Result<Harness, CliError> {
        let runner = ProbeRunner::new(Duration::from_secs(
            self.settings.effective_probe_timeout_secs(),
        ))
        .with_disabled(self.settings.disabled_probes.iter().cloned());
        Ok(Harness::new(
            self.platform.as_ref(),
            self.target.clone(),
            self.probes()?,
            runner,
        )?)
    }
}

/// Build the CLI context from configuration.
pub fn bootstrap(config: CliConfig) -> CliContext {
    let settings = config.settings;
    let process_timeout = Duration::from_secs(settings.effective_process_timeout_secs());
    let process = Arc::new(TokioProcessRunner::new(process_timeout));
    let interpreter = PythonInterpreter::new(settings.effective_python(), process)
        .with_process_timeout(process_timeout);
    debug!(?interpreter, target = %settings.effective_target(), "bootstrapped adapters");

    CliContext {
        target: settings.effective_target(),
        platform: Arc::new(HostPlatform::new()),
        ports: SuitePorts::for_interpreter(interpreter),
        settings,
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;
    use std::path::PathBuf;

    use capaudit_core::ports::platform::FixedPlatform;

    use super::*;

    fn write_config(json: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(json.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_defaults_without_file() {
        let config = CliConfig::load(None, &SettingsOverrides::default()).unwrap();
        assert_eq!(config, CliConfig::with_defaults());
    }

    #[test]
    fn test_flags_win_over_file() {
        let file = write_config(r#"{"python": "/from/file", "probe_timeout_secs": 120}"#);
        let overrides = SettingsOverrides {
            python: Some(PathBuf::from("/from/flag")),
            ..Default::default()
        };
        let config = CliConfig::load(Some(file.path()), &overrides).unwrap();
        assert_eq!(config.settings.effective_python(), PathBuf::from("/from/flag"));
        assert_eq!(config.settings.effective_probe_timeout_secs(), 120);
    }

    #[test]
    fn test_disabled_probes_accumulate_across_layers() {
        let file = write_config(r#"{"disabled_probes": ["curses"]}"#);
        let overrides = SettingsOverrides {
            disabled_probes: vec!["ctypes".to_string()],
            ..Default::default()
        };
        let config = CliConfig::load(Some(file.path()), &overrides).unwrap();
        assert_eq!(config.settings.disabled_probes, vec!["curses", "ctypes"]);
    }

    #[test]
    fn test_invalid_layered_settings_are_config_errors() {
        let file = write_config(r#"{"probe_timeout_secs": 10}"#);
        let overrides = SettingsOverrides {
            process_timeout_secs: Some(20),
            ..Default::default()
        };
        let err = CliConfig::load(Some(file.path()), &overrides).unwrap_err();
        assert_eq!(err.exit_code(), 78);
    }

    #[test]
    fn test_malformed_file_is_config_error() {
        let file = write_config("{ not json");
        let err = CliConfig::load(Some(file.path()), &SettingsOverrides::default()).unwrap_err();
        assert!(matches!(err, CliError::Config(_)));
    }

    #[test]
    fn test_unknown_disabled_probe_is_usage_error() {
        let mut config = CliConfig::with_defaults();
        config.settings.disabled_probes.push("ghost".to_string());
        let ctx = bootstrap(config);
        let err = ctx.harness().unwrap_err();
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn test_unsupported_target_is_config_error() {
        let mut config = CliConfig::with_defaults();
        config.settings.target = Some("sunos".to_string());
        let ctx = bootstrap(config);
        assert!(matches!(ctx.probes(), Err(CliError::Config(_))));
    }

    #[tokio::test]
    async fn test_mismatched_host_skips_without_running() {
        let mut ctx = bootstrap(CliConfig::with_defaults());
        ctx.platform = Arc::new(FixedPlatform("linux".to_string()));
        let report = ctx.harness().unwrap().execute().await;
        assert_eq!(report.exit_code(), 0);
        assert!(report.outcomes.is_empty());
        assert!(report.skip_reason.is_some());
    }
}
