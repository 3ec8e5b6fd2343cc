//! Main CLI parser and top-level argument handling.
//!
//! Global options double as the highest-priority settings layer; each
//! one can also come from a `CAPAUDIT_*` environment variable.

use std::path::PathBuf;

use capaudit_core::SettingsOverrides;
use clap::Parser;

use crate::commands::Commands;

/// Command-line interface for the platform-capability audit.
#[derive(Parser, Debug)]
#[command(name = "capaudit")]
#[command(about = "Verify that a packaged runtime carries the platform capabilities it promises")]
#[command(version)]
pub struct Cli {
    /// Enable verbose/debug output
    #[arg(short = 'v', long = "verbose", global = true)]
    pub verbose: bool,

    /// JSON settings file
    #[arg(long, value_name = "FILE", global = true, env = "CAPAUDIT_CONFIG")]
    pub config: Option<PathBuf>,

    /// Platform the runtime under audit is built for (e.g. darwin)
    #[arg(long, value_name = "OS", global = true, env = "CAPAUDIT_TARGET")]
    pub target: Option<String>,

    /// Interpreter of the runtime under audit
    #[arg(long, value_name = "PATH", global = true, env = "CAPAUDIT_PYTHON")]
    pub python: Option<PathBuf>,

    /// Upper bound for a single probe, in seconds
    #[arg(
        long = "probe-timeout",
        value_name = "SECS",
        global = true,
        env = "CAPAUDIT_PROBE_TIMEOUT"
    )]
    pub probe_timeout: Option<u64>,

    /// Upper bound for a single external process, in seconds
    #[arg(
        long = "process-timeout",
        value_name = "SECS",
        global = true,
        env = "CAPAUDIT_PROCESS_TIMEOUT"
    )]
    pub process_timeout: Option<u64>,

    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Settings given on the command line or through the environment.
    pub fn overrides(&self) -> SettingsOverrides {
        let disabled_probes = match &self.command {
            Commands::Run { disable, .. } => disable.clone(),
            Commands::List | Commands::Platform => Vec::new(),
        };
        SettingsOverrides {
            target: self.target.clone(),
            python: self.python.clone(),
            probe_timeout_secs: self.probe_timeout,
            process_timeout_secs: self.process_timeout,
            disabled_probes,
        }
    }
}
