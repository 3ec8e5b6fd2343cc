//! CLI-specific error types and mappings.
//!
//! Maps configuration and harness-assembly errors to exit codes. Probe
//! failures are not errors here: they are part of the report, which
//! carries its own exit code.

use capaudit_core::{HarnessError, SettingsError};
use thiserror::Error;

/// CLI-specific error type.
#[derive(Debug, Error)]
pub enum CliError {
    /// Argument parsing error.
    #[error("Invalid arguments: {0}")]
    Arguments(String),

    /// IO error (unwritable stdout, unreadable file, etc.).
    #[error("IO error: {0}")]
    Io(String),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl CliError {
    /// Map error to appropriate exit code.
    ///
    /// Exit codes follow Unix conventions:
    /// - 0: Suite passed or was skipped
    /// - 1: Suite failed
    /// - 2: Misuse of shell command (invalid arguments)
    /// - 64-78: Reserved for specific error categories (see sysexits.h);
    ///   70 is used for anything that is not a [`CliError`]
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::Arguments(_) => 2, // EX_USAGE
            Self::Io(_) => 74,       // EX_IOERR
            Self::Config(_) => 78,   // EX_CONFIG
        }
    }
}

/// EX_SOFTWARE, kept apart from the suite's own failure code.
pub const INTERNAL_ERROR_EXIT: i32 = 70;

/// Exit code for an error that reached `main`.
///
/// Anything that is not a [`CliError`] is an internal error.
pub fn exit_code_for(err: &anyhow::Error) -> i32 {
    err.downcast_ref::<CliError>()
        .map_or(INTERNAL_ERROR_EXIT, CliError::exit_code)
}

impl From<SettingsError> for CliError {
    fn from(err: SettingsError) -> Self {
        Self::Config(err.to_string())
    }
}

impl From<HarnessError> for CliError {
    fn from(err: HarnessError) -> Self {
        match err {
            HarnessError::UnknownProbe(_) => Self::Arguments(err.to_string()),
            HarnessError::DuplicateProbe(_) | HarnessError::UnsupportedTarget(_) => {
                Self::Config(err.to_string())
            }
        }
    }
}

impl From<std::io::Error> for CliError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}
