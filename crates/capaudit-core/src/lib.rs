//! # capaudit-core
//!
//! Pure domain layer for the platform-capability audit harness.
//!
//! - `platform` - the target identifier and the all-or-nothing Platform Gate
//! - `domain` - probes, outcomes, and the aggregated report
//! - `checks` - reusable probe checks (module presence and behavioral)
//! - `runner` / `aggregate` / `harness` - execution pipeline
//! - `ports` - collaborator traits implemented by `capaudit-runtime`
//!
//! Nothing in this crate spawns processes or touches the runtime under
//! audit directly; every side effect goes through a port.

#![deny(unused_crate_dependencies)]

pub mod aggregate;
pub mod checks;
pub mod domain;
pub mod error;
pub mod harness;
pub mod platform;
pub mod ports;
pub mod runner;
pub mod settings;

pub use aggregate::aggregate;
pub use domain::{
    CheckPass, FailureKind, Outcome, Probe, ProbeCheck, ProbeKind, Report, Status,
};
pub use error::{HarnessError, ProbeError};
pub use harness::Harness;
pub use platform::{GateDecision, PlatformTarget, evaluate};
pub use ports::{
    BridgeExpr, CommandSpec, ForeignBridgePort, LoadError, ModuleLoaderPort, PlatformPort,
    ProcessError, ProcessOutput, ProcessPort,
};
pub use runner::ProbeRunner;
pub use settings::{AuditSettings, SettingsError, SettingsOverrides, validate_settings};

#[cfg(test)]
use tempfile as _;
