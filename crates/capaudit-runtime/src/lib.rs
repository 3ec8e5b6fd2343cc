//! # capaudit-runtime
//!
//! Adapters implementing the `capaudit-core` ports against the real
//! environment, plus the concrete probe catalogues.
//!
//! - [`TokioProcessRunner`] - bounded external-process execution
//! - [`PythonInterpreter`] - module loading, function calls and
//!   Objective-C bridging through the packaged interpreter
//! - [`HostPlatform`] - identifies the OS the harness runs on
//! - [`suite`] - probe catalogues per target platform

#![deny(unsafe_code)]

pub mod interpreter;
mod platform;
pub mod process;
pub mod suite;

pub use interpreter::PythonInterpreter;
pub use platform::HostPlatform;
pub use process::TokioProcessRunner;
pub use suite::{SuitePorts, suite_for};
