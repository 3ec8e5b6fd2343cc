//! Domain types for probes, outcomes, and reports.

mod outcome;
mod probe;
mod report;

pub use outcome::{FailureKind, Outcome, Status};
pub use probe::{CheckPass, Probe, ProbeCheck, ProbeKind};
pub use report::Report;
