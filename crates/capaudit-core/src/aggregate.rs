//! Aggregator: turns the runner's outcomes into a [`Report`].

use chrono::Utc;

use crate::domain::{Outcome, Report, Status};
use crate::platform::GateDecision;

/// Build the report for one harness run.
///
/// Overall status is Fail if any outcome failed, Skip if the Platform
/// Gate was closed, Pass otherwise.
pub fn aggregate(gate: &GateDecision, outcomes: Vec<Outcome>) -> Report {
    let status = if outcomes.iter().any(|o| o.status == Status::Fail) {
        Status::Fail
    } else if !gate.is_open() {
        Status::Skip
    } else {
        Status::Pass
    };

    Report {
        target: gate.target.clone(),
        platform: gate.current.clone(),
        status,
        skip_reason: gate.skip_reason(),
        outcomes,
        generated_at: Utc::now(),
    }
}
