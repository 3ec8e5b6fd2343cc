//! The aggregated report of one harness run.

use std::collections::BTreeSet;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::outcome::{Outcome, Status};
use crate::platform::PlatformTarget;

/// Ordered outcomes plus the derived overall status.
///
/// This is the only artifact handed to external tooling; it does not
/// depend on any particular test runner's output format.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Report {
    pub target: PlatformTarget,
    /// Platform the harness ran on.
    pub platform: String,
    pub status: Status,
    /// Set when the Platform Gate skipped the whole suite.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub skip_reason: Option<String>,
    pub outcomes: Vec<Outcome>,
    pub generated_at: DateTime<Utc>,
}

impl Report {
    /// Number of outcomes with the given status.
    pub fn count(&self, status: Status) -> usize {
        self.outcomes.iter().filter(|o| o.status == status).count()
    }

    /// Outcomes that did not pass.
    pub fn non_passing(&self) -> impl Iterator<Item = &Outcome> {
        self.outcomes.iter().filter(|o| o.status != Status::Pass)
    }

    /// Passing outcomes that only ran a weaker existence check.
    pub fn degraded(&self) -> impl Iterator<Item = &Outcome> {
        self.outcomes.iter().filter(|o| o.is_degraded())
    }

    /// Names of failing probes.
    pub fn failing_probes(&self) -> BTreeSet<&str> {
        self.outcomes
            .iter()
            .filter(|o| o.status == Status::Fail)
            .map(|o| o.probe_name.as_str())
            .collect()
    }

    /// Process exit code: a platform mismatch is not an error.
    pub const fn exit_code(&self) -> i32 {
        match self.status {
            Status::Pass | Status::Skip => 0,
            Status::Fail => 1,
        }
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{}: target {}, running on {}",
            self.status, self.target, self.platform
        )?;

        if let Some(reason) = &self.skip_reason {
            return writeln!(f, "  suite skipped ({reason})");
        }

        writeln!(
            f,
            "  {} probes: {} passed, {} failed, {} skipped",
            self.outcomes.len(),
            self.count(Status::Pass),
            self.count(Status::Fail),
            self.count(Status::Skip)
        )?;

        for outcome in self.non_passing().chain(self.degraded()) {
            write!(f, "  {} {}", outcome.status, outcome.probe_name)?;
            if let Some(kind) = outcome.kind {
                write!(f, " [{kind}]")?;
            }
            match &outcome.detail {
                Some(detail) => writeln!(f, " {detail}")?,
                None => writeln!(f)?,
            }
        }
        Ok(())
    }
}
