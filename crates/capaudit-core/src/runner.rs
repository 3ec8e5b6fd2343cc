//! Probe Runner: executes probes in declaration order, one at a time.
//!
//! Each check runs as its own task, so a panic or a hang inside one probe
//! becomes a Fail outcome for that probe only. There are no retries.

use std::collections::HashSet;
use std::time::{Duration, Instant};

use tokio::task::JoinError;
use tokio::time::timeout;
use tracing::{debug, info, warn};

use crate::domain::{Outcome, Probe};
use crate::error::ProbeError;
use crate::platform::GateDecision;

/// Default upper bound for one probe.
pub const DEFAULT_PROBE_TIMEOUT: Duration = Duration::from_secs(60);

/// Detail recorded for probes switched off in the settings.
pub const DISABLED_REASON: &str = "disabled by configuration";

/// Executes a probe set and yields one outcome per probe.
#[derive(Debug, Clone)]
pub struct ProbeRunner {
    probe_timeout: Duration,
    disabled: HashSet<String>,
}

impl Default for ProbeRunner {
    fn default() -> Self {
        Self::new(DEFAULT_PROBE_TIMEOUT)
    }
}

impl ProbeRunner {
    /// Create a runner with a per-probe time budget.
    pub fn new(probe_timeout: Duration) -> Self {
        Self {
            probe_timeout,
            disabled: HashSet::new(),
        }
    }

    /// Probes with these names are reported as skipped instead of run.
    #[must_use]
    pub fn with_disabled<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.disabled.extend(names.into_iter().map(Into::into));
        self
    }

    pub const fn probe_timeout(&self) -> Duration {
        self.probe_timeout
    }

    /// Names of disabled probes, sorted.
    pub fn disabled(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.disabled.iter().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Run every probe in order. A closed gate yields no outcomes and
    /// invokes nothing.
    pub async fn run(&self, gate: &GateDecision, probes: &[Probe]) -> Vec<Outcome> {
        if !gate.is_open() {
            info!(
                current = %gate.current,
                target = %gate.target,
                "platform gate closed, no probe will run"
            );
            return Vec::new();
        }

        let mut outcomes = Vec::with_capacity(probes.len());
        for probe in probes {
            outcomes.push(self.run_one(probe).await);
        }
        outcomes
    }

    async fn run_one(&self, probe: &Probe) -> Outcome {
        if self.disabled.contains(probe.name()) {
            debug!(probe = probe.name(), "probe disabled");
            return Outcome::skipped(probe.name(), probe.kind(), DISABLED_REASON);
        }

        let started = Instant::now();
        let check = probe.check();
        let mut task = tokio::spawn(async move { check.check().await });

        let result = match timeout(self.probe_timeout, &mut task).await {
            Ok(Ok(result)) => result,
            Ok(Err(join_error)) => Err(ProbeError::Panicked(panic_message(join_error))),
            Err(_) => {
                task.abort();
                warn!(
                    probe = probe.name(),
                    timeout_secs = self.probe_timeout.as_secs_f64(),
                    "probe timed out"
                );
                Err(ProbeError::TimedOut(self.probe_timeout))
            }
        };
        let elapsed_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);

        match result {
            Ok(pass) => {
                info!(probe = probe.name(), elapsed_ms, "probe passed");
                Outcome::passed(probe.name(), probe.kind(), pass, elapsed_ms)
            }
            Err(error) => {
                info!(probe = probe.name(), kind = %error.kind(), "probe failed: {error}");
                Outcome::failed(probe.name(), probe.kind(), &error, elapsed_ms)
            }
        }
    }
}

fn panic_message(error: JoinError) -> String {
    if !error.is_panic() {
        return "probe task was cancelled".to_string();
    }
    let payload = error.into_panic();
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "non-string panic payload".to_string()
    }
}
