//! Harness: Platform Gate → Probe Runner → Aggregator.

use std::collections::HashSet;

use tracing::info;

use crate::aggregate::aggregate;
use crate::domain::{Probe, Report};
use crate::error::HarnessError;
use crate::platform::{GateDecision, PlatformTarget};
use crate::ports::PlatformPort;
use crate::runner::ProbeRunner;

/// A probe suite bound to a target platform.
///
/// The Platform Gate is evaluated once, here at construction, and the
/// decision is reused for every run. Running twice against an unchanged
/// environment yields the same status and the same failing probes.
#[derive(Debug)]
pub struct Harness {
    gate: GateDecision,
    probes: Vec<Probe>,
    runner: ProbeRunner,
}

impl Harness {
    /// Assemble a harness.
    ///
    /// Fails if two probes share a name or if the runner disables a probe
    /// that is not part of the suite.
    pub fn new(
        platform: &dyn PlatformPort,
        target: PlatformTarget,
        probes: Vec<Probe>,
        runner: ProbeRunner,
    ) -> Result<Self, HarnessError> {
        let mut names = HashSet::with_capacity(probes.len());
        for probe in &probes {
            if !names.insert(probe.name()) {
                return Err(HarnessError::DuplicateProbe(probe.name().to_string()));
            }
        }
        if let Some(unknown) = runner.disabled().into_iter().find(|n| !names.contains(n)) {
            return Err(HarnessError::UnknownProbe(unknown.to_string()));
        }

        let gate = GateDecision::evaluate(&platform.current_os(), &target);
        info!(
            current = %gate.current,
            target = %gate.target,
            matched = gate.matched,
            probes = probes.len(),
            "platform gate evaluated"
        );

        Ok(Self {
            gate,
            probes,
            runner,
        })
    }

    pub const fn gate(&self) -> &GateDecision {
        &self.gate
    }

    pub fn probes(&self) -> &[Probe] {
        &self.probes
    }

    /// Run the suite and aggregate the outcomes.
    pub async fn execute(&self) -> Report {
        let outcomes = self.runner.run(&self.gate, &self.probes).await;
        aggregate(&self.gate, outcomes)
    }
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;

    use super::*;
    use crate::domain::{CheckPass, ProbeCheck, Status};
    use crate::error::ProbeError;
    use crate::ports::platform::FixedPlatform;

    struct Fixed(Result<CheckPass, ProbeError>);

    #[async_trait]
    impl ProbeCheck for Fixed {
        async fn check(&self) -> Result<CheckPass, ProbeError> {
            self.0.clone()
        }
    }

    fn darwin() -> FixedPlatform {
        FixedPlatform("darwin".to_string())
    }

    fn suite() -> Vec<Probe> {
        vec![
            Probe::behavioral("ok", "", Fixed(Ok(CheckPass::Verified))),
            Probe::behavioral(
                "bad",
                "",
                Fixed(Err(ProbeError::mismatch("stdout", "Darwin\n", "Linux\n"))),
            ),
        ]
    }

    #[test]
    fn test_duplicate_names_rejected() {
        let probes = vec![
            Probe::behavioral("dup", "", Fixed(Ok(CheckPass::Verified))),
            Probe::behavioral("dup", "", Fixed(Ok(CheckPass::Verified))),
        ];
        let err = Harness::new(&darwin(), PlatformTarget::darwin(), probes, ProbeRunner::default())
            .unwrap_err();
        assert_eq!(err, HarnessError::DuplicateProbe("dup".to_string()));
    }

    #[test]
    fn test_unknown_disabled_probe_rejected() {
        let runner = ProbeRunner::default().with_disabled(["nope"]);
        let err = Harness::new(&darwin(), PlatformTarget::darwin(), suite(), runner).unwrap_err();
        assert_eq!(err, HarnessError::UnknownProbe("nope".to_string()));
    }

    #[tokio::test]
    async fn test_execute_twice_is_idempotent() {
        let harness =
            Harness::new(&darwin(), PlatformTarget::darwin(), suite(), ProbeRunner::default())
                .unwrap();
        let first = harness.execute().await;
        let second = harness.execute().await;

        assert_eq!(first.status, Status::Fail);
        assert_eq!(first.status, second.status);
        assert_eq!(first.failing_probes(), second.failing_probes());
    }

    #[tokio::test]
    async fn test_mismatched_platform_skips_whole_suite() {
        let linux = FixedPlatform("linux".to_string());
        let harness =
            Harness::new(&linux, PlatformTarget::darwin(), suite(), ProbeRunner::default())
                .unwrap();
        assert!(!harness.gate().is_open());

        let report = harness.execute().await;
        assert_eq!(report.status, Status::Skip);
        assert!(report.outcomes.is_empty());
        assert_eq!(report.platform, "linux");
    }
}
