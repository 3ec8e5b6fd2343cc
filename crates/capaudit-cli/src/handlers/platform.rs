//! Platform command handler.
//!
//! Shows what the Platform Gate would decide without running anything.

use std::io::{self, Write};

use anyhow::Result;
use capaudit_core::GateDecision;
use capaudit_runtime::suite::SUPPORTED_TARGETS;

use crate::bootstrap::CliContext;
use crate::error::CliError;

/// Execute the platform command.
pub fn execute(ctx: &CliContext) -> Result<i32> {
    let gate = GateDecision::evaluate(&ctx.platform.current_os(), &ctx.target);
    let mut out = io::stdout().lock();
    write_gate(&mut out, &gate).map_err(CliError::from)?;
    Ok(0)
}

fn write_gate(out: &mut impl Write, gate: &GateDecision) -> io::Result<()> {
    writeln!(out, "Current platform: {}", gate.current)?;
    writeln!(out, "Target platform:  {}", gate.target)?;
    match gate.skip_reason() {
        None => writeln!(out, "Gate:             open (probes will run)")?,
        Some(reason) => writeln!(out, "Gate:             closed ({reason})")?,
    }
    if !SUPPORTED_TARGETS.contains(&gate.target.as_str()) {
        writeln!(
            out,
            "Note: no catalogue exists for `{}`; supported targets: {}",
            gate.target,
            SUPPORTED_TARGETS.join(", ")
        )?;
    }
    out.flush()
}
