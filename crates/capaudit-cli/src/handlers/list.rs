//! List command handler.
//!
//! Displays the probe catalogue for the configured target.

use std::io::{self, Write};

use anyhow::Result;
use capaudit_core::Probe;

use crate::bootstrap::CliContext;
use crate::error::CliError;
use crate::presentation::{truncate_string, write_separator};

/// Execute the list command.
pub fn execute(ctx: &CliContext) -> Result<i32> {
    let probes = ctx.probes()?;
    let mut out = io::stdout().lock();
    write_catalogue(&mut out, ctx, &probes).map_err(CliError::from)?;
    Ok(0)
}

fn write_catalogue(out: &mut impl Write, ctx: &CliContext, probes: &[Probe]) -> io::Result<()> {
    writeln!(out, "{} probe(s) for target {}:\n", probes.len(), ctx.target)?;
    writeln!(out, "{:<20} {:<16} {:<9} Description", "Name", "Kind", "Enabled")?;
    write_separator(out, 100)?;

    for probe in probes {
        let enabled = if ctx
            .settings
            .disabled_probes
            .iter()
            .any(|name| name == probe.name())
        {
            "no"
        } else {
            "yes"
        };
        writeln!(
            out,
            "{:<20} {:<16} {:<9} {}",
            truncate_string(probe.name(), 19),
            probe.kind(),
            enabled,
            truncate_string(probe.description(), 52),
        )?;
    }

    out.flush()
}
