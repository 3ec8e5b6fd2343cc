//! Run command handler.
//!
//! Executes the probe suite and prints either the summary table or the
//! JSON report. The exit code comes from the report.

use std::io::{self, Write};

use anyhow::{Context, Result};
use tracing::info;

use crate::bootstrap::CliContext;
use crate::error::CliError;
use crate::presentation::print_report;

/// Execute the run command.
///
/// # Errors
///
/// Returns an error if the harness cannot be assembled (unsupported
/// target, unknown disabled probe) or the report cannot be written.
pub async fn execute(ctx: &CliContext, json: bool) -> Result<i32> {
    let harness = ctx.harness()?;
    let report = harness.execute().await;
    info!(status = %report.status, outcomes = report.outcomes.len(), "suite finished");

    if json {
        let rendered =
            serde_json::to_string_pretty(&report).context("Failed to serialize report")?;
        let mut out = io::stdout().lock();
        writeln!(out, "{rendered}")
            .and_then(|()| out.flush())
            .map_err(CliError::from)?;
    } else {
        print_report(&report).map_err(CliError::from)?;
    }

    Ok(report.exit_code())
}
