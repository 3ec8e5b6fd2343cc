//! Human-readable rendering of a [`Report`].

use std::fmt::Write as _;
use std::io::{self, IsTerminal, Write as _};

use capaudit_core::{Outcome, Report, Status};

use super::{BOLD, GREEN, RED, RESET, YELLOW};

const NAME_WIDTH: usize = 20;

/// Render a report as a table of outcomes followed by a summary line.
///
/// With `color` set, statuses are wrapped in ANSI color codes.
pub fn format_report(report: &Report, color: bool) -> String {
    let paint = |code: &'static str| if color { code } else { "" };
    let mut out = String::new();

    let _ = writeln!(
        out,
        "{}Capability audit: target {}, running on {}{}",
        paint(BOLD),
        report.target,
        report.platform,
        paint(RESET)
    );
    let _ = writeln!(out, "{}", "=".repeat(72));

    if let Some(reason) = &report.skip_reason {
        let _ = writeln!(out, "{}SKIP{} {reason}", paint(YELLOW), paint(RESET));
        return out;
    }

    for outcome in &report.outcomes {
        let _ = writeln!(out, "{}", outcome_row(outcome, &paint));
    }

    let _ = writeln!(out, "{}", "-".repeat(72));
    let overall = status_color(report.status);
    let _ = writeln!(
        out,
        "{}{}{} {} passed ({} degraded), {} failed, {} skipped",
        paint(overall),
        report.status,
        paint(RESET),
        report.count(Status::Pass),
        report.degraded().count(),
        report.count(Status::Fail),
        report.count(Status::Skip),
    );
    out
}

/// Print a report to stdout, colored when stdout is a terminal.
pub fn print_report(report: &Report) -> io::Result<()> {
    let stdout = io::stdout();
    let color = stdout.is_terminal();
    let mut out = stdout.lock();
    out.write_all(format_report(report, color).as_bytes())?;
    out.flush()
}

fn outcome_row(outcome: &Outcome, paint: &dyn Fn(&'static str) -> &'static str) -> String {
    let marker = match outcome.status {
        Status::Pass if outcome.is_degraded() => "PASS*",
        Status::Pass => "PASS",
        Status::Fail => "FAIL",
        Status::Skip => "SKIP",
    };
    let mut row = format!(
        "{}{marker:<5}{} {:<NAME_WIDTH$} {:>6}ms",
        paint(status_color(outcome.status)),
        paint(RESET),
        outcome.probe_name,
        outcome.elapsed_ms,
    );
    if let Some(kind) = outcome.kind {
        let _ = write!(row, " [{kind}]");
    }
    if let Some(detail) = &outcome.detail {
        let _ = write!(row, " {detail}");
    }
    row
}

const fn status_color(status: Status) -> &'static str {
    match status {
        Status::Pass => GREEN,
        Status::Fail => RED,
        Status::Skip => YELLOW,
    }
}
