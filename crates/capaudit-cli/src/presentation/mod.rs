//! Shared CLI presentation utilities.
//!
//! Keep this module format-only: no domain transforms.

pub mod report_display;
pub mod tables;

pub use report_display::{format_report, print_report};
pub use tables::{truncate_string, write_separator};

// ANSI color codes
pub(crate) const GREEN: &str = "\x1b[32m";
pub(crate) const RED: &str = "\x1b[31m";
pub(crate) const YELLOW: &str = "\x1b[33m";
pub(crate) const BOLD: &str = "\x1b[1m";
pub(crate) const RESET: &str = "\x1b[0m";
