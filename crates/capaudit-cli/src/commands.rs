//! Subcommand definitions.

use clap::Subcommand;

/// Top-level subcommands.
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Run the probe suite for the target and report the result
    Run {
        /// Print the report as JSON instead of the summary
        #[arg(long)]
        json: bool,

        /// Report a probe as skipped instead of running it (repeatable)
        #[arg(long = "disable", value_name = "PROBE")]
        disable: Vec<String>,
    },

    /// List the probes in the target's catalogue
    List,

    /// Show the current platform, the target, and the gate decision
    Platform,
}
