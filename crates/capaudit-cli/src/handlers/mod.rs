//! Command handlers.
//!
//! Each handler receives the composed [`crate::CliContext`] and returns
//! the process exit code on success.

pub mod list;
pub mod platform;
pub mod run;
