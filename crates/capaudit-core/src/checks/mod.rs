//! Reusable probe checks.
//!
//! Each check is a small struct holding the ports it needs plus the
//! literal it asserts against. Catalogues (see `capaudit-runtime`)
//! combine them into named [`crate::Probe`]s.

mod bridge_value;
mod degraded_import;
mod invoke;
mod module_presence;
mod process_output;

pub use bridge_value::BridgeValueCheck;
pub use degraded_import::DegradedImportCheck;
pub use invoke::{InvokeCheck, InvokeFieldCheck};
pub use module_presence::ModulePresenceCheck;
pub use process_output::ProcessOutputCheck;

#[cfg(test)]
pub(crate) mod fakes;
