//! Port definitions (trait abstractions) for the collaborators a probe
//! suite consumes.
//!
//! Ports define the interfaces that the core domain expects from
//! infrastructure. Implementations live in `capaudit-runtime`.
//!
//! # Design Rules
//!
//! - No `tokio::process` types in any signature
//! - No interpreter-specific details (scripts, wire formats)
//! - Ports only read from the environment; none mutate persistent state

pub mod foreign_bridge;
pub mod module_loader;
pub mod platform;
pub mod process;

pub use foreign_bridge::{BridgeExpr, ForeignBridgePort};
pub use module_loader::{LoadError, ModuleLoaderPort};
pub use platform::PlatformPort;
pub use process::{CommandSpec, ProcessError, ProcessOutput, ProcessPort};
