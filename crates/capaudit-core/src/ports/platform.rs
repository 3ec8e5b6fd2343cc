//! Platform identification port.

/// Port for identifying the operating system the harness runs on.
pub trait PlatformPort: Send + Sync {
    /// Current OS name, e.g. `darwin` or `linux`.
    fn current_os(&self) -> String;
}

/// A platform port that always reports a fixed name.
///
/// Useful in tests, where the gate outcome must not depend on the host.
#[derive(Debug, Clone)]
pub struct FixedPlatform(pub String);

impl PlatformPort for FixedPlatform {
    fn current_os(&self) -> String {
        self.0.clone()
    }
}
