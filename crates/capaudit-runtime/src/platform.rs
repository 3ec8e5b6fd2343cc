//! Host platform identification.

use capaudit_core::PlatformPort;
use capaudit_core::platform::canonical_os_name;

/// Reports the OS this binary was built for, in the packaged runtime's
/// vocabulary (`darwin`, `linux`, `win32`).
#[derive(Debug, Clone, Copy, Default)]
pub struct HostPlatform;

impl HostPlatform {
    pub const fn new() -> Self {
        Self
    }
}

impl PlatformPort for HostPlatform {
    fn current_os(&self) -> String {
        canonical_os_name(std::env::consts::OS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    #[cfg(target_os = "macos")]
    fn test_macos_host_is_darwin() {
        assert_eq!(HostPlatform::new().current_os(), "darwin");
    }

    #[test]
    #[cfg(target_os = "linux")]
    fn test_linux_host_is_linux() {
        assert_eq!(HostPlatform::new().current_os(), "linux");
    }

    #[test]
    #[cfg(windows)]
    fn test_windows_host_is_win32() {
        assert_eq!(HostPlatform::new().current_os(), "win32");
    }
}
