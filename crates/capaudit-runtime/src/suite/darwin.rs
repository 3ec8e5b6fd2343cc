//! macOS (`darwin`) catalogue.
//!
//! Capabilities a macOS build of the runtime must carry: the FFI layer
//! bridging to Objective-C, the system-proxy and terminal modules, POSIX
//! shared memory, subprocess spawning, and the platform-only stdlib
//! modules.

use capaudit_core::checks::{
    BridgeValueCheck, DegradedImportCheck, InvokeCheck, InvokeFieldCheck, ModulePresenceCheck,
    ProcessOutputCheck,
};
use capaudit_core::{BridgeExpr, Probe};

use super::SuitePorts;

const BEEWARE_URL: &str = "https://beeware.org/";
const CONTRIBUTING_URL: &str = "https://beeware.org/contributing";

/// `NSURL.URLWithString("contributing", relativeToURL=base).absoluteURL.description`
fn relative_url_expr() -> BridgeExpr {
    let base = BridgeExpr::class("NSURL").send("URLWithString", vec![BridgeExpr::str(BEEWARE_URL)]);
    BridgeExpr::class("NSURL")
        .send_kw(
            "URLWithString",
            vec![BridgeExpr::str("contributing")],
            vec![("relativeToURL", base)],
        )
        .property("absoluteURL")
        .property("description")
}

/// All darwin probes, in execution order.
pub fn darwin_suite(ports: &SuitePorts) -> Vec<Probe> {
    vec![
        Probe::behavioral(
            "ctypes",
            "FFI is compiled in and resolves a relative NSURL through the Objective-C bridge",
            BridgeValueCheck::new(ports.bridge.clone(), relative_url_expr(), CONTRIBUTING_URL),
        ),
        Probe::behavioral(
            "scproxy",
            "_scproxy reads the system proxy configuration",
            InvokeFieldCheck::new(
                ports.loader.clone(),
                "_scproxy",
                "_get_proxy_settings",
                "exclude_simple",
            ),
        ),
        Probe::behavioral(
            "curses",
            "curses is compiled in; _curses.error without a terminal still counts",
            InvokeCheck::new(ports.loader.clone(), "curses", "can_change_color")
                .tolerating("_curses.error"),
        ),
        Probe::behavioral(
            "posix_shmem",
            "POSIX shared memory support is importable",
            DegradedImportCheck::new(
                ports.loader.clone(),
                "multiprocessing.shared_memory",
                "a ShareableList round-trip needs process duplication, \
                 which the macOS app shim does not support",
            ),
        ),
        Probe::behavioral(
            "posix_subprocess",
            "the runtime spawns `uname -s` and reads back Darwin",
            ProcessOutputCheck::new(
                ports.process.clone(),
                ports.relay.clone().args(["uname", "-s"]),
                b"Darwin\n".to_vec(),
            ),
        ),
        Probe::module_presence(
            "stdlib_modules",
            "macOS-only stdlib modules exist",
            ModulePresenceCheck::new(ports.loader.clone(), ["_posixshmem", "_scproxy"]),
        ),
    ]
}
