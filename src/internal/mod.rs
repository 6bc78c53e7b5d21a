//! prismalog's own diagnostic channel — reports the library's lifecycle and
//! absorbed faults without recursing into the delivery path it is reporting on.
//!
//! Silent by default; set `PRISMALOG_DEBUG=1` to see it. Writes straight to
//! stderr because when this fires, the normal pipeline may be the thing that
//! is broken.

use std::io::Write;
use std::sync::OnceLock;

static ENABLED: OnceLock<bool> = OnceLock::new();

fn enabled() -> bool {
    *ENABLED.get_or_init(|| {
        std::env::var("PRISMALOG_DEBUG").is_ok_and(|v| {
            matches!(v.to_lowercase().as_str(), "1" | "true" | "yes" | "on")
        })
    })
}

/// Pre-init and fault-path diagnostics. Best effort — a failed stderr write
/// has nowhere left to report to.
pub fn diag(scope: &str, msg: &str) {
    if !enabled() {
        return;
    }
    let _ = writeln!(std::io::stderr(), "[prismalog:{scope}] {msg}");
}
