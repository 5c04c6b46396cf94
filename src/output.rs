//! Switch for human-readable status output
//!
//! JSON results always go to stdout. Banners, status lines and warnings from
//! `ui` are dropped when quiet, so scripts can pipe the JSON alone.

use std::sync::atomic::{AtomicBool, Ordering};

static QUIET: AtomicBool = AtomicBool::new(false);

/// Set from the `--quiet` flag
pub fn set_quiet(quiet: bool) {
    QUIET.store(quiet, Ordering::Relaxed);
}

/// Quiet via `--quiet` or `BREWGRAPH_QUIET=1`
pub fn is_quiet() -> bool {
    QUIET.load(Ordering::Relaxed) || quiet_from_env()
}

fn quiet_from_env() -> bool {
    std::env::var("BREWGRAPH_QUIET")
        .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
        .unwrap_or(false)
}
