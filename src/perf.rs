//! Lightweight stage timing, enabled with `--perf`.

use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Instant;

static ENABLED: AtomicBool = AtomicBool::new(false);

/// Prints its elapsed time on drop when timing is enabled.
#[derive(Debug)]
pub struct Scope {
    name: &'static str,
    detail: String,
    start: Instant,
}

impl Scope {
    /// Elapsed time in milliseconds so far.
    pub fn elapsed_ms(&self) -> f64 {
        self.start.elapsed().as_secs_f64() * 1000.0
    }
}

impl Drop for Scope {
    fn drop(&mut self) {
        if !is_enabled() {
            return;
        }
        eprintln!("[perf] {} {}: {:.2} ms", self.name, self.detail, self.elapsed_ms());
    }
}

pub fn set_enabled(enabled: bool) {
    ENABLED.store(enabled, Ordering::Relaxed);
}

pub fn is_enabled() -> bool {
    ENABLED.load(Ordering::Relaxed)
}

/// Start timing a stage; `detail` names what it runs on, usually a file.
pub fn scope(name: &'static str, detail: impl Into<String>) -> Scope {
    Scope {
        name,
        detail: detail.into(),
        start: Instant::now(),
    }
}
