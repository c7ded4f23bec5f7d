//! Shared counters for the /health endpoint.
//! Updated by the report handlers; never read back into a report.

use std::sync::atomic::{AtomicU64, Ordering};

#[derive(Default)]
pub struct HealthState {
    /// Reports successfully built since start-up.
    pub reports_built: AtomicU64,
    /// Report requests that ended in an error (missing file, bad schema, bad date).
    pub reports_failed: AtomicU64,
    /// Nanosecond timestamp of the last successful build (0 = none).
    pub last_report_at_ns: AtomicU64,
}

impl HealthState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_built(&self, at_ns: u64) {
        self.reports_built.fetch_add(1, Ordering::Relaxed);
        self.last_report_at_ns.store(at_ns, Ordering::Relaxed);
    }

    pub fn record_failed(&self) {
        self.reports_failed.fetch_add(1, Ordering::Relaxed);
    }

    pub fn reports_built(&self) -> u64 {
        self.reports_built.load(Ordering::Relaxed)
    }

    pub fn reports_failed(&self) -> u64 {
        self.reports_failed.load(Ordering::Relaxed)
    }

    pub fn last_report_at_ns(&self) -> u64 {
        self.last_report_at_ns.load(Ordering::Relaxed)
    }
}
