//! Diagnostic sink for stale-batch drops
//!
//! When a consumer asks for readiness twice without claiming anything in
//! between, the unclaimed values are discarded in favor of liveness. The
//! sink receiving that diagnostic is injected at construction rather than
//! being a process-wide logger, so embedders can route it wherever they
//! need.

use tracing::warn;

/// Receives the names of sources whose unclaimed results were discarded
pub trait DropReporter: Send {
    /// Called once per discarded batch, with every affected source name
    fn on_stale_drop(&mut self, sources: &[&str]);
}

/// Default reporter: logs each discarded batch as a warning
pub struct TracingReporter;

impl DropReporter for TracingReporter {
    fn on_stale_drop(&mut self, sources: &[&str]) {
        warn!(
            "discarding unclaimed values from {:?}: nothing was claimed since the previous readiness check",
            sources
        );
    }
}

/// Reporter that swallows the diagnostic entirely
pub struct NullReporter;

impl DropReporter for NullReporter {
    fn on_stale_drop(&mut self, _sources: &[&str]) {}
}
