//! Triage Telemetry
//!
//! Run metrics for classification: rows classified, sources used and
//! skipped, GFE volumes, and row counts per workflow. Counters are also
//! emitted through the `metrics` facade for whichever recorder the host
//! installs.

pub mod metrics;

pub use crate::metrics::{MetricsCollector, MetricsSnapshot};

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::metrics::{MetricsCollector, MetricsSnapshot};
}
