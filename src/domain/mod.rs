//! Domain models for hostwatch
//!
//! Metric readings, flagged processes and the derived activity status.
//! Snapshots are immutable values; statuses are recomputed from them on demand.

pub mod metrics;
pub mod process;
pub mod status;

pub use metrics::{MetricReading, MetricSeverity, MetricsSnapshot, TriggerMetric};
pub use process::ProcessUsage;
pub use status::{ActivityStatus, CriticalSignature};
