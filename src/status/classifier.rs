//! Severity classification
//!
//! Picks the single most relevant metric out of a snapshot.

use crate::domain::{ActivityStatus, MetricsSnapshot};

/// Derive the overall status of a snapshot
///
/// The most severe metric wins; ties are broken by trigger priority
/// (cpu > memory > disk > network). Pure and deterministic.
pub fn classify(snapshot: &MetricsSnapshot) -> ActivityStatus {
    let selected = snapshot.readings().into_iter().max_by(|(a, ra), (b, rb)| {
        ra.severity
            .cmp(&rb.severity)
            .then_with(|| a.priority().cmp(&b.priority()))
    });

    match selected {
        Some((metric, reading)) => ActivityStatus::from_severity(reading.severity, metric),
        None => ActivityStatus::normal(),
    }
}
