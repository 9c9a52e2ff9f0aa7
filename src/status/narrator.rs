//! Status narration
//!
//! Turns a snapshot into the strings shown in menus, titles and notifications.
//! Every entry point re-derives the status from the snapshot it is given, so a
//! caller holding an outdated status still gets text that matches the data.

use super::classifier::classify;
use super::format::format_value;
use crate::domain::{ActivityStatus, MetricSeverity, MetricsSnapshot, TriggerMetric};

/// Shown while the sampler has not produced live values yet
pub const COLLECTING_PLACEHOLDER: &str = "Collecting live metrics…";
/// Shown when every metric is normal
pub const HEALTHY_MESSAGE: &str = "Everything looks healthy.";
/// Title for a normal status
pub const STABLE_TITLE: &str = "System is stable";
/// Notification title when only a flagged process is responsible
pub const PROCESS_NOTIFICATION_TITLE: &str = "High activity process";

/// Human-readable status text
pub struct StatusNarrator;

impl StatusNarrator {
    /// Short headline, e.g. `Critical CPU; Memory elevated`
    pub fn title(status: &ActivityStatus, snapshot: &MetricsSnapshot) -> String {
        let aligned = Self::align(status, snapshot);
        Self::title_for(&aligned, snapshot)
    }

    /// Alert body listing every non-normal metric with its value
    ///
    /// The body follows the snapshot; a stale `status` cannot make it disagree.
    pub fn message(status: &ActivityStatus, snapshot: &MetricsSnapshot) -> String {
        if !snapshot.has_live_data {
            return COLLECTING_PLACEHOLDER.to_string();
        }

        let aligned = Self::align(status, snapshot);
        if aligned.is_normal() {
            return HEALTHY_MESSAGE.to_string();
        }

        let mut active: Vec<_> = snapshot
            .readings()
            .into_iter()
            .filter(|(_, reading)| !reading.severity.is_normal())
            .collect();

        if active.is_empty() {
            return HEALTHY_MESSAGE.to_string();
        }

        active.sort_by(|(a, ra), (b, rb)| {
            rb.severity
                .cmp(&ra.severity)
                .then_with(|| b.priority().cmp(&a.priority()))
        });

        active
            .iter()
            .map(|(metric, reading)| {
                format!(
                    "{} {} ({})",
                    metric.display_name(),
                    format_value(*metric, reading.value),
                    reading.severity.short_tag().unwrap_or_default()
                )
            })
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// One-line summary for a menu, e.g. `CPU and Memory exceeded critical thresholds`
    pub fn menu_summary(snapshot: &MetricsSnapshot) -> String {
        if !snapshot.has_live_data {
            return COLLECTING_PLACEHOLDER.to_string();
        }

        let critical = snapshot.metrics_at(MetricSeverity::Critical);
        let elevated = snapshot.metrics_at(MetricSeverity::Elevated);

        let mut clauses = Vec::with_capacity(2);
        if !critical.is_empty() {
            clauses.push(format!(
                "{} exceeded critical {}",
                natural_list(&critical),
                threshold_noun(critical.len())
            ));
        }
        if !elevated.is_empty() {
            clauses.push(format!(
                "{} above elevated {}",
                natural_list(&elevated),
                threshold_noun(elevated.len())
            ));
        }

        if clauses.is_empty() {
            HEALTHY_MESSAGE.to_string()
        } else {
            clauses.join("; ")
        }
    }

    /// Title used for an outgoing notification
    pub fn notification_title(status: &ActivityStatus, snapshot: &MetricsSnapshot) -> String {
        let aligned = Self::align(status, snapshot);
        if aligned.is_normal() {
            PROCESS_NOTIFICATION_TITLE.to_string()
        } else {
            Self::title_for(&aligned, snapshot)
        }
    }

    fn align(status: &ActivityStatus, snapshot: &MetricsSnapshot) -> ActivityStatus {
        let aligned = classify(snapshot);
        if aligned != *status {
            log::trace!("Narrating {} instead of stale status {}", aligned, status);
        }
        aligned
    }

    fn title_for(aligned: &ActivityStatus, snapshot: &MetricsSnapshot) -> String {
        let critical = snapshot.metrics_at(MetricSeverity::Critical);
        let elevated = snapshot.metrics_at(MetricSeverity::Elevated);

        match aligned.level() {
            MetricSeverity::Normal => STABLE_TITLE.to_string(),
            MetricSeverity::Elevated => match elevated.as_slice() {
                [] => "Elevated activity".to_string(),
                [only] => format!("Elevated {}", only.display_name()),
                _ => "Multiple metrics elevated".to_string(),
            },
            MetricSeverity::Critical if !critical.is_empty() && !elevated.is_empty() => format!(
                "Critical {}; {} elevated",
                comma_list(&critical),
                comma_list(&elevated)
            ),
            MetricSeverity::Critical => match critical.as_slice() {
                [] => "Critical activity".to_string(),
                [only] => format!("Critical {}", only.display_name()),
                _ => "Multiple metrics critical".to_string(),
            },
        }
    }
}

fn comma_list(metrics: &[TriggerMetric]) -> String {
    metrics
        .iter()
        .map(|m| m.display_name())
        .collect::<Vec<_>>()
        .join(", ")
}

// "CPU", "CPU and Memory", "CPU, Memory, Disk"
fn natural_list(metrics: &[TriggerMetric]) -> String {
    match metrics {
        [a, b] => format!("{} and {}", a.display_name(), b.display_name()),
        _ => comma_list(metrics),
    }
}

fn threshold_noun(count: usize) -> &'static str {
    if count == 1 {
        "threshold"
    } else {
        "thresholds"
    }
}
