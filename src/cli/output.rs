//! Output formatting utilities
//!
//! Provides table and JSON output formatting for CLI commands.

use crate::alerts::{NotificationAction, NotificationPayload};
use crate::cli::args::OutputFormat;
use crate::domain::{ActivityStatus, MetricSeverity, MetricsSnapshot, TriggerMetric};
use crate::services::SessionStats;
use crate::status::StatusNarrator;
use serde::Serialize;
use std::io::{self, Write};

/// Format and print output based on the selected format
pub fn print_output<T: Serialize + TableDisplay>(data: &T, format: OutputFormat) -> io::Result<()> {
    let stdout = io::stdout();
    let mut handle = stdout.lock();

    match format {
        OutputFormat::Table => {
            writeln!(handle, "{}", data.to_table())?;
        }
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(data).unwrap_or_else(|_| "{}".to_string());
            writeln!(handle, "{}", json)?;
        }
        OutputFormat::Compact => {
            writeln!(handle, "{}", data.to_compact())?;
        }
    }

    Ok(())
}

/// Trait for types that can be displayed as a table
pub trait TableDisplay {
    /// Format as a table string
    fn to_table(&self) -> String;

    /// Format as a compact single line
    fn to_compact(&self) -> String {
        self.to_table().replace('\n', " | ")
    }
}

/// Narrated status of one snapshot
#[derive(Debug, Clone, Serialize)]
pub struct StatusReport {
    pub level: MetricSeverity,
    pub trigger: Option<TriggerMetric>,
    pub title: String,
    pub message: String,
    pub menu_summary: String,
    pub has_live_data: bool,
}

impl StatusReport {
    pub fn new(status: &ActivityStatus, snapshot: &MetricsSnapshot) -> Self {
        Self {
            level: status.level(),
            trigger: status.trigger(),
            title: StatusNarrator::title(status, snapshot),
            message: StatusNarrator::message(status, snapshot),
            menu_summary: StatusNarrator::menu_summary(snapshot),
            has_live_data: snapshot.has_live_data,
        }
    }
}

impl TableDisplay for StatusReport {
    fn to_table(&self) -> String {
        let mut output = format!("{}\n", self.title);
        output.push_str(&format!("  {}\n", self.message));
        output.push_str(&format!("  Menu: {}", self.menu_summary));
        output
    }

    fn to_compact(&self) -> String {
        format!("{}: {}", self.level, self.menu_summary)
    }
}

/// One notification fired during a replay
#[derive(Debug, Clone, Serialize)]
pub struct FiredNotification {
    pub title: String,
    pub body: String,
    pub level: MetricSeverity,
    pub actions: Vec<NotificationAction>,
}

impl From<&NotificationPayload> for FiredNotification {
    fn from(payload: &NotificationPayload) -> Self {
        Self {
            title: payload.title.clone(),
            body: payload.body.clone(),
            level: payload.level,
            actions: payload.actions.clone(),
        }
    }
}

/// Result of replaying a session
#[derive(Debug, Clone, Serialize)]
pub struct ReplaySummary {
    pub evaluated: usize,
    pub fired: usize,
    pub notifications: Vec<FiredNotification>,
}

impl ReplaySummary {
    pub fn new(stats: SessionStats, payloads: &[NotificationPayload]) -> Self {
        Self {
            evaluated: stats.evaluated,
            fired: stats.fired,
            notifications: payloads.iter().map(FiredNotification::from).collect(),
        }
    }
}

impl TableDisplay for ReplaySummary {
    fn to_table(&self) -> String {
        let mut output = format!("Snapshots evaluated: {}\n", self.evaluated);
        output.push_str(&format!("Notifications fired: {}", self.fired));

        for notification in &self.notifications {
            output.push_str(&format!(
                "\n  [{}] {}: {}",
                notification.level, notification.title, notification.body
            ));
        }

        output
    }

    fn to_compact(&self) -> String {
        format!("evaluated={} fired={}", self.evaluated, self.fired)
    }
}

/// Simple message output
#[derive(Debug, Clone, Serialize)]
pub struct Message {
    pub message: String,
    pub success: bool,
}

impl TableDisplay for Message {
    fn to_table(&self) -> String {
        if self.success {
            format!("✓ {}", self.message)
        } else {
            format!("✗ {}", self.message)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::status::classify;

    #[test]
    fn test_status_report_table() {
        let snapshot = MetricsSnapshot::live()
            .with_reading(TriggerMetric::Cpu, MetricSeverity::Critical, 97.0)
            .with_reading(TriggerMetric::Memory, MetricSeverity::Elevated, 81.0);
        let report = StatusReport::new(&classify(&snapshot), &snapshot);

        assert_eq!(report.level, MetricSeverity::Critical);
        assert_eq!(report.trigger, Some(TriggerMetric::Cpu));
        let table = report.to_table();
        assert!(table.starts_with("Critical CPU; Memory elevated"));
        assert!(report.to_compact().starts_with("critical: "));
    }

    #[test]
    fn test_replay_summary_table() {
        let summary = ReplaySummary {
            evaluated: 5,
            fired: 0,
            notifications: Vec::new(),
        };

        assert_eq!(summary.to_compact(), "evaluated=5 fired=0");
        assert!(summary.to_table().contains("Notifications fired: 0"));
    }

    #[test]
    fn test_message_display() {
        let msg = Message {
            message: "Operation completed".to_string(),
            success: true,
        };

        assert!(msg.to_table().starts_with('✓'));
    }
}
