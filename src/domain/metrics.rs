//! Metric domain types
//!
//! Per-metric severities, trigger priorities and the snapshot produced by the sampler.

use super::process::ProcessUsage;
use crate::error::DomainError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Severity assigned to a single metric by the sampler
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum MetricSeverity {
    /// Within normal bounds
    #[default]
    Normal,
    /// Above the elevated threshold
    Elevated,
    /// Above the critical threshold
    Critical,
}

impl MetricSeverity {
    /// Check if this severity is normal
    pub fn is_normal(&self) -> bool {
        matches!(self, Self::Normal)
    }

    /// Short tag used in status messages (`None` for normal)
    pub fn short_tag(&self) -> Option<&'static str> {
        match self {
            Self::Normal => None,
            Self::Elevated => Some("elev"),
            Self::Critical => Some("crit"),
        }
    }
}

impl fmt::Display for MetricSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Normal => write!(f, "normal"),
            Self::Elevated => write!(f, "elevated"),
            Self::Critical => write!(f, "critical"),
        }
    }
}

/// Metric that can be responsible for a non-normal status
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TriggerMetric {
    Cpu,
    Memory,
    Disk,
    Network,
}

impl TriggerMetric {
    /// All metrics, highest priority first
    pub const ALL: [TriggerMetric; 4] = [Self::Cpu, Self::Memory, Self::Disk, Self::Network];

    /// Tie-break priority (higher wins)
    pub const fn priority(&self) -> u8 {
        match self {
            Self::Cpu => 4,
            Self::Memory => 3,
            Self::Disk => 2,
            Self::Network => 1,
        }
    }

    /// Name shown to the user
    pub const fn display_name(&self) -> &'static str {
        match self {
            Self::Cpu => "CPU",
            Self::Memory => "Memory",
            Self::Disk => "Disk",
            Self::Network => "Network",
        }
    }

    /// Stable tag used in notification metadata
    pub const fn tag(&self) -> &'static str {
        match self {
            Self::Cpu => "cpu",
            Self::Memory => "memory",
            Self::Disk => "disk",
            Self::Network => "network",
        }
    }

    /// Whether the metric value is a byte rate rather than a percentage
    pub const fn is_rate(&self) -> bool {
        matches!(self, Self::Disk | Self::Network)
    }
}

impl fmt::Display for TriggerMetric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.tag())
    }
}

impl FromStr for TriggerMetric {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "cpu" => Ok(Self::Cpu),
            "memory" => Ok(Self::Memory),
            "disk" => Ok(Self::Disk),
            "network" => Ok(Self::Network),
            _ => Err(DomainError::UnknownTriggerMetric(s.to_string())),
        }
    }
}

/// Severity and display value of one metric
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct MetricReading {
    /// Severity assigned by the sampler
    #[serde(default)]
    pub severity: MetricSeverity,
    /// Percent for cpu/memory, bytes per second for disk/network
    #[serde(default)]
    pub value: f64,
}

impl MetricReading {
    /// Create a new reading
    pub const fn new(severity: MetricSeverity, value: f64) -> Self {
        Self { severity, value }
    }
}

/// One point-in-time sample of host activity
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct MetricsSnapshot {
    pub cpu: MetricReading,
    pub memory: MetricReading,
    pub disk: MetricReading,
    pub network: MetricReading,
    /// False until the sampler has produced real values
    pub has_live_data: bool,
    /// Processes flagged as individually responsible for high activity, most relevant first
    pub high_activity_processes: Vec<ProcessUsage>,
}

impl MetricsSnapshot {
    /// Create an all-normal snapshot carrying live data
    pub fn live() -> Self {
        Self {
            has_live_data: true,
            ..Self::default()
        }
    }

    /// Builder: set the reading for one metric
    pub fn with_reading(mut self, metric: TriggerMetric, severity: MetricSeverity, value: f64) -> Self {
        let reading = MetricReading::new(severity, value);
        match metric {
            TriggerMetric::Cpu => self.cpu = reading,
            TriggerMetric::Memory => self.memory = reading,
            TriggerMetric::Disk => self.disk = reading,
            TriggerMetric::Network => self.network = reading,
        }
        self
    }

    /// Builder: append a high-activity process
    pub fn with_process(mut self, process: ProcessUsage) -> Self {
        self.high_activity_processes.push(process);
        self
    }

    /// Get the reading for a metric
    pub fn reading(&self, metric: TriggerMetric) -> MetricReading {
        match metric {
            TriggerMetric::Cpu => self.cpu,
            TriggerMetric::Memory => self.memory,
            TriggerMetric::Disk => self.disk,
            TriggerMetric::Network => self.network,
        }
    }

    /// All readings in priority order
    pub fn readings(&self) -> [(TriggerMetric, MetricReading); 4] {
        TriggerMetric::ALL.map(|metric| (metric, self.reading(metric)))
    }

    /// Metrics currently at exactly `severity`, highest priority first
    pub fn metrics_at(&self, severity: MetricSeverity) -> Vec<TriggerMetric> {
        self.readings()
            .into_iter()
            .filter(|(_, reading)| reading.severity == severity)
            .map(|(metric, _)| metric)
            .collect()
    }

    /// First flagged process, if any
    pub fn standout_process(&self) -> Option<&ProcessUsage> {
        self.high_activity_processes.first()
    }

    /// Check if the sampler flagged any process
    pub fn has_standout_process(&self) -> bool {
        !self.high_activity_processes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_severity_ordering() {
        assert!(MetricSeverity::Normal < MetricSeverity::Elevated);
        assert!(MetricSeverity::Elevated < MetricSeverity::Critical);
    }

    #[test]
    fn test_trigger_priority_order() {
        let priorities: Vec<u8> = TriggerMetric::ALL.iter().map(|m| m.priority()).collect();
        assert_eq!(priorities, vec![4, 3, 2, 1]);
    }

    #[test]
    fn test_trigger_from_str() {
        assert_eq!("disk".parse::<TriggerMetric>().unwrap(), TriggerMetric::Disk);
        assert!(matches!(
            "gpu".parse::<TriggerMetric>(),
            Err(DomainError::UnknownTriggerMetric(_))
        ));
    }

    #[test]
    fn test_metrics_at_priority_order() {
        let snapshot = MetricsSnapshot::live()
            .with_reading(TriggerMetric::Network, MetricSeverity::Elevated, 2_000.0)
            .with_reading(TriggerMetric::Memory, MetricSeverity::Elevated, 75.0);

        assert_eq!(
            snapshot.metrics_at(MetricSeverity::Elevated),
            vec![TriggerMetric::Memory, TriggerMetric::Network]
        );
        assert!(snapshot.metrics_at(MetricSeverity::Critical).is_empty());
    }

    #[test]
    fn test_snapshot_from_json_defaults() {
        let json = r#"{"cpu": {"severity": "critical", "value": 97.0}, "has_live_data": true}"#;
        let snapshot: MetricsSnapshot = serde_json::from_str(json).unwrap();

        assert_eq!(snapshot.cpu.severity, MetricSeverity::Critical);
        assert_eq!(snapshot.memory, MetricReading::default());
        assert!(snapshot.high_activity_processes.is_empty());
        assert!(!snapshot.has_standout_process());
    }
}
