//! Process activity domain types
//!
//! Processes the sampler flags as individually responsible for high resource use.

use super::metrics::TriggerMetric;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// A process flagged for high activity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcessUsage {
    /// Process ID
    pub pid: u32,
    /// Command (path or executable name)
    pub command: String,
    /// CPU usage percentage
    #[serde(default)]
    pub cpu_percent: f64,
    /// Memory usage percentage
    #[serde(default)]
    pub memory_percent: f64,
    /// Metrics this process was flagged for
    #[serde(default)]
    pub triggers: BTreeSet<TriggerMetric>,
}

impl ProcessUsage {
    /// Create a new process entry with no triggers
    pub fn new(pid: u32, command: impl Into<String>, cpu_percent: f64, memory_percent: f64) -> Self {
        Self {
            pid,
            command: command.into(),
            cpu_percent,
            memory_percent,
            triggers: BTreeSet::new(),
        }
    }

    /// Builder: add a trigger
    pub fn with_trigger(mut self, trigger: TriggerMetric) -> Self {
        self.triggers.insert(trigger);
        self
    }

    /// Check if this process was flagged for a metric
    pub fn triggered_by(&self, metric: TriggerMetric) -> bool {
        self.triggers.contains(&metric)
    }

    /// Highest-priority trigger, if any
    pub fn primary_trigger(&self) -> Option<TriggerMetric> {
        self.triggers.iter().copied().max_by_key(|m| m.priority())
    }

    /// Short name for display (last path component of the command)
    pub fn display_name(&self) -> String {
        let name = self
            .command
            .rsplit('/')
            .find(|part| !part.is_empty())
            .unwrap_or("");
        if name.is_empty() {
            format!("Process {}", self.pid)
        } else {
            name.to_string()
        }
    }
}

impl fmt::Display for ProcessUsage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "PID {} ({}): {:.0}% CPU, {:.0}% memory",
            self.pid,
            self.display_name(),
            self.cpu_percent,
            self.memory_percent
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_name_strips_path() {
        let process = ProcessUsage::new(42, "/usr/bin/cargo", 90.0, 10.0);
        assert_eq!(process.display_name(), "cargo");
    }

    #[test]
    fn test_display_name_fallback() {
        let process = ProcessUsage::new(7, "", 0.0, 0.0);
        assert_eq!(process.display_name(), "Process 7");
    }

    #[test]
    fn test_primary_trigger_uses_priority() {
        let process = ProcessUsage::new(1, "node", 50.0, 60.0)
            .with_trigger(TriggerMetric::Network)
            .with_trigger(TriggerMetric::Memory);
        assert_eq!(process.primary_trigger(), Some(TriggerMetric::Memory));
        assert!(process.triggered_by(TriggerMetric::Network));
        assert!(!process.triggered_by(TriggerMetric::Cpu));
    }

    #[test]
    fn test_process_display() {
        let process = ProcessUsage::new(1234, "/opt/app/server", 85.4, 40.0);
        assert_eq!(process.to_string(), "PID 1234 (server): 85% CPU, 40% memory");
    }
}
