//! Activity status domain types
//!
//! A status is always derived from a snapshot and never mutated in place.

use super::metrics::{MetricSeverity, TriggerMetric};
use serde::Serialize;
use std::fmt;

/// Overall host condition: a level plus the metric responsible for it
///
/// The trigger is present exactly when the level is not normal. Fields are private so the
/// only way to build a status is through the constructors below.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct ActivityStatus {
    level: MetricSeverity,
    trigger: Option<TriggerMetric>,
}

impl ActivityStatus {
    /// Everything within bounds
    pub const fn normal() -> Self {
        Self {
            level: MetricSeverity::Normal,
            trigger: None,
        }
    }

    /// Elevated activity caused by `trigger`
    pub const fn elevated(trigger: TriggerMetric) -> Self {
        Self {
            level: MetricSeverity::Elevated,
            trigger: Some(trigger),
        }
    }

    /// Critical activity caused by `trigger`
    pub const fn critical(trigger: TriggerMetric) -> Self {
        Self {
            level: MetricSeverity::Critical,
            trigger: Some(trigger),
        }
    }

    /// Build a status from a severity and the metric that reached it
    pub const fn from_severity(level: MetricSeverity, trigger: TriggerMetric) -> Self {
        match level {
            MetricSeverity::Normal => Self::normal(),
            MetricSeverity::Elevated => Self::elevated(trigger),
            MetricSeverity::Critical => Self::critical(trigger),
        }
    }

    pub const fn level(&self) -> MetricSeverity {
        self.level
    }

    pub const fn trigger(&self) -> Option<TriggerMetric> {
        self.trigger
    }

    pub fn is_normal(&self) -> bool {
        self.level.is_normal()
    }

    pub fn is_critical(&self) -> bool {
        self.level == MetricSeverity::Critical
    }

    /// Identity of a critical episode, if this status is critical
    pub fn critical_signature(&self) -> Option<CriticalSignature> {
        match (self.level, self.trigger) {
            (MetricSeverity::Critical, Some(trigger)) => Some(CriticalSignature { trigger }),
            _ => None,
        }
    }
}

impl Default for ActivityStatus {
    fn default() -> Self {
        Self::normal()
    }
}

impl fmt::Display for ActivityStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.trigger {
            Some(trigger) => write!(f, "{} ({})", self.level, trigger),
            None => write!(f, "{}", self.level),
        }
    }
}

/// Identity of a sustained-critical episode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct CriticalSignature {
    pub trigger: TriggerMetric,
}
