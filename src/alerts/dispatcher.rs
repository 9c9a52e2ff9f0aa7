//! Notification payloads and user responses
//!
//! Builds the payload handed to the notification service and routes the user's
//! later response (reveal or terminate) to the process control collaborator.

use super::notifier::Notifier;
use crate::domain::{ActivityStatus, MetricSeverity, MetricsSnapshot, ProcessUsage, TriggerMetric};
use crate::error::ProcessControlError;
use crate::status::{classify, format_percent, StatusNarrator};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeSet;
use std::fmt;
use std::time::Duration;

/// Category identifier for high-activity notifications
pub const HIGH_ACTIVITY_CATEGORY: &str = "high-activity";

/// Metadata keys
pub mod keys {
    pub const TRIGGER_METRIC: &str = "triggerMetric";
    pub const TRIGGER_VALUE: &str = "triggerValue";
    pub const PID: &str = "pid";
    pub const COMMAND: &str = "command";
    pub const CPU: &str = "cpu";
    pub const MEMORY: &str = "memory";
    pub const TRIGGERS: &str = "triggers";
}

/// Action offered on a notification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationAction {
    /// Show the process in the monitor (also the default action)
    Reveal,
    /// Force quit the process
    Terminate,
}

impl NotificationAction {
    /// Map a response identifier to an action; anything unrecognised reveals
    pub fn from_identifier(identifier: &str) -> Self {
        match identifier {
            "terminate" | "force-quit" => Self::Terminate,
            _ => Self::Reveal,
        }
    }

    pub const fn identifier(&self) -> &'static str {
        match self {
            Self::Reveal => "reveal",
            Self::Terminate => "terminate",
        }
    }

    /// Button title
    pub const fn title(&self) -> &'static str {
        match self {
            Self::Reveal => "Reveal in Monitor",
            Self::Terminate => "Force Quit",
        }
    }

    pub const fn is_destructive(&self) -> bool {
        matches!(self, Self::Terminate)
    }
}

impl fmt::Display for NotificationAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.identifier())
    }
}

/// Process identity carried through a notification and back
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProcessTarget {
    pub pid: u32,
    pub command: String,
    pub cpu_percent: f64,
    pub memory_percent: f64,
    pub triggers: BTreeSet<TriggerMetric>,
}

impl ProcessTarget {
    /// Rebuild a target from notification metadata
    ///
    /// Returns `None` when the pid or command is missing or malformed. Unknown trigger
    /// tags are dropped; an empty trigger set falls back to cpu.
    pub fn from_user_info(info: &Map<String, Value>) -> Option<Self> {
        let pid = info
            .get(keys::PID)
            .and_then(Value::as_u64)
            .and_then(|pid| u32::try_from(pid).ok())?;
        let command = info
            .get(keys::COMMAND)
            .and_then(Value::as_str)
            .filter(|command| !command.is_empty())?
            .to_string();

        let mut triggers: BTreeSet<TriggerMetric> = info
            .get(keys::TRIGGERS)
            .and_then(Value::as_array)
            .map(|tags| {
                tags.iter()
                    .filter_map(Value::as_str)
                    .filter_map(|tag| tag.parse().ok())
                    .collect()
            })
            .unwrap_or_default();
        if triggers.is_empty() {
            triggers.insert(TriggerMetric::Cpu);
        }

        Some(Self {
            pid,
            command,
            cpu_percent: info.get(keys::CPU).and_then(Value::as_f64).unwrap_or(0.0),
            memory_percent: info.get(keys::MEMORY).and_then(Value::as_f64).unwrap_or(0.0),
            triggers,
        })
    }
}

impl From<&ProcessUsage> for ProcessTarget {
    fn from(process: &ProcessUsage) -> Self {
        Self {
            pid: process.pid,
            command: process.command.clone(),
            cpu_percent: process.cpu_percent,
            memory_percent: process.memory_percent,
            triggers: process.triggers.clone(),
        }
    }
}

/// Structured data attached to a notification
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct NotificationMetadata {
    pub trigger_metric: Option<TriggerMetric>,
    pub trigger_value: Option<f64>,
    pub process: Option<ProcessTarget>,
}

impl NotificationMetadata {
    /// Render as the key/value map handed to the notification service
    pub fn to_user_info(&self) -> Map<String, Value> {
        let mut info = Map::new();

        if let Some(metric) = self.trigger_metric {
            info.insert(keys::TRIGGER_METRIC.into(), Value::from(metric.tag()));
        }
        if let Some(value) = self.trigger_value {
            info.insert(keys::TRIGGER_VALUE.into(), Value::from(value));
        }
        if let Some(process) = &self.process {
            let mut triggers: Vec<TriggerMetric> = process.triggers.iter().copied().collect();
            triggers.sort_by_key(|m| std::cmp::Reverse(m.priority()));

            info.insert(keys::PID.into(), Value::from(process.pid));
            info.insert(keys::COMMAND.into(), Value::from(process.command.as_str()));
            info.insert(keys::CPU.into(), Value::from(process.cpu_percent));
            info.insert(keys::MEMORY.into(), Value::from(process.memory_percent));
            info.insert(
                keys::TRIGGERS.into(),
                Value::from(triggers.iter().map(|m| m.tag()).collect::<Vec<_>>()),
            );
        }

        info
    }
}

/// Outgoing notification
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NotificationPayload {
    pub title: String,
    pub body: String,
    /// Process display name, when a process is attached
    pub subtitle: Option<String>,
    /// Severity of the status the payload describes
    pub level: MetricSeverity,
    pub category: String,
    pub actions: Vec<NotificationAction>,
    pub metadata: NotificationMetadata,
}

impl NotificationPayload {
    /// Metadata as a key/value map
    pub fn user_info(&self) -> Map<String, Value> {
        self.metadata.to_user_info()
    }
}

/// A user's response to a delivered notification
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ActionResponse {
    /// Identifier of the chosen action; empty for the default action
    #[serde(default)]
    pub action_identifier: String,
    /// Metadata map echoed back by the notification service
    #[serde(default)]
    pub user_info: Map<String, Value>,
}

impl ActionResponse {
    pub fn new(action_identifier: impl Into<String>, user_info: Map<String, Value>) -> Self {
        Self {
            action_identifier: action_identifier.into(),
            user_info,
        }
    }
}

/// Receiver for asynchronous user responses
pub trait ActionSink: Send + Sync {
    fn on_action(&self, response: ActionResponse);
}

/// External process control
///
/// `reveal_process` affects visible UI; implementations must hand it to the UI-owning
/// context. `terminate_process` may run on whatever thread delivered the response.
pub trait ProcessControl: Send + Sync {
    fn reveal_process(&self, target: &ProcessTarget) -> Result<(), ProcessControlError>;
    fn terminate_process(&self, target: &ProcessTarget) -> Result<(), ProcessControlError>;
}

/// Builds payloads and routes responses
pub struct NotificationDispatcher<C: ProcessControl> {
    control: C,
    high_activity_duration: Duration,
}

impl<C: ProcessControl> NotificationDispatcher<C> {
    /// Create a dispatcher; `high_activity_duration` is quoted in process alerts
    pub fn new(control: C, high_activity_duration: Duration) -> Self {
        Self {
            control,
            high_activity_duration,
        }
    }

    /// Build the payload describing `snapshot`
    pub fn build_payload(
        &self,
        status: &ActivityStatus,
        snapshot: &MetricsSnapshot,
    ) -> NotificationPayload {
        let aligned = classify(snapshot);
        let title = StatusNarrator::notification_title(status, snapshot);

        let (body, subtitle, metadata) = match snapshot.standout_process() {
            Some(process) => {
                let trigger_metric = aligned.trigger().or_else(|| process.primary_trigger());
                (
                    self.process_body(process),
                    Some(process.display_name()),
                    NotificationMetadata {
                        trigger_metric,
                        trigger_value: trigger_metric.map(|m| snapshot.reading(m).value),
                        process: Some(ProcessTarget::from(process)),
                    },
                )
            }
            None => (
                StatusNarrator::message(status, snapshot),
                None,
                NotificationMetadata {
                    trigger_metric: aligned.trigger(),
                    trigger_value: aligned.trigger().map(|m| snapshot.reading(m).value),
                    process: None,
                },
            ),
        };

        let actions = if metadata.process.is_some() {
            vec![NotificationAction::Reveal, NotificationAction::Terminate]
        } else {
            Vec::new()
        };

        NotificationPayload {
            title,
            body,
            subtitle,
            level: aligned.level(),
            category: HIGH_ACTIVITY_CATEGORY.to_string(),
            actions,
            metadata,
        }
    }

    /// Build a payload and hand it to a delivery channel without waiting on the outcome
    pub fn dispatch<N: Notifier + ?Sized>(
        &self,
        notifier: &N,
        status: &ActivityStatus,
        snapshot: &MetricsSnapshot,
    ) -> NotificationPayload {
        let payload = self.build_payload(status, snapshot);
        if let Err(e) = notifier.deliver(&payload) {
            log::warn!("Failed to deliver notification via {}: {}", notifier.name(), e);
        }
        payload
    }

    /// Route a response to process control; returns the action taken, if any
    ///
    /// Control failures are logged and swallowed.
    pub fn route(&self, response: &ActionResponse) -> Option<NotificationAction> {
        match self.try_route(response) {
            Ok(action) => action,
            Err((action, e)) => {
                log::warn!("Failed to {} process: {}", action, e);
                Some(action)
            }
        }
    }

    /// Route a response, surfacing process control failures
    ///
    /// `Ok(None)` means the response carried no process identity.
    pub fn try_route(
        &self,
        response: &ActionResponse,
    ) -> Result<Option<NotificationAction>, (NotificationAction, ProcessControlError)> {
        let Some(target) = ProcessTarget::from_user_info(&response.user_info) else {
            log::debug!(
                "Ignoring '{}' response without a process identity",
                response.action_identifier
            );
            return Ok(None);
        };

        let action = NotificationAction::from_identifier(&response.action_identifier);
        log::debug!("Routing {} for pid {}", action, target.pid);
        let result = match action {
            NotificationAction::Reveal => self.control.reveal_process(&target),
            NotificationAction::Terminate => self.control.terminate_process(&target),
        };

        result.map(|_| Some(action)).map_err(|e| (action, e))
    }

    pub fn control(&self) -> &C {
        &self.control
    }

    fn process_body(&self, process: &ProcessUsage) -> String {
        let secs = self.high_activity_duration.as_secs();
        let cpu = process.triggered_by(TriggerMetric::Cpu);
        let memory = process.triggered_by(TriggerMetric::Memory);

        match (cpu, memory) {
            (true, true) => format!(
                "Using {} CPU and {} memory for {}s consecutively.",
                format_percent(process.cpu_percent),
                format_percent(process.memory_percent),
                secs
            ),
            (true, false) => format!(
                "Using {} CPU for {}s consecutively.",
                format_percent(process.cpu_percent),
                secs
            ),
            (false, true) => format!(
                "Using {} memory for {}s consecutively.",
                format_percent(process.memory_percent),
                secs
            ),
            (false, false) => {
                let mut triggers: Vec<TriggerMetric> = process.triggers.iter().copied().collect();
                triggers.sort_by_key(|m| std::cmp::Reverse(m.priority()));
                let names: Vec<&str> = triggers.iter().map(|m| m.display_name()).collect();
                if names.is_empty() {
                    format!("High activity for {}s consecutively.", secs)
                } else {
                    format!("High {} activity for {}s consecutively.", names.join(" and "), secs)
                }
            }
        }
    }
}

impl<C: ProcessControl> ActionSink for NotificationDispatcher<C> {
    fn on_action(&self, response: ActionResponse) {
        self.route(&response);
    }
}
