//! Notification delivery channels
//!
//! Delivery is fire-and-forget: failures are logged and never retried.

use super::dispatcher::NotificationPayload;
use crate::domain::MetricSeverity;
use crate::error::NotifyError;
use std::io::{self, Write};

/// Notification channel trait
pub trait Notifier: Send + Sync {
    /// Enqueue a payload for delivery
    fn deliver(&self, payload: &NotificationPayload) -> Result<(), NotifyError>;

    /// Channel name for identification
    fn name(&self) -> &str;
}

/// Terminal/console notifier
///
/// Writes payloads to stdout/stderr with colored formatting
pub struct TerminalNotifier {
    /// Use stderr instead of stdout
    use_stderr: bool,
    /// Use colors (ANSI escape codes)
    use_colors: bool,
}

impl TerminalNotifier {
    /// Create a new terminal notifier
    pub fn new() -> Self {
        Self {
            use_stderr: true,
            use_colors: Self::supports_color(),
        }
    }

    /// Create a notifier that uses stdout
    pub fn stdout() -> Self {
        Self {
            use_stderr: false,
            use_colors: Self::supports_color(),
        }
    }

    /// Create a notifier without colors
    pub fn no_color() -> Self {
        Self {
            use_stderr: true,
            use_colors: false,
        }
    }

    fn supports_color() -> bool {
        std::env::var("TERM")
            .map(|term| term != "dumb")
            .unwrap_or(false)
    }

    fn format_payload(&self, payload: &NotificationPayload) -> String {
        let mut line = format!("{} {}", self.format_level(payload.level), payload.title);
        if let Some(subtitle) = &payload.subtitle {
            line.push_str(&format!(" [{}]", subtitle));
        }
        line.push_str(&format!(": {}", payload.body));
        if !payload.actions.is_empty() {
            let actions: Vec<&str> = payload.actions.iter().map(|a| a.title()).collect();
            line.push_str(&format!(" (actions: {})", actions.join(", ")));
        }
        line
    }

    fn format_level(&self, level: MetricSeverity) -> String {
        let text = match level {
            MetricSeverity::Normal => "PROCESS",
            MetricSeverity::Elevated => "ELEVATED",
            MetricSeverity::Critical => "CRITICAL",
        };

        if !self.use_colors {
            return text.to_string();
        }

        let color_code = match level {
            MetricSeverity::Normal => "\x1b[36m",   // Cyan
            MetricSeverity::Elevated => "\x1b[33m", // Yellow
            MetricSeverity::Critical => "\x1b[31m", // Red
        };

        format!("{}{}\x1b[0m", color_code, text)
    }
}

impl Default for TerminalNotifier {
    fn default() -> Self {
        Self::new()
    }
}

impl Notifier for TerminalNotifier {
    fn deliver(&self, payload: &NotificationPayload) -> Result<(), NotifyError> {
        let message = self.format_payload(payload);

        let result = if self.use_stderr {
            writeln!(io::stderr().lock(), "{}", message)
        } else {
            writeln!(io::stdout().lock(), "{}", message)
        };

        result.map_err(|e| NotifyError::DeliveryFailed(e.to_string()))
    }

    fn name(&self) -> &str {
        "terminal"
    }
}

/// Notification manager
///
/// Fans a payload out to every registered channel
pub struct NotificationManager {
    notifiers: Vec<Box<dyn Notifier>>,
}

impl NotificationManager {
    /// Create a manager with no channels
    pub fn new() -> Self {
        Self {
            notifiers: Vec::new(),
        }
    }

    /// Add a notifier
    pub fn add_notifier(&mut self, notifier: Box<dyn Notifier>) {
        self.notifiers.push(notifier);
    }

    /// Get number of registered notifiers
    pub fn notifier_count(&self) -> usize {
        self.notifiers.len()
    }
}

impl Notifier for NotificationManager {
    /// Deliver to all channels; succeeds if at least one channel accepted the payload
    fn deliver(&self, payload: &NotificationPayload) -> Result<(), NotifyError> {
        let mut delivered = 0;
        for notifier in &self.notifiers {
            match notifier.deliver(payload) {
                Ok(()) => delivered += 1,
                Err(e) => log::warn!("Failed to notify via {}: {}", notifier.name(), e),
            }
        }

        if delivered == 0 && !self.notifiers.is_empty() {
            return Err(NotifyError::ChannelUnavailable(
                "every channel failed".to_string(),
            ));
        }
        Ok(())
    }

    fn name(&self) -> &str {
        "all"
    }
}

impl Default for NotificationManager {
    fn default() -> Self {
        let mut manager = Self::new();
        manager.add_notifier(Box::new(TerminalNotifier::new()));
        manager
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alerts::dispatcher::{NotificationAction, NotificationMetadata};
    use crate::mock::RecordingNotifier;

    fn payload(level: MetricSeverity) -> NotificationPayload {
        NotificationPayload {
            title: "Critical CPU".to_string(),
            body: "Using 97% CPU for 120s consecutively.".to_string(),
            subtitle: Some("ffmpeg".to_string()),
            level,
            category: "high-activity".to_string(),
            actions: vec![NotificationAction::Reveal, NotificationAction::Terminate],
            metadata: NotificationMetadata::default(),
        }
    }

    #[test]
    fn test_terminal_notifier_creation() {
        let notifier = TerminalNotifier::new();
        assert_eq!(notifier.name(), "terminal");
        assert!(notifier.use_stderr);
        assert!(!TerminalNotifier::stdout().use_stderr);
        assert!(!TerminalNotifier::no_color().use_colors);
    }

    #[test]
    fn test_format_payload() {
        let notifier = TerminalNotifier::no_color();
        assert_eq!(
            notifier.format_payload(&payload(MetricSeverity::Critical)),
            "CRITICAL Critical CPU [ffmpeg]: Using 97% CPU for 120s consecutively. \
             (actions: Reveal in Monitor, Force Quit)"
        );
    }

    #[test]
    fn test_format_level() {
        let notifier = TerminalNotifier::no_color();
        assert_eq!(notifier.format_level(MetricSeverity::Normal), "PROCESS");
        assert_eq!(notifier.format_level(MetricSeverity::Elevated), "ELEVATED");
    }

    #[test]
    fn test_deliver_stdout() {
        let notifier = TerminalNotifier::stdout();
        assert!(notifier.deliver(&payload(MetricSeverity::Elevated)).is_ok());
    }

    #[test]
    fn test_manager_default_has_terminal() {
        assert_eq!(NotificationManager::default().notifier_count(), 1);
        assert_eq!(NotificationManager::new().notifier_count(), 0);
    }

    #[test]
    fn test_manager_fans_out_and_tolerates_failures() {
        let recorder = RecordingNotifier::default();
        let mut manager = NotificationManager::new();
        manager.add_notifier(Box::new(RecordingNotifier::failing()));
        manager.add_notifier(Box::new(recorder.clone()));

        assert!(manager.deliver(&payload(MetricSeverity::Critical)).is_ok());
        assert_eq!(recorder.delivered().len(), 1);
    }

    #[test]
    fn test_manager_all_channels_failing() {
        let mut manager = NotificationManager::new();
        manager.add_notifier(Box::new(RecordingNotifier::failing()));
        assert!(matches!(
            manager.deliver(&payload(MetricSeverity::Critical)),
            Err(NotifyError::ChannelUnavailable(_))
        ));
    }
}
