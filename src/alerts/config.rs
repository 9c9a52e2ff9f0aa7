//! Alert configuration
//!
//! TOML-friendly alert settings and their conversion into gate parameters.

use super::gate::{GateConfig, DEFAULT_HIGH_ACTIVITY_DURATION, DEFAULT_THROTTLE_INTERVAL};
use super::permission::PermissionState;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Global alert settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlertSettings {
    /// Whether notifications are evaluated at all
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// How long a critical condition must persist before notifying
    #[serde(default = "default_high_activity_duration")]
    pub high_activity_duration_secs: u64,
    /// Minimum spacing between two notifications
    #[serde(default = "default_throttle_interval")]
    pub throttle_interval_secs: u64,
    /// Permission assumed when no platform notification service is present
    #[serde(default = "default_permission")]
    pub permission: PermissionState,
}

impl AlertSettings {
    /// Convert to gate timing parameters
    pub fn to_gate_config(&self) -> GateConfig {
        GateConfig {
            high_activity_duration: Duration::from_secs(self.high_activity_duration_secs),
            throttle_interval: Duration::from_secs(self.throttle_interval_secs),
        }
    }
}

impl Default for AlertSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            high_activity_duration_secs: default_high_activity_duration(),
            throttle_interval_secs: default_throttle_interval(),
            permission: default_permission(),
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_high_activity_duration() -> u64 {
    DEFAULT_HIGH_ACTIVITY_DURATION.as_secs()
}

fn default_throttle_interval() -> u64 {
    DEFAULT_THROTTLE_INTERVAL.as_secs()
}

fn default_permission() -> PermissionState {
    PermissionState::Authorized
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings() {
        let settings = AlertSettings::default();
        assert!(settings.enabled);
        assert_eq!(settings.high_activity_duration_secs, 120);
        assert_eq!(settings.throttle_interval_secs, 600);
        assert_eq!(settings.to_gate_config(), GateConfig::default());
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let settings: AlertSettings = toml::from_str("high_activity_duration_secs = 30").unwrap();
        assert_eq!(settings.high_activity_duration_secs, 30);
        assert_eq!(settings.throttle_interval_secs, 600);
        assert_eq!(settings.permission, PermissionState::Authorized);
    }

    #[test]
    fn test_to_gate_config() {
        let settings = AlertSettings {
            high_activity_duration_secs: 45,
            throttle_interval_secs: 0,
            ..AlertSettings::default()
        };
        let config = settings.to_gate_config();
        assert_eq!(config.high_activity_duration, Duration::from_secs(45));
        assert_eq!(config.throttle_interval, Duration::ZERO);
    }
}
