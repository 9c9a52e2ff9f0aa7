//! Configuration system
//!
//! Handles TOML config file parsing and CLI argument merging.

pub mod builder;
pub mod file;

pub use builder::ConfigBuilder;
pub use file::ConfigFile;

use crate::alerts::AlertSettings;
use serde::{Deserialize, Serialize};

/// Main configuration structure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    /// General settings
    pub general: GeneralConfig,
    /// Notification settings
    pub alerts: AlertSettings,
}

/// General configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct GeneralConfig {
    /// Enable verbose logging
    pub verbose: bool,
    /// Disable ANSI colors in terminal notifications
    pub no_color: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alerts::PermissionState;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert!(!config.general.verbose);
        assert!(config.alerts.enabled);
        assert_eq!(config.alerts.high_activity_duration_secs, 120);
        assert_eq!(config.alerts.throttle_interval_secs, 600);
        assert_eq!(config.alerts.permission, PermissionState::Authorized);
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config: Config = toml::from_str(
            r#"
            [alerts]
            throttle_interval_secs = 300
            permission = "denied"
            "#,
        )
        .unwrap();

        assert_eq!(config.alerts.throttle_interval_secs, 300);
        assert_eq!(config.alerts.high_activity_duration_secs, 120);
        assert_eq!(config.alerts.permission, PermissionState::Denied);
        assert!(!config.general.no_color);
    }
}
