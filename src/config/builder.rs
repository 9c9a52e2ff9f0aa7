//! Configuration builder
//!
//! Merges configuration from files and CLI arguments.

use crate::alerts::PermissionState;
use crate::config::{Config, ConfigFile};
use crate::error::ConfigError;

/// Builder for merging configuration sources
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Create a new builder with default configuration
    pub fn new() -> Self {
        Self {
            config: Config::default(),
        }
    }

    /// Load configuration from a file
    ///
    /// An explicit path must load; without one the default locations are searched.
    pub fn with_file(mut self, path: Option<&str>) -> Result<Self, ConfigError> {
        let file_config = match path {
            Some(path) => Some(ConfigFile::load(path)?),
            None => ConfigFile::load_default(),
        };

        if let Some(cfg) = file_config {
            self.config = cfg;
        }

        Ok(self)
    }

    /// Override with CLI verbose flag
    pub fn with_verbose(mut self, verbose: Option<bool>) -> Self {
        if let Some(v) = verbose {
            self.config.general.verbose = v;
        }
        self
    }

    /// Override the high activity duration
    pub fn with_dwell_secs(mut self, secs: Option<u64>) -> Self {
        if let Some(s) = secs {
            self.config.alerts.high_activity_duration_secs = s;
        }
        self
    }

    /// Override the throttle interval
    pub fn with_throttle_secs(mut self, secs: Option<u64>) -> Self {
        if let Some(s) = secs {
            self.config.alerts.throttle_interval_secs = s;
        }
        self
    }

    /// Override the assumed notification permission
    pub fn with_permission(mut self, permission: Option<PermissionState>) -> Self {
        if let Some(p) = permission {
            self.config.alerts.permission = p;
        }
        self
    }

    /// Build the final configuration
    pub fn build(self) -> Config {
        self.config
    }
}

impl Default for ConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}
