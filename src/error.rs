//! Unified error types for hostwatch
//!
//! This module defines all error types used throughout the application.
//! The status and gating engine itself is total; errors only come from the
//! edges (config files, snapshot input, notification delivery, process control).

use thiserror::Error;

/// Top-level application error type
#[derive(Error, Debug)]
pub enum AppError {
    /// Error from configuration loading
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Error from domain type parsing
    #[error("Domain validation error: {0}")]
    Domain(#[from] DomainError),

    /// Error from a notification channel
    #[error("Notification error: {0}")]
    Notify(#[from] NotifyError),

    /// Error from the process control collaborator
    #[error("Process control error: {0}")]
    ProcessControl(#[from] ProcessControlError),

    /// Snapshot input could not be parsed
    #[error("Invalid snapshot at line {line}: {message}")]
    InvalidSnapshot { line: usize, message: String },

    /// JSON input/output error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// IO error (file operations)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors from domain type parsing
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Trigger tag not one of cpu/memory/disk/network
    #[error("Unknown trigger metric: {0}")]
    UnknownTriggerMetric(String),
}

/// Errors from notification delivery
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NotifyError {
    /// The channel accepted the payload but failed to deliver it
    #[error("Failed to deliver notification: {0}")]
    DeliveryFailed(String),

    /// The channel is not reachable at all
    #[error("Notification channel unavailable: {0}")]
    ChannelUnavailable(String),
}

/// Errors from revealing or terminating a process
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProcessControlError {
    /// Process no longer exists
    #[error("Process not found: pid {0}")]
    NotFound(u32),

    /// Not allowed to signal the process
    #[error("Permission denied for pid {0}")]
    PermissionDenied(u32),

    /// Signal delivery failed
    #[error("Failed to signal process: {0}")]
    SignalFailed(String),
}

/// Errors from configuration loading
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Config file not found
    #[error("Configuration file not found: {0}")]
    FileNotFound(String),

    /// TOML parsing error
    #[error("TOML parse error: {0}")]
    TomlError(#[from] toml::de::Error),
}

/// Result type alias using AppError
pub type Result<T> = std::result::Result<T, AppError>;
