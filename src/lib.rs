//! hostwatch - host resource monitoring library
//!
//! Classifies resource snapshots into an activity status, narrates that status
//! for people, and decides when a sustained condition or a standout process
//! deserves a notification.
//!
//! # Modules
//!
//! - [`alerts`]: Dwell tracking, notification gating and dispatch
//! - [`cli`]: Command-line interface definitions
//! - [`commands`]: Command handlers
//! - [`config`]: Configuration system
//! - [`domain`]: Metric, process and status types
//! - [`error`]: Error types
//! - [`services`]: Monitoring session and its collaborators
//! - [`status`]: Severity classification and status text

pub mod alerts;
pub mod cli;
pub mod commands;
pub mod config;
pub mod domain;
pub mod error;
pub mod services;
pub mod status;

#[cfg(test)]
pub mod mock;

pub use error::{AppError, Result};
