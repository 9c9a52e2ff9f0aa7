//! Alert and notification system
//!
//! Dwell tracking, cooldown gating, payload building and delivery channels.

mod config;
mod dispatcher;
mod dwell;
mod gate;
mod notifier;
mod permission;

pub use config::AlertSettings;
pub use dispatcher::{
    keys, ActionResponse, ActionSink, NotificationAction, NotificationDispatcher,
    NotificationMetadata, NotificationPayload, ProcessControl, ProcessTarget,
    HIGH_ACTIVITY_CATEGORY,
};
pub use dwell::{DwellState, DwellTracker};
pub use gate::{
    GateConfig, GateDecision, GateState, NotificationGate, SuppressReason,
    DEFAULT_HIGH_ACTIVITY_DURATION, DEFAULT_THROTTLE_INTERVAL,
};
pub use notifier::{NotificationManager, Notifier, TerminalNotifier};
pub use permission::{PermissionProvider, PermissionState, SharedPermission};
