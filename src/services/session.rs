//! Monitoring session
//!
//! Single owner of the gate and dwell state for one session. Every snapshot goes
//! through [`MonitorSession::tick`], which takes `&mut self`, so evaluations are
//! serialized by construction.

use super::source::SnapshotSource;
use crate::alerts::{
    AlertSettings, NotificationDispatcher, NotificationGate, NotificationPayload, Notifier,
    PermissionProvider, ProcessControl,
};
use crate::domain::MetricsSnapshot;
use crate::error::Result;
use crate::status::classify;
use serde::Serialize;
use std::time::SystemTime;

/// Counters for one session
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SessionStats {
    /// Snapshots evaluated
    pub evaluated: usize,
    /// Notifications fired
    pub fired: usize,
}

/// Monitoring session
pub struct MonitorSession<P: PermissionProvider, C: ProcessControl> {
    gate: NotificationGate<P>,
    dispatcher: NotificationDispatcher<C>,
    notifier: Box<dyn Notifier>,
    enabled: bool,
    stats: SessionStats,
}

impl<P: PermissionProvider, C: ProcessControl> MonitorSession<P, C> {
    /// Create a new session
    pub fn new(
        settings: &AlertSettings,
        permission: P,
        control: C,
        notifier: Box<dyn Notifier>,
    ) -> Self {
        let gate_config = settings.to_gate_config();

        Self {
            gate: NotificationGate::new(gate_config, permission),
            dispatcher: NotificationDispatcher::new(control, gate_config.high_activity_duration),
            notifier,
            enabled: settings.enabled,
            stats: SessionStats::default(),
        }
    }

    /// Evaluate one snapshot; returns the payload if a notification went out
    pub fn tick(
        &mut self,
        snapshot: &MetricsSnapshot,
        now: SystemTime,
    ) -> Option<NotificationPayload> {
        self.stats.evaluated += 1;

        if !self.enabled {
            return None;
        }

        let status = classify(snapshot);
        if !self.gate.should_notify(&status, snapshot, now) {
            return None;
        }

        self.stats.fired += 1;
        Some(
            self.dispatcher
                .dispatch(self.notifier.as_ref(), &status, snapshot),
        )
    }

    /// Drain a source through the session
    pub fn run<S: SnapshotSource>(&mut self, source: &mut S) -> Result<Vec<NotificationPayload>> {
        let mut fired = Vec::new();

        while let Some(timed) = source.next_snapshot()? {
            if let Some(payload) = self.tick(&timed.snapshot, timed.timestamp()) {
                log::debug!("t={}s: {}", timed.at, payload.title);
                fired.push(payload);
            }
        }

        log::info!(
            "Session evaluated {} snapshot(s), fired {} notification(s)",
            self.stats.evaluated,
            self.stats.fired
        );
        Ok(fired)
    }

    /// Receiver for user responses to delivered notifications
    pub fn dispatcher(&self) -> &NotificationDispatcher<C> {
        &self.dispatcher
    }

    pub fn gate(&self) -> &NotificationGate<P> {
        &self.gate
    }

    pub fn stats(&self) -> SessionStats {
        self.stats
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }
}
