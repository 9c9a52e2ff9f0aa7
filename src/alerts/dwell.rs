//! Sustained-critical tracking
//!
//! A critical condition only counts once it has persisted, on the same trigger
//! metric, for the required duration. Any gap or trigger change restarts the clock.

use crate::domain::{ActivityStatus, CriticalSignature, MetricsSnapshot};
use std::time::{Duration, SystemTime};

/// Current critical episode, if any
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DwellState {
    signature: Option<CriticalSignature>,
    started_at: Option<SystemTime>,
}

impl DwellState {
    /// No episode in progress
    pub const fn idle() -> Self {
        Self {
            signature: None,
            started_at: None,
        }
    }

    pub fn signature(&self) -> Option<CriticalSignature> {
        self.signature
    }

    pub fn started_at(&self) -> Option<SystemTime> {
        self.started_at
    }

    pub fn is_idle(&self) -> bool {
        self.signature.is_none()
    }

    /// Time spent in the current episode (zero if the clock went backwards)
    pub fn elapsed(&self, now: SystemTime) -> Option<Duration> {
        self.started_at
            .map(|started| now.duration_since(started).unwrap_or_default())
    }

    /// Compute the next state and whether the episode has lasted `required`
    pub fn advance(
        &self,
        status: &ActivityStatus,
        snapshot: &MetricsSnapshot,
        now: SystemTime,
        required: Duration,
    ) -> (DwellState, bool) {
        if !snapshot.has_live_data {
            return (Self::idle(), false);
        }

        let Some(signature) = status.critical_signature() else {
            return (Self::idle(), false);
        };

        let restarted = DwellState {
            signature: Some(signature),
            started_at: Some(now),
        };

        if self.signature != Some(signature) {
            return (restarted, false);
        }

        match self.elapsed(now) {
            Some(elapsed) => (*self, elapsed >= required),
            None => (restarted, false),
        }
    }
}

/// Owner of the dwell state for one monitoring session
#[derive(Debug, Default)]
pub struct DwellTracker {
    state: DwellState,
}

impl DwellTracker {
    /// Create an idle tracker
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed one snapshot; true once the same critical trigger has lasted `required`
    pub fn evaluate(
        &mut self,
        status: &ActivityStatus,
        snapshot: &MetricsSnapshot,
        now: SystemTime,
        required: Duration,
    ) -> bool {
        let (next, sustained) = self.state.advance(status, snapshot, now, required);
        if next.signature != self.state.signature {
            match next.signature {
                Some(sig) => log::debug!("Critical {} episode started", sig.trigger),
                None => log::debug!("Critical episode ended"),
            }
        }
        self.state = next;
        sustained
    }

    /// Drop any episode in progress
    pub fn reset(&mut self) {
        self.state = DwellState::idle();
    }

    pub fn state(&self) -> DwellState {
        self.state
    }
}
