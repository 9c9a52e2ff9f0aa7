//! Mock implementations for testing
//!
//! Synthetic clocks plus recording stand-ins for the notification service and
//! process control, so the engine can be tested without a platform layer.

use crate::alerts::{NotificationPayload, Notifier, ProcessControl, ProcessTarget};
use crate::error::{NotifyError, ProcessControlError};

use std::sync::{Arc, Mutex};
use std::time::{Duration, SystemTime, UNIX_EPOCH};

/// Synthetic timestamp `secs` seconds into a session
pub fn at(secs: u64) -> SystemTime {
    UNIX_EPOCH + Duration::from_secs(secs)
}

/// Call recorded by [`RecordingProcessControl`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlCall {
    Reveal(u32),
    Terminate(u32),
}

/// Process control that records calls instead of touching processes
#[derive(Debug, Clone, Default)]
pub struct RecordingProcessControl {
    calls: Arc<Mutex<Vec<ControlCall>>>,
    fail: bool,
}

impl RecordingProcessControl {
    /// A control whose every call fails with `NotFound`
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub fn calls(&self) -> Vec<ControlCall> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: ControlCall, pid: u32) -> Result<(), ProcessControlError> {
        self.calls.lock().unwrap().push(call);
        if self.fail {
            Err(ProcessControlError::NotFound(pid))
        } else {
            Ok(())
        }
    }
}

impl ProcessControl for RecordingProcessControl {
    fn reveal_process(&self, target: &ProcessTarget) -> Result<(), ProcessControlError> {
        self.record(ControlCall::Reveal(target.pid), target.pid)
    }

    fn terminate_process(&self, target: &ProcessTarget) -> Result<(), ProcessControlError> {
        self.record(ControlCall::Terminate(target.pid), target.pid)
    }
}

/// Notifier that keeps delivered payloads in memory
#[derive(Debug, Clone, Default)]
pub struct RecordingNotifier {
    delivered: Arc<Mutex<Vec<NotificationPayload>>>,
    fail: bool,
}

impl RecordingNotifier {
    /// A notifier whose deliveries always fail
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub fn delivered(&self) -> Vec<NotificationPayload> {
        self.delivered.lock().unwrap().clone()
    }
}

impl Notifier for RecordingNotifier {
    fn deliver(&self, payload: &NotificationPayload) -> Result<(), NotifyError> {
        if self.fail {
            return Err(NotifyError::DeliveryFailed("mock failure".to_string()));
        }
        self.delivered.lock().unwrap().push(payload.clone());
        Ok(())
    }

    fn name(&self) -> &str {
        "recording"
    }
}
