//! System process control
//!
//! Process control for the command-line front end: reveal prints the process,
//! terminate sends `SIGTERM` through `nix`.

use crate::alerts::{ProcessControl, ProcessTarget};
use crate::error::ProcessControlError;
use nix::errno::Errno;
use nix::sys::signal::{self, Signal};
use nix::unistd::Pid;

/// Process control backed by POSIX signals
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemProcessControl;

impl SystemProcessControl {
    pub fn new() -> Self {
        Self
    }

    /// Deliver `signal` to `pid`; `None` only checks that the process exists
    fn send(&self, pid: u32, signal: Option<Signal>) -> Result<(), ProcessControlError> {
        // 0 addresses our own process group
        if pid == 0 {
            return Err(ProcessControlError::NotFound(pid));
        }
        let nix_pid = Pid::from_raw(
            i32::try_from(pid).map_err(|_| ProcessControlError::NotFound(pid))?,
        );

        signal::kill(nix_pid, signal).map_err(|errno| match errno {
            Errno::ESRCH => ProcessControlError::NotFound(pid),
            Errno::EPERM => ProcessControlError::PermissionDenied(pid),
            other => ProcessControlError::SignalFailed(other.to_string()),
        })
    }

    /// Check that the process still exists
    fn ensure_alive(&self, pid: u32) -> Result<(), ProcessControlError> {
        match self.send(pid, None) {
            // EPERM still means the process exists
            Err(ProcessControlError::PermissionDenied(_)) => Ok(()),
            other => other,
        }
    }
}

impl ProcessControl for SystemProcessControl {
    fn reveal_process(&self, target: &ProcessTarget) -> Result<(), ProcessControlError> {
        self.ensure_alive(target.pid)?;

        let triggers: Vec<&str> = target.triggers.iter().map(|m| m.tag()).collect();
        println!(
            "PID {} {} ({:.0}% CPU, {:.0}% memory; flagged for {})",
            target.pid,
            target.command,
            target.cpu_percent,
            target.memory_percent,
            triggers.join(", ")
        );
        Ok(())
    }

    fn terminate_process(&self, target: &ProcessTarget) -> Result<(), ProcessControlError> {
        log::info!("Sending SIGTERM to pid {} ({})", target.pid, target.command);
        self.send(target.pid, Some(Signal::SIGTERM))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::TriggerMetric;
    use std::collections::BTreeSet;
    use std::process::Command;
    use std::time::{Duration, Instant};

    fn target(pid: u32) -> ProcessTarget {
        ProcessTarget {
            pid,
            command: "sleep".to_string(),
            cpu_percent: 0.0,
            memory_percent: 0.0,
            triggers: BTreeSet::from([TriggerMetric::Cpu]),
        }
    }

    #[test]
    fn test_pid_zero_is_never_signalled() {
        let control = SystemProcessControl::new();
        assert_eq!(
            control.terminate_process(&target(0)),
            Err(ProcessControlError::NotFound(0))
        );
        assert_eq!(
            control.reveal_process(&target(0)),
            Err(ProcessControlError::NotFound(0))
        );
    }

    #[test]
    fn test_pid_beyond_i32_rejected() {
        let control = SystemProcessControl::new();
        let pid = i32::MAX as u32 + 1;
        assert_eq!(
            control.terminate_process(&target(pid)),
            Err(ProcessControlError::NotFound(pid))
        );
    }

    #[test]
    fn test_missing_process_not_found() {
        let control = SystemProcessControl::new();
        assert!(matches!(
            control.terminate_process(&target(4_194_300)),
            Err(ProcessControlError::NotFound(_) | ProcessControlError::PermissionDenied(_))
        ));
    }

    #[test]
    fn test_terminate_live_process_without_path() {
        let mut child = Command::new("sleep").arg("30").spawn().unwrap();
        let saved_path = std::env::var_os("PATH");
        std::env::set_var("PATH", "/nonexistent");

        let result = SystemProcessControl::new().terminate_process(&target(child.id()));

        if let Some(path) = saved_path {
            std::env::set_var("PATH", path);
        }
        assert_eq!(result, Ok(()));

        let deadline = Instant::now() + Duration::from_secs(5);
        let status = loop {
            if let Some(status) = child.try_wait().unwrap() {
                break Some(status);
            }
            if Instant::now() > deadline {
                let _ = child.kill();
                break None;
            }
            std::thread::sleep(Duration::from_millis(20));
        };
        assert!(status.is_some_and(|s| !s.success()));
    }
}
