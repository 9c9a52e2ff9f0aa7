//! Notification gating
//!
//! Decides, snapshot by snapshot, whether a notification should go out.
//! A gate owns mutable state and must only be driven by one evaluation at a time;
//! `&mut self` on [`NotificationGate::evaluate`] enforces that.

use super::dwell::{DwellState, DwellTracker};
use super::permission::{PermissionProvider, PermissionState};
use crate::domain::{ActivityStatus, MetricsSnapshot, TriggerMetric};
use std::fmt;
use std::time::{Duration, SystemTime};

/// Default time a critical condition must persist before it is alert-worthy
pub const DEFAULT_HIGH_ACTIVITY_DURATION: Duration = Duration::from_secs(120);
/// Default minimum spacing between two notifications
pub const DEFAULT_THROTTLE_INTERVAL: Duration = Duration::from_secs(600);

/// Gate timing parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GateConfig {
    /// Dwell requirement for sustained-critical alerts
    pub high_activity_duration: Duration,
    /// Cooldown after a notification fires
    pub throttle_interval: Duration,
}

impl Default for GateConfig {
    fn default() -> Self {
        Self {
            high_activity_duration: DEFAULT_HIGH_ACTIVITY_DURATION,
            throttle_interval: DEFAULT_THROTTLE_INTERVAL,
        }
    }
}

/// Cooldown bookkeeping
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct GateState {
    pub last_notified_at: Option<SystemTime>,
}

impl GateState {
    /// Remaining cooldown at `now`, or `None` if notifications may fire
    pub fn cooldown_remaining(&self, now: SystemTime, throttle: Duration) -> Option<Duration> {
        let last = self.last_notified_at?;
        let elapsed = now.duration_since(last).unwrap_or_default();
        (elapsed < throttle).then(|| throttle - elapsed)
    }

    /// State after a notification fired at `now`
    pub fn fired(self, now: SystemTime) -> Self {
        Self {
            last_notified_at: Some(now),
        }
    }
}

/// Why a snapshot did not produce a notification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SuppressReason {
    /// Permission is missing or not yet known
    PermissionNotGranted(PermissionState),
    /// Neither a sustained critical condition nor a standout process
    NotEligible,
    /// A notification fired too recently
    CoolingDown { remaining: Duration },
}

impl fmt::Display for SuppressReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PermissionNotGranted(state) => write!(f, "permission {}", state),
            Self::NotEligible => write!(f, "not eligible"),
            Self::CoolingDown { remaining } => {
                write!(f, "cooling down ({}s left)", remaining.as_secs())
            }
        }
    }
}

/// Outcome of one gate evaluation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateDecision {
    Fire,
    Suppress(SuppressReason),
}

impl GateDecision {
    pub fn is_fire(&self) -> bool {
        matches!(self, Self::Fire)
    }
}

/// Metrics whose sustained critical state alone is enough to notify
///
/// Network is deliberately absent: a network-only critical condition is only
/// reported through a standout process.
fn dwell_eligible(trigger: Option<TriggerMetric>) -> bool {
    matches!(
        trigger,
        Some(TriggerMetric::Cpu | TriggerMetric::Memory | TriggerMetric::Disk)
    )
}

/// Stateful notification policy for one monitoring session
pub struct NotificationGate<P: PermissionProvider> {
    config: GateConfig,
    permission: P,
    dwell: DwellTracker,
    state: GateState,
}

impl<P: PermissionProvider> NotificationGate<P> {
    /// Create a gate with no history
    pub fn new(config: GateConfig, permission: P) -> Self {
        Self {
            config,
            permission,
            dwell: DwellTracker::new(),
            state: GateState::default(),
        }
    }

    /// Decide whether `snapshot` should produce a notification at `now`
    pub fn evaluate(
        &mut self,
        status: &ActivityStatus,
        snapshot: &MetricsSnapshot,
        now: SystemTime,
    ) -> GateDecision {
        let decision = self.decide(status, snapshot, now);
        match decision {
            GateDecision::Fire => log::info!("Notification gate fired for {}", status),
            GateDecision::Suppress(reason) => {
                log::debug!("Notification suppressed for {}: {}", status, reason)
            }
        }
        decision
    }

    /// Convenience wrapper returning only pass/suppress
    pub fn should_notify(
        &mut self,
        status: &ActivityStatus,
        snapshot: &MetricsSnapshot,
        now: SystemTime,
    ) -> bool {
        self.evaluate(status, snapshot, now).is_fire()
    }

    fn decide(
        &mut self,
        status: &ActivityStatus,
        snapshot: &MetricsSnapshot,
        now: SystemTime,
    ) -> GateDecision {
        let permission = self.permission.current_status();
        if !permission.allows_delivery() {
            return GateDecision::Suppress(SuppressReason::PermissionNotGranted(permission));
        }

        let has_standout_process = snapshot.has_standout_process();

        let sustained = if status.is_critical() {
            self.dwell
                .evaluate(status, snapshot, now, self.config.high_activity_duration)
        } else {
            self.dwell.reset();
            false
        };

        let critical_eligible = status.is_critical() && dwell_eligible(status.trigger()) && sustained;

        if !critical_eligible && !has_standout_process {
            return GateDecision::Suppress(SuppressReason::NotEligible);
        }

        if let Some(remaining) = self
            .state
            .cooldown_remaining(now, self.config.throttle_interval)
        {
            return GateDecision::Suppress(SuppressReason::CoolingDown { remaining });
        }

        self.state = self.state.fired(now);
        GateDecision::Fire
    }

    pub fn config(&self) -> &GateConfig {
        &self.config
    }

    pub fn state(&self) -> GateState {
        self.state
    }

    pub fn dwell_state(&self) -> DwellState {
        self.dwell.state()
    }

    pub fn permission(&self) -> &P {
        &self.permission
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alerts::SharedPermission;
    use crate::domain::{MetricSeverity, ProcessUsage};
    use crate::mock::at;
    use crate::status::classify;

    fn gate() -> NotificationGate<PermissionState> {
        NotificationGate::new(GateConfig::default(), PermissionState::Authorized)
    }

    fn critical(metric: TriggerMetric) -> MetricsSnapshot {
        MetricsSnapshot::live().with_reading(metric, MetricSeverity::Critical, 98.0)
    }

    fn with_standout(snapshot: MetricsSnapshot) -> MetricsSnapshot {
        snapshot.with_process(
            ProcessUsage::new(4321, "/usr/bin/ffmpeg", 180.0, 12.0)
                .with_trigger(TriggerMetric::Cpu),
        )
    }

    fn check<P: PermissionProvider>(
        gate: &mut NotificationGate<P>,
        snapshot: &MetricsSnapshot,
        secs: u64,
    ) -> GateDecision {
        gate.evaluate(&classify(snapshot), snapshot, at(secs))
    }

    #[test]
    fn test_sustained_cpu_fires_after_dwell() {
        let mut gate = gate();
        let snap = critical(TriggerMetric::Cpu);

        assert_eq!(
            check(&mut gate, &snap, 0),
            GateDecision::Suppress(SuppressReason::NotEligible)
        );
        assert!(!check(&mut gate, &snap, 119).is_fire());
        assert!(check(&mut gate, &snap, 120).is_fire());
        assert_eq!(gate.state().last_notified_at, Some(at(120)));
    }

    #[test]
    fn test_cooldown_boundary() {
        let mut gate = gate();
        let snap = with_standout(MetricsSnapshot::live());

        assert!(check(&mut gate, &snap, 0).is_fire());
        assert_eq!(
            check(&mut gate, &snap, 599),
            GateDecision::Suppress(SuppressReason::CoolingDown {
                remaining: Duration::from_secs(1)
            })
        );
        assert!(check(&mut gate, &snap, 600).is_fire());
    }

    #[test]
    fn test_suppressed_evaluation_does_not_touch_cooldown() {
        let mut gate = gate();
        let snap = with_standout(MetricsSnapshot::live());

        assert!(check(&mut gate, &snap, 0).is_fire());
        assert!(!check(&mut gate, &snap, 300).is_fire());
        assert_eq!(gate.state().last_notified_at, Some(at(0)));
    }

    #[test]
    fn test_standout_process_bypasses_dwell() {
        let mut gate = gate();
        let snap = with_standout(MetricsSnapshot::live().with_reading(
            TriggerMetric::Cpu,
            MetricSeverity::Elevated,
            70.0,
        ));

        assert!(check(&mut gate, &snap, 0).is_fire());
    }

    #[test]
    fn test_network_only_critical_never_fires_without_process() {
        let mut gate = gate();
        let snap = critical(TriggerMetric::Network);

        for secs in [0, 120, 600, 3_600] {
            assert_eq!(
                check(&mut gate, &snap, secs),
                GateDecision::Suppress(SuppressReason::NotEligible)
            );
        }
        // The episode is still tracked
        assert!(!gate.dwell_state().is_idle());
    }

    #[test]
    fn test_network_critical_with_process_fires() {
        let mut gate = gate();
        let snap = with_standout(critical(TriggerMetric::Network));
        assert!(check(&mut gate, &snap, 0).is_fire());
    }

    #[test]
    fn test_disk_and_memory_are_dwell_eligible() {
        for metric in [TriggerMetric::Memory, TriggerMetric::Disk] {
            let mut gate = gate();
            let snap = critical(metric);
            assert!(!check(&mut gate, &snap, 0).is_fire());
            assert!(check(&mut gate, &snap, 120).is_fire());
        }
    }

    #[test]
    fn test_permission_not_granted_suppresses() {
        for state in [PermissionState::Denied, PermissionState::NotDetermined] {
            let mut gate = NotificationGate::new(GateConfig::default(), state);
            let snap = with_standout(critical(TriggerMetric::Cpu));
            assert_eq!(
                check(&mut gate, &snap, 0),
                GateDecision::Suppress(SuppressReason::PermissionNotGranted(state))
            );
        }
    }

    #[test]
    fn test_provisional_permission_fires() {
        let mut gate = NotificationGate::new(GateConfig::default(), PermissionState::Provisional);
        let snap = with_standout(MetricsSnapshot::live());
        assert!(gate.should_notify(&classify(&snap), &snap, at(0)));
    }

    #[test]
    fn test_permission_refreshed_later() {
        let permission = SharedPermission::default();
        let mut gate = NotificationGate::new(GateConfig::default(), permission.clone());
        let snap = with_standout(MetricsSnapshot::live());

        assert!(!check(&mut gate, &snap, 0).is_fire());
        permission.set(PermissionState::Authorized);
        assert!(check(&mut gate, &snap, 1).is_fire());
    }

    #[test]
    fn test_non_critical_resets_dwell() {
        let mut gate = gate();
        let cpu = critical(TriggerMetric::Cpu);

        check(&mut gate, &cpu, 0);
        check(&mut gate, &MetricsSnapshot::live(), 60);
        assert!(gate.dwell_state().is_idle());
        assert!(!check(&mut gate, &cpu, 120).is_fire());
        assert!(check(&mut gate, &cpu, 240).is_fire());
    }

    #[test]
    fn test_custom_intervals() {
        let config = GateConfig {
            high_activity_duration: Duration::from_secs(10),
            throttle_interval: Duration::from_secs(30),
        };
        let mut gate = NotificationGate::new(config, PermissionState::Authorized);
        let snap = critical(TriggerMetric::Memory);

        assert!(!check(&mut gate, &snap, 0).is_fire());
        assert!(check(&mut gate, &snap, 10).is_fire());
        assert!(!check(&mut gate, &snap, 39).is_fire());
        assert!(check(&mut gate, &snap, 40).is_fire());
    }

    #[test]
    fn test_zero_throttle_disables_cooldown() {
        let state = GateState::default().fired(at(100));
        assert_eq!(state.cooldown_remaining(at(100), Duration::ZERO), None);
        assert_eq!(
            state.cooldown_remaining(at(100), Duration::from_secs(5)),
            Some(Duration::from_secs(5))
        );
    }
}
