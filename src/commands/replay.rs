//! Replay command implementation
//!
//! Drives a recorded session through the notification gate. Notifications are
//! written to stderr; the summary goes to stdout.

use crate::alerts::{NotificationManager, TerminalNotifier};
use crate::cli::args::{OutputFormat, ReplayArgs};
use crate::cli::output::{print_output, ReplaySummary};
use crate::config::Config;
use crate::error::Result;
use crate::services::{JsonLinesSource, MonitorSession, SystemProcessControl};
use std::path::Path;

/// Execute the replay command
pub fn run_replay(args: &ReplayArgs, config: &Config, format: OutputFormat) -> Result<()> {
    let mut notifiers = NotificationManager::new();
    if config.general.no_color {
        notifiers.add_notifier(Box::new(TerminalNotifier::no_color()));
    } else {
        notifiers.add_notifier(Box::new(TerminalNotifier::new()));
    }

    log::debug!(
        "Replaying with dwell {}s, throttle {}s, permission {}",
        config.alerts.high_activity_duration_secs,
        config.alerts.throttle_interval_secs,
        config.alerts.permission
    );

    let mut session = MonitorSession::new(
        &config.alerts,
        config.alerts.permission,
        SystemProcessControl::new(),
        Box::new(notifiers),
    );

    let payloads = if args.file == Path::new("-") {
        session.run(&mut JsonLinesSource::new(std::io::stdin().lock()))?
    } else {
        session.run(&mut JsonLinesSource::open(&args.file)?)?
    };

    print_output(&ReplaySummary::new(session.stats(), &payloads), format)?;
    Ok(())
}
