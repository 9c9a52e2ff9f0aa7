//! Respond command implementation
//!
//! Feeds a notification response (action identifier plus echoed metadata) back
//! through the dispatcher.

use super::read_input;
use crate::alerts::{ActionResponse, NotificationAction, NotificationDispatcher};
use crate::cli::args::{OutputFormat, RespondArgs};
use crate::cli::output::{print_output, Message};
use crate::config::Config;
use crate::error::Result;
use crate::services::SystemProcessControl;
use serde_json::{Map, Value};

/// Execute the respond command
pub fn run_respond(args: &RespondArgs, config: &Config, format: OutputFormat) -> Result<()> {
    let content = read_input(&args.user_info)?;
    let user_info: Map<String, Value> = serde_json::from_str(&content)?;
    let response = ActionResponse::new(args.action.clone(), user_info);

    let dispatcher = NotificationDispatcher::new(
        SystemProcessControl::new(),
        config.alerts.to_gate_config().high_activity_duration,
    );

    let message = match dispatcher.try_route(&response) {
        Ok(Some(NotificationAction::Reveal)) => Message {
            message: "Revealed process".to_string(),
            success: true,
        },
        Ok(Some(NotificationAction::Terminate)) => Message {
            message: "Sent termination request".to_string(),
            success: true,
        },
        Ok(None) => Message {
            message: "Response carries no process identity; nothing to do".to_string(),
            success: false,
        },
        Err((action, e)) => {
            log::warn!("{} failed: {}", action.title(), e);
            Message {
                message: format!("{} failed: {}", action.title(), e),
                success: false,
            }
        }
    };

    print_output(&message, format)?;
    Ok(())
}
