//! Status command implementation
//!
//! Classifies one snapshot and prints its narrated status.

use super::read_input;
use crate::cli::args::{OutputFormat, StatusArgs};
use crate::cli::output::{print_output, StatusReport};
use crate::domain::MetricsSnapshot;
use crate::error::Result;
use crate::status::classify;

/// Execute the status command
pub fn run_status(args: &StatusArgs, format: OutputFormat) -> Result<()> {
    let content = read_input(&args.snapshot)?;
    let snapshot: MetricsSnapshot = serde_json::from_str(&content)?;

    let status = classify(&snapshot);
    log::debug!("Classified snapshot as {}", status);

    print_output(&StatusReport::new(&status, &snapshot), format)?;
    Ok(())
}
