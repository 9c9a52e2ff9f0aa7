//! CLI argument definitions using clap derive
//!
//! Defines all command-line arguments and subcommands.

use crate::alerts::PermissionState;
use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::Shell;
use std::path::PathBuf;

/// Host resource monitor
///
/// Classify system activity snapshots, narrate them, and replay recorded sessions
/// through the notification gate.
#[derive(Parser, Debug)]
#[command(name = "hostwatch")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output format
    #[arg(long, global = true, value_enum, default_value = "table")]
    pub format: OutputFormat,

    /// Path to configuration file
    #[arg(short, long, global = true, env = "HOSTWATCH_CONFIG")]
    pub config: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Classify one snapshot and print its status
    Status(StatusArgs),

    /// Replay recorded snapshots through the notification gate
    Replay(ReplayArgs),

    /// Act on a response to a delivered notification
    Respond(RespondArgs),

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Arguments for the status command
#[derive(Parser, Debug)]
pub struct StatusArgs {
    /// Snapshot JSON file ("-" reads stdin)
    pub snapshot: PathBuf,
}

/// Arguments for the replay command
#[derive(Parser, Debug)]
pub struct ReplayArgs {
    /// JSON lines file, one {"at": SECS, "snapshot": {...}} per line ("-" reads stdin)
    pub file: PathBuf,

    /// Seconds a critical condition must persist before notifying
    #[arg(long)]
    pub dwell_secs: Option<u64>,

    /// Minimum seconds between notifications
    #[arg(long)]
    pub throttle_secs: Option<u64>,

    /// Notification permission to assume
    #[arg(long, value_enum)]
    pub permission: Option<PermissionArg>,
}

/// Arguments for the respond command
#[derive(Parser, Debug)]
pub struct RespondArgs {
    /// Action identifier ("reveal", "terminate"; anything else reveals)
    pub action: String,

    /// Notification metadata JSON file ("-" reads stdin)
    pub user_info: PathBuf,
}

/// Notification permission argument
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum PermissionArg {
    /// Not yet asked
    NotDetermined,
    /// Refused by the user
    Denied,
    /// Granted
    Authorized,
    /// Granted for quiet delivery
    Provisional,
}

impl From<PermissionArg> for PermissionState {
    fn from(arg: PermissionArg) -> Self {
        match arg {
            PermissionArg::NotDetermined => PermissionState::NotDetermined,
            PermissionArg::Denied => PermissionState::Denied,
            PermissionArg::Authorized => PermissionState::Authorized,
            PermissionArg::Provisional => PermissionState::Provisional,
        }
    }
}

/// Output format
#[derive(ValueEnum, Debug, Clone, Copy, Default)]
pub enum OutputFormat {
    /// Human-readable table format
    #[default]
    Table,
    /// JSON format for machine parsing
    Json,
    /// Compact single-line format
    Compact,
}

/// Generate shell completions and print to stdout
pub fn generate_completions(shell: Shell) {
    let mut cmd = Cli::command();
    let name = cmd.get_name().to_string();
    clap_complete::generate(shell, &mut cmd, name, &mut std::io::stdout());
}
