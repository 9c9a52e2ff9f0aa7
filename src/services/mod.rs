//! Service layer
//!
//! Wires the status engine and alerting into a monitoring session and provides the
//! collaborators the command-line front end needs.

pub mod process_control;
pub mod session;
pub mod source;

pub use process_control::SystemProcessControl;
pub use session::{MonitorSession, SessionStats};
pub use source::{JsonLinesSource, SnapshotSource, TimedSnapshot};
