//! Status derivation and narration
//!
//! - [`classifier`]: four per-metric severities to one prioritized status
//! - [`narrator`]: titles, messages and summaries for a snapshot
//! - [`format`]: metric value formatting
//!
//! Everything here is pure and may be called from any thread.

pub mod classifier;
pub mod format;
pub mod narrator;

pub use classifier::classify;
pub use format::{format_percent, format_rate, format_value};
pub use narrator::StatusNarrator;
