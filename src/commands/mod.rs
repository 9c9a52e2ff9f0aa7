//! Command handlers
//!
//! Each command handler orchestrates the execution of a CLI command.

pub mod replay;
pub mod respond;
pub mod status;

pub use replay::run_replay;
pub use respond::run_respond;
pub use status::run_status;

use crate::error::Result;
use std::io::Read;
use std::path::Path;

/// Read a whole input file; `-` reads stdin
pub(crate) fn read_input(path: &Path) -> Result<String> {
    if path == Path::new("-") {
        let mut content = String::new();
        std::io::stdin().read_to_string(&mut content)?;
        return Ok(content);
    }
    Ok(std::fs::read_to_string(path)?)
}
