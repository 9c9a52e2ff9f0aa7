//! Snapshot sources
//!
//! Feeds timestamped snapshots into a monitoring session. Sampling itself happens
//! elsewhere; this module only reads what a sampler recorded.

use crate::domain::MetricsSnapshot;
use crate::error::{AppError, Result};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

/// A snapshot and the second at which it was taken
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimedSnapshot {
    /// Seconds since the Unix epoch (or any fixed session origin)
    pub at: u64,
    pub snapshot: MetricsSnapshot,
}

impl TimedSnapshot {
    pub fn new(at: u64, snapshot: MetricsSnapshot) -> Self {
        Self { at, snapshot }
    }

    pub fn timestamp(&self) -> SystemTime {
        UNIX_EPOCH + Duration::from_secs(self.at)
    }
}

/// Anything that yields snapshots in time order
pub trait SnapshotSource {
    /// Next snapshot, or `None` when the source is exhausted
    fn next_snapshot(&mut self) -> Result<Option<TimedSnapshot>>;
}

/// Reads one JSON-encoded [`TimedSnapshot`] per line
///
/// Blank lines are skipped. Timestamps must not decrease.
pub struct JsonLinesSource<R: BufRead> {
    lines: io::Lines<R>,
    line: usize,
    last_at: Option<u64>,
}

impl<R: BufRead> JsonLinesSource<R> {
    pub fn new(reader: R) -> Self {
        Self {
            lines: reader.lines(),
            line: 0,
            last_at: None,
        }
    }
}

impl JsonLinesSource<BufReader<File>> {
    /// Open a JSON lines file
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(path.as_ref())?;
        Ok(Self::new(BufReader::new(file)))
    }
}

impl<R: BufRead> SnapshotSource for JsonLinesSource<R> {
    fn next_snapshot(&mut self) -> Result<Option<TimedSnapshot>> {
        for line in self.lines.by_ref() {
            self.line += 1;
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }

            let timed: TimedSnapshot =
                serde_json::from_str(&line).map_err(|e| AppError::InvalidSnapshot {
                    line: self.line,
                    message: e.to_string(),
                })?;

            if let Some(last) = self.last_at {
                if timed.at < last {
                    return Err(AppError::InvalidSnapshot {
                        line: self.line,
                        message: format!("timestamp {} is earlier than {}", timed.at, last),
                    });
                }
            }
            self.last_at = Some(timed.at);

            return Ok(Some(timed));
        }

        Ok(None)
    }
}
