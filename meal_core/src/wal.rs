//! On-disk progress log.
//!
//! One JSON object per line, in append order. Writers hold an exclusive
//! `fs2` lock for the duration of a single line; readers take a shared lock.

use crate::{ProgressEntry, Result};
use fs2::FileExt;
use std::fs::{File, OpenOptions};
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};

/// Destination for entries accepted by a [`crate::ProgressLedger`]
pub trait EntrySink {
    fn append(&mut self, entry: &ProgressEntry) -> Result<()>;
}

/// Appends entries to a JSON-lines file
#[derive(Debug, Clone)]
pub struct JsonlSink {
    path: PathBuf,
}

impl JsonlSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Open the log for appending, creating it and its directory on first use
    fn open_for_append(&self) -> Result<File> {
        if let Some(dir) = self.path.parent() {
            std::fs::create_dir_all(dir)?;
        }
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        Ok(file)
    }
}

impl EntrySink for JsonlSink {
    fn append(&mut self, entry: &ProgressEntry) -> Result<()> {
        // Whole line is built up front and written with one call under the lock
        let mut line = serde_json::to_vec(entry)?;
        line.push(b'\n');

        let mut file = self.open_for_append()?;
        file.lock_exclusive()?;
        let written = file.write_all(&line);
        file.unlock()?;
        written?;

        tracing::debug!("Logged {} ({} kg) to {:?}", entry.date, entry.weight_kg, self.path);
        Ok(())
    }
}

/// Parse one log line; blank lines are `None`
fn parse_line(line_no: usize, line: &str) -> Option<ProgressEntry> {
    if line.trim().is_empty() {
        return None;
    }
    serde_json::from_str(line)
        .map_err(|e| tracing::warn!("Skipping unreadable progress line {}: {}", line_no, e))
        .ok()
}

/// Every readable entry in the log, in file order
///
/// A missing log reads as empty.
pub fn read_entries(path: &Path) -> Result<Vec<ProgressEntry>> {
    let file = match File::open(path) {
        Ok(file) => file,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
        Err(e) => return Err(e.into()),
    };

    file.lock_shared()?;
    let lines: std::io::Result<Vec<String>> = BufReader::new(&file).lines().collect();
    file.unlock()?;

    let entries: Vec<_> = lines?
        .iter()
        .enumerate()
        .filter_map(|(idx, line)| parse_line(idx + 1, line))
        .collect();

    tracing::debug!("Read {} entries from {:?}", entries.len(), path);
    Ok(entries)
}
