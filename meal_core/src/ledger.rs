//! Append-only progress ledger.
//!
//! The ledger owns an ordered list of weigh-ins for one session. Entries are
//! kept in insertion order; nothing here sorts by date. An optional
//! [`EntrySink`] receives each entry before it becomes visible in memory.

use crate::metrics::{compute_bmi, WEIGHT_RANGE_KG};
use crate::wal::{read_entries, EntrySink, JsonlSink};
use crate::{Error, ProgressEntry, Result, TimeSeries};
use chrono::NaiveDate;
use std::path::Path;

/// Round to one decimal place from the exact binary value, ties to even
fn round_one_decimal(value: f64) -> Result<f64> {
    format!("{:.1}", value)
        .parse::<f64>()
        .map_err(|e| Error::Other(format!("Failed to round BMI {}: {}", value, e)))
}

impl ProgressEntry {
    /// Build an entry, deriving BMI from `height_cm`
    ///
    /// Height is used only for the BMI and is not kept on the entry.
    pub fn new(date: NaiveDate, weight_kg: f64, height_cm: f64) -> Result<Self> {
        if !WEIGHT_RANGE_KG.contains(&weight_kg) {
            return Err(Error::invalid(format!(
                "weight {} kg is outside {}..={} kg",
                weight_kg,
                WEIGHT_RANGE_KG.start(),
                WEIGHT_RANGE_KG.end()
            )));
        }
        let bmi = compute_bmi(weight_kg, height_cm)?;
        Ok(Self {
            date,
            weight_kg,
            bmi: round_one_decimal(bmi)?,
        })
    }
}

/// Session-owned, append-only sequence of progress entries
#[derive(Default)]
pub struct ProgressLedger {
    entries: Vec<ProgressEntry>,
    sink: Option<Box<dyn EntrySink>>,
}

impl std::fmt::Debug for ProgressLedger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProgressLedger")
            .field("entries", &self.entries)
            .field("persistent", &self.sink.is_some())
            .finish()
    }
}

impl ProgressLedger {
    /// Empty, in-memory ledger
    pub fn new() -> Self {
        Self::default()
    }

    /// Empty ledger that forwards every append to `sink`
    pub fn with_sink(sink: Box<dyn EntrySink>) -> Self {
        Self {
            entries: Vec::new(),
            sink: Some(sink),
        }
    }

    /// Replay a JSONL log and keep appending to it
    pub fn open(path: &Path) -> Result<Self> {
        let entries = read_entries(path)?;
        tracing::info!("Loaded {} progress entries from {:?}", entries.len(), path);
        Ok(Self {
            entries,
            sink: Some(Box::new(JsonlSink::new(path))),
        })
    }

    /// Record a weigh-in
    ///
    /// Fails with [`Error::InvalidInput`] before any state changes if the
    /// weight or height is out of domain. With a sink attached, the entry is
    /// only added in memory once the sink has accepted it.
    pub fn append(
        &mut self,
        date: NaiveDate,
        weight_kg: f64,
        height_cm: f64,
    ) -> Result<&ProgressEntry> {
        let entry = ProgressEntry::new(date, weight_kg, height_cm)?;

        if let Some(sink) = self.sink.as_mut() {
            sink.append(&entry)?;
        }

        tracing::debug!(
            "Ledger append #{}: {} {} kg (BMI {})",
            self.entries.len() + 1,
            entry.date,
            entry.weight_kg,
            entry.bmi
        );
        self.entries.push(entry);
        Ok(&self.entries[self.entries.len() - 1])
    }

    /// Read-only view in insertion order
    pub fn snapshot(&self) -> &[ProgressEntry] {
        &self.entries
    }

    /// Weight and BMI series over the same date axis, in insertion order
    pub fn as_time_series(&self) -> TimeSeries {
        TimeSeries {
            weight: self.entries.iter().map(|e| (e.date, e.weight_kg)).collect(),
            bmi: self.entries.iter().map(|e| (e.date, e.bmi)).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Most recently appended entry
    pub fn latest(&self) -> Option<&ProgressEntry> {
        self.entries.last()
    }
}
