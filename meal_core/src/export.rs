//! CSV export of the progress ledger.
//!
//! The export is written to a temp file in the target directory, fsynced,
//! then renamed over the destination so readers never see a half-written file.

use crate::{Error, ProgressEntry, Result};
use std::path::Path;
use tempfile::NamedTempFile;

/// A row in the CSV output
#[derive(Debug, serde::Serialize)]
struct CsvRow {
    date: String,
    weight_kg: f64,
    bmi: f64,
}

impl From<&ProgressEntry> for CsvRow {
    fn from(entry: &ProgressEntry) -> Self {
        CsvRow {
            date: entry.date.format("%Y-%m-%d").to_string(),
            weight_kg: entry.weight_kg,
            bmi: entry.bmi,
        }
    }
}

/// Write entries to `csv_path` in the order given
///
/// Returns the number of rows written. An empty slice still produces a
/// header-only file.
pub fn export_csv(entries: &[ProgressEntry], csv_path: &Path) -> Result<usize> {
    let parent = match csv_path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    std::fs::create_dir_all(parent)?;

    let temp = NamedTempFile::new_in(parent)?;

    {
        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(temp.as_file());
        writer.write_record(["date", "weight_kg", "bmi"])?;
        for entry in entries {
            writer.serialize(CsvRow::from(entry))?;
        }
        writer.flush()?;
    }

    temp.as_file().sync_all()?;
    temp.persist(csv_path).map_err(|e| Error::Io(e.error))?;

    tracing::info!("Exported {} entries to {:?}", entries.len(), csv_path);
    Ok(entries.len())
}
