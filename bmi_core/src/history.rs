//! Session-scoped calculation history.
//!
//! The store is append-only: entries are never edited or removed one by
//! one, only cleared as a whole. Nothing is written to disk; `write_csv`
//! exports the current table on request.

use crate::{HistoryEntry, Result};
use std::io::Write;

/// A row in the CSV export
#[derive(Debug, serde::Serialize)]
struct CsvRow {
    #[serde(rename = "BMI")]
    bmi: String,
    #[serde(rename = "Category")]
    category: &'static str,
    #[serde(rename = "Recorded At")]
    recorded_at: String,
}

impl From<&HistoryEntry> for CsvRow {
    fn from(entry: &HistoryEntry) -> Self {
        CsvRow {
            bmi: format!("{:.1}", entry.bmi),
            category: entry.category.label(),
            recorded_at: entry.recorded_at.to_rfc3339(),
        }
    }
}

/// Ordered list of past calculations for one session
#[derive(Clone, Debug, Default)]
pub struct HistoryStore {
    entries: Vec<HistoryEntry>,
}

impl HistoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an entry at the end
    pub fn append(&mut self, entry: HistoryEntry) {
        tracing::debug!(
            bmi = entry.bmi,
            category = %entry.category,
            position = self.entries.len(),
            "Appended history entry"
        );
        self.entries.push(entry);
    }

    /// Remove every entry
    pub fn clear(&mut self) {
        tracing::debug!(removed = self.entries.len(), "Cleared history");
        self.entries.clear();
    }

    /// The most recently appended entry, if any
    pub fn latest(&self) -> Option<&HistoryEntry> {
        self.entries.last()
    }

    /// All entries, oldest first
    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Export the history table as CSV (header row included)
    ///
    /// Returns the number of rows written.
    pub fn write_csv<W: Write>(&self, writer: W) -> Result<usize> {
        let mut csv_writer = csv::WriterBuilder::new()
            .has_headers(true)
            .from_writer(writer);

        if self.entries.is_empty() {
            csv_writer.write_record(["BMI", "Category", "Recorded At"])?;
        }
        for entry in &self.entries {
            csv_writer.serialize(CsvRow::from(entry))?;
        }
        csv_writer.flush()?;

        tracing::info!("Exported {} history entries to CSV", self.entries.len());
        Ok(self.entries.len())
    }
}
