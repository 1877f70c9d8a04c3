//! CSV journal source.
//!
//! Each journal row is two cells: a timestamp and an event label. The
//! header row is skipped, rows with an empty label cell are dropped
//! before construction, and rows without a usable timestamp are skipped
//! silently (counted at debug level). Any other construction failure
//! means the source is structurally broken and aborts the run.

use std::path::Path;

use anyhow::{Context, Result};
use csv::StringRecord;

use pt_core::{Cell, EventRow, RowError};

/// Loads and validates all usable rows from the journal.
pub fn load_rows(path: &Path) -> Result<Vec<EventRow>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_path(path)
        .with_context(|| format!("failed to open journal {}", path.display()))?;

    let mut rows = Vec::new();
    let mut skipped = 0_usize;
    for (index, record) in reader.records().enumerate() {
        // Row numbers are 1-based and the header is row 1.
        let row_number = index + 2;
        let record =
            record.with_context(|| format!("failed to read journal row {row_number}"))?;

        let label = cell(&record, 1);
        if label == Cell::Empty {
            continue;
        }

        match EventRow::from_cells(&cell(&record, 0), &label) {
            Ok(row) => rows.push(row),
            Err(RowError::MissingTimestamp) => skipped += 1,
            Err(err) => {
                return Err(anyhow::Error::new(err)
                    .context(format!("journal row {row_number} is corrupt")));
            }
        }
    }

    if skipped > 0 {
        tracing::debug!(skipped, "rows without a usable timestamp");
    }
    Ok(rows)
}

fn cell(record: &StringRecord, index: usize) -> Cell {
    match record.get(index) {
        None => Cell::Empty,
        Some(text) if text.trim().is_empty() => Cell::Empty,
        Some(text) => Cell::Text(text.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn journal(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{contents}").unwrap();
        file
    }

    #[test]
    fn header_row_is_skipped() {
        let file = journal("date,event\n2025-01-01T08:00:00Z,coffee\n");
        let rows = load_rows(file.path()).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].label, "coffee");
    }

    #[test]
    fn rows_without_label_are_dropped() {
        let file = journal("date,event\n2025-01-01T08:00:00Z,\n2025-01-01T09:00:00Z\n");
        let rows = load_rows(file.path()).unwrap();
        assert!(rows.is_empty());
    }

    #[test]
    fn rows_without_timestamp_are_skipped() {
        let file = journal("date,event\n,coffee\nnot a date,sushi\n2025-01-01T08:00:00Z,tea\n");
        let rows = load_rows(file.path()).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].label, "tea");
    }

    #[test]
    fn missing_file_is_fatal() {
        let err = load_rows(Path::new("/nonexistent/journal.csv")).unwrap_err();
        assert!(err.to_string().contains("failed to open journal"));
    }
}
