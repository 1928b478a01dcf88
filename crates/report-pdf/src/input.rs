//! CSV entry loading
//!
//! Column order is `location, observations, photo, timestamp` with a header
//! row. The photo cell holds a file path or a `data:` URI; photo and
//! timestamp may be empty or missing entirely, so short records are allowed.

use std::path::Path;

use crate::types::{ImageRef, ReportEntry, ReportError, Result};

pub async fn load_entries_from_csv(path: impl AsRef<Path>) -> Result<Vec<ReportEntry>> {
    let contents = tokio::fs::read_to_string(path.as_ref()).await?;

    let entries = tokio::task::spawn_blocking(move || {
        let mut reader = csv::ReaderBuilder::new()
            .flexible(true)
            .from_reader(contents.as_bytes());
        let mut entries = Vec::new();

        for result in reader.records() {
            let record = result?;
            if record.len() < 2 {
                continue;
            }
            entries.push(ReportEntry {
                location: record[0].to_string(),
                observations: record[1].to_string(),
                photo: record
                    .get(2)
                    .filter(|cell| !cell.is_empty())
                    .map(ImageRef::parse),
                timestamp: record
                    .get(3)
                    .filter(|cell| !cell.is_empty())
                    .map(str::to_string),
            });
        }
        Ok::<_, ReportError>(entries)
    })
    .await??;

    Ok(entries)
}
