//! CSV persistence for extracted records.

use std::collections::HashSet;
use std::fs;
use std::io::Write;
use std::path::Path;

use mapharvest_core::PlaceRecord;

use crate::StoreError;

/// How [`append_or_merge`] treats an existing file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteMode {
    /// Replace the file with exactly `records`.
    Overwrite,
    /// Merge `records` after the rows already in the file, dropping later
    /// rows whose [`PlaceRecord::merge_key`] was already seen, and write the
    /// merged set back.
    AppendMerge,
}

/// Writes `records` to `path` and returns the number of rows written.
///
/// An empty `records` slice leaves the file untouched and returns `Ok(0)`.
/// In [`WriteMode::AppendMerge`], an existing file that cannot be read in
/// full is never rewritten: `records` are appended after its current
/// contents without merging.
///
/// # Errors
///
/// Returns [`StoreError`] if the parent directory cannot be created or the
/// file cannot be written.
pub fn append_or_merge(
    records: &[PlaceRecord],
    path: &Path,
    mode: WriteMode,
) -> Result<usize, StoreError> {
    if records.is_empty() {
        tracing::warn!(path = %path.display(), "no records to save");
        return Ok(0);
    }
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| StoreError::io(parent, e))?;
    }

    let rows = match mode {
        WriteMode::Overwrite => write_all(path, records.iter())?,
        WriteMode::AppendMerge if path.is_file() => match read_all_rows(path) {
            Ok(existing) => merge_into(path, &existing, records)?,
            Err(e) => {
                tracing::warn!(
                    path = %path.display(),
                    error = %e,
                    "existing file not fully readable; appending without merge"
                );
                append_rows(path, records)?
            }
        },
        WriteMode::AppendMerge => write_all(path, records.iter())?,
    };
    tracing::info!(path = %path.display(), rows, "saved records");
    Ok(rows)
}

/// Reads every row of a CSV written by [`append_or_merge`].
///
/// Rows that do not deserialize are skipped with a warning.
///
/// # Errors
///
/// Returns [`StoreError::Csv`] if the file cannot be opened.
pub fn read_records(path: &Path) -> Result<Vec<PlaceRecord>, StoreError> {
    let mut reader = csv::Reader::from_path(path).map_err(|source| StoreError::Csv {
        path: path.to_path_buf(),
        source,
    })?;
    let mut records = Vec::new();
    for (row, result) in reader.deserialize::<PlaceRecord>().enumerate() {
        match result {
            Ok(record) => records.push(record),
            Err(e) => {
                tracing::warn!(path = %path.display(), row = row + 1, error = %e, "skipping malformed row");
            }
        }
    }
    Ok(records)
}

fn merge_into(
    path: &Path,
    existing: &[PlaceRecord],
    records: &[PlaceRecord],
) -> Result<usize, StoreError> {
    let before = existing.len() + records.len();
    let mut seen = HashSet::new();
    let merged: Vec<&PlaceRecord> = existing
        .iter()
        .chain(records)
        .filter(|r| seen.insert(r.merge_key()))
        .collect();
    let dropped = before - merged.len();
    if dropped > 0 {
        tracing::info!(path = %path.display(), dropped, "merged away duplicate rows");
    }
    write_all(path, merged.into_iter())
}

/// Like [`read_records`], but the first malformed row is an error.
fn read_all_rows(path: &Path) -> Result<Vec<PlaceRecord>, StoreError> {
    let csv_err = |source| StoreError::Csv {
        path: path.to_path_buf(),
        source,
    };
    csv::Reader::from_path(path)
        .map_err(csv_err)?
        .deserialize::<PlaceRecord>()
        .collect::<Result<Vec<_>, _>>()
        .map_err(csv_err)
}

fn write_all<'a>(
    path: &Path,
    records: impl Iterator<Item = &'a PlaceRecord>,
) -> Result<usize, StoreError> {
    let csv_err = |source| StoreError::Csv {
        path: path.to_path_buf(),
        source,
    };
    let mut writer = csv::Writer::from_path(path).map_err(csv_err)?;
    let mut rows = 0;
    for record in records {
        writer.serialize(record).map_err(csv_err)?;
        rows += 1;
    }
    writer.flush().map_err(|e| StoreError::io(path, e))?;
    Ok(rows)
}

/// Appends headerless rows to the end of an existing file.
fn append_rows(path: &Path, records: &[PlaceRecord]) -> Result<usize, StoreError> {
    let csv_err = |source| StoreError::Csv {
        path: path.to_path_buf(),
        source,
    };
    let mut file = fs::OpenOptions::new()
        .append(true)
        .open(path)
        .map_err(|e| StoreError::io(path, e))?;
    if !ends_with_newline(path)? {
        file.write_all(b"\n").map_err(|e| StoreError::io(path, e))?;
    }
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(file);
    for record in records {
        writer.serialize(record).map_err(csv_err)?;
    }
    writer.flush().map_err(|e| StoreError::io(path, e))?;
    Ok(records.len())
}

fn ends_with_newline(path: &Path) -> Result<bool, StoreError> {
    let bytes = fs::read(path).map_err(|e| StoreError::io(path, e))?;
    Ok(bytes.last().is_none_or(|b| *b == b'\n'))
}
