//! `progress.json` checkpointing.

use std::fs;
use std::path::Path;

use mapharvest_core::ScrapeProgress;

use crate::StoreError;

/// Writes `progress` as pretty JSON, replacing the file atomically.
///
/// # Errors
///
/// Returns [`StoreError`] if serialization or any filesystem step fails.
pub fn save_progress(path: &Path, progress: &ScrapeProgress) -> Result<(), StoreError> {
    let json = serde_json::to_string_pretty(progress).map_err(|source| StoreError::Json {
        path: path.to_path_buf(),
        source,
    })?;
    let tmp = path.with_extension("json.tmp");
    fs::write(&tmp, json).map_err(|e| StoreError::io(&tmp, e))?;
    fs::rename(&tmp, path).map_err(|e| StoreError::io(path, e))?;
    Ok(())
}

/// Loads a checkpoint; `Ok(None)` when the file does not exist.
///
/// # Errors
///
/// Returns [`StoreError`] if the file exists but cannot be read or parsed.
pub fn load_progress(path: &Path) -> Result<Option<ScrapeProgress>, StoreError> {
    let raw = match fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(StoreError::io(path, e)),
    };
    serde_json::from_str(&raw)
        .map(Some)
        .map_err(|source| StoreError::Json {
            path: path.to_path_buf(),
            source,
        })
}

#[cfg(test)]
mod tests {
    use mapharvest_core::Category;

    use super::*;

    #[test]
    fn saved_progress_loads_back() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("progress.json");
        let mut progress = ScrapeProgress::new(5, 0);
        progress.record_completed(0, "bakery tirur", Category::FoodBusinesses, 7);
        progress.record_failed("hotel tirur");

        save_progress(&path, &progress).unwrap();
        let loaded = load_progress(&path).unwrap().unwrap();

        assert_eq!(loaded, progress);
        assert!(!path.with_extension("json.tmp").exists());
    }

    #[test]
    fn missing_file_is_none() {
        let tmp = tempfile::tempdir().unwrap();
        assert!(load_progress(&tmp.path().join("progress.json")).unwrap().is_none());
    }

    #[test]
    fn garbage_file_is_an_error() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("progress.json");
        fs::write(&path, "{not json").unwrap();
        assert!(matches!(load_progress(&path), Err(StoreError::Json { .. })));
    }
}
