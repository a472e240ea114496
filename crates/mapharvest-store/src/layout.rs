//! Where a batch run puts its files.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use chrono::{DateTime, Local};
use mapharvest_core::Category;
use regex::Regex;

use crate::StoreError;

static UNSAFE_CHARS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^\w\s-]").expect("unsafe-char regex is valid"));

const PROGRESS_FILE: &str = "progress.json";
const SUMMARY_FILE: &str = "SUMMARY_REPORT.txt";
const LOG_FILE: &str = "scraping_log.txt";
const TEST_DIR: &str = "test_results";

/// Turns a keyword into a file stem: characters other than word characters,
/// whitespace and `-` are dropped, then spaces become `_`.
///
/// `"snacks shop / tirur"` becomes `"snacks_shop__tirur"`.
#[must_use]
pub fn safe_keyword(keyword: &str) -> String {
    UNSAFE_CHARS
        .replace_all(keyword, "")
        .replace([' ', '/'], "_")
}

/// A timestamped run directory with one subdirectory per category.
#[derive(Debug, Clone)]
pub struct RunLayout {
    root: PathBuf,
}

impl RunLayout {
    /// Creates `<base>/run_<YYYYmmdd_HHMMSS>/` and its category directories.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Io`] if any directory cannot be created.
    pub fn create(base: &Path, started: DateTime<Local>) -> Result<Self, StoreError> {
        let root = base.join(format!("run_{}", started.format("%Y%m%d_%H%M%S")));
        for category in Category::ALL {
            let dir = root.join(category.as_str());
            fs::create_dir_all(&dir).map_err(|e| StoreError::io(&dir, e))?;
        }
        tracing::info!(path = %root.display(), "created run directory");
        Ok(Self { root })
    }

    /// Wraps an existing run directory, e.g. when resuming.
    #[must_use]
    pub fn existing(root: PathBuf) -> Self {
        Self { root }
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    #[must_use]
    pub fn keyword_file(&self, category: Category, keyword: &str) -> PathBuf {
        self.root
            .join(category.as_str())
            .join(format!("{}.csv", safe_keyword(keyword)))
    }

    /// The per-category file every keyword's records are merged into.
    #[must_use]
    pub fn master_file(&self, category: Category) -> PathBuf {
        self.root
            .join(category.as_str())
            .join(format!("{}_all.csv", category.as_str()))
    }

    #[must_use]
    pub fn progress_file(&self) -> PathBuf {
        self.root.join(PROGRESS_FILE)
    }

    #[must_use]
    pub fn summary_file(&self) -> PathBuf {
        self.root.join(SUMMARY_FILE)
    }

    #[must_use]
    pub fn log_file(&self) -> PathBuf {
        self.root.join(LOG_FILE)
    }
}

/// Output path for single-keyword test mode.
#[must_use]
pub fn test_file(base: &Path, keyword: &str) -> PathBuf {
    base.join(TEST_DIR)
        .join(format!("test_{}.csv", safe_keyword(keyword)))
}
