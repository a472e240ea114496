//! The human-readable `SUMMARY_REPORT.txt` written when a batch ends.

use std::fmt::Write as _;
use std::fs;
use std::path::Path;

use mapharvest_core::ScrapeProgress;

use crate::StoreError;

#[must_use]
pub fn render_summary(progress: &ScrapeProgress) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "BUSINESS LISTING SCRAPE SUMMARY");
    let _ = writeln!(out, "{}", "=".repeat(60));
    let _ = writeln!(out);
    let _ = writeln!(
        out,
        "Started: {}",
        progress.start_time.format("%Y-%m-%d %H:%M:%S UTC")
    );
    if let Some(end) = progress.end_time {
        let _ = writeln!(out, "Finished: {}", end.format("%Y-%m-%d %H:%M:%S UTC"));
    }
    if progress.interrupted {
        let _ = writeln!(
            out,
            "Interrupted: yes (resume from keyword index {})",
            progress.resume_index()
        );
    }
    let _ = writeln!(out);
    let _ = writeln!(
        out,
        "Total Keywords Processed: {}/{}",
        progress.completed, progress.total_keywords
    );
    let _ = writeln!(out, "Total Places Found: {}", progress.total_places);
    let _ = writeln!(out, "Failed Keywords: {}", progress.failed);
    let _ = writeln!(out);
    let _ = writeln!(out, "RESULTS BY CATEGORY:");
    let _ = writeln!(out, "{}", "-".repeat(30));
    if progress.categories.is_empty() {
        let _ = writeln!(out, "(none)");
    }
    for (category, count) in &progress.categories {
        let _ = writeln!(out, "{category}: {count} places");
    }
    if !progress.failed_keywords.is_empty() {
        let _ = writeln!(out);
        let _ = writeln!(out, "FAILED KEYWORDS:");
        let _ = writeln!(out, "{}", "-".repeat(20));
        for keyword in &progress.failed_keywords {
            let _ = writeln!(out, "- {keyword}");
        }
    }
    out
}

/// # Errors
///
/// Returns [`StoreError::Io`] if the report cannot be written.
pub fn write_summary(path: &Path, progress: &ScrapeProgress) -> Result<(), StoreError> {
    fs::write(path, render_summary(progress)).map_err(|e| StoreError::io(path, e))
}
