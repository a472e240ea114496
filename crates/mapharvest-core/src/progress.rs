use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::category::Category;

/// Batch-lifetime progress, rewritten to disk after every keyword so an
/// interrupted run can resume at [`ScrapeProgress::resume_index`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScrapeProgress {
    pub total_keywords: usize,
    pub start_index: usize,
    pub completed: usize,
    pub failed: usize,
    pub total_places: usize,
    /// Places per category directory name.
    pub categories: BTreeMap<Category, usize>,
    pub last_completed_keyword: String,
    pub last_completed_index: Option<usize>,
    pub failed_keywords: Vec<String>,
    pub start_time: DateTime<Utc>,
    pub end_time: Option<DateTime<Utc>>,
    #[serde(default)]
    pub interrupted: bool,
}

impl ScrapeProgress {
    #[must_use]
    pub fn new(total_keywords: usize, start_index: usize) -> Self {
        Self {
            total_keywords,
            start_index,
            completed: 0,
            failed: 0,
            total_places: 0,
            categories: BTreeMap::new(),
            last_completed_keyword: String::new(),
            last_completed_index: None,
            failed_keywords: Vec::new(),
            start_time: Utc::now(),
            end_time: None,
            interrupted: false,
        }
    }

    /// Reopens a checkpoint loaded from disk so a restarted run keeps adding
    /// to it.
    #[must_use]
    pub fn resumed(mut self, total_keywords: usize) -> Self {
        self.total_keywords = total_keywords;
        self.interrupted = false;
        self.end_time = None;
        self
    }

    /// Record a keyword that ran to completion, including one that found
    /// nothing.
    pub fn record_completed(
        &mut self,
        index: usize,
        keyword: &str,
        category: Category,
        places: usize,
    ) {
        self.forget_failure(keyword);
        self.completed += 1;
        self.last_completed_keyword = keyword.to_string();
        self.last_completed_index = Some(index);
        if places > 0 {
            self.total_places += places;
            *self.categories.entry(category).or_insert(0) += places;
        }
    }

    pub fn record_failed(&mut self, keyword: &str) {
        self.forget_failure(keyword);
        self.failed += 1;
        self.failed_keywords.push(keyword.to_string());
    }

    /// A keyword retried after a resume is only counted by its latest result.
    fn forget_failure(&mut self, keyword: &str) {
        if let Some(pos) = self.failed_keywords.iter().position(|k| k == keyword) {
            self.failed_keywords.remove(pos);
            self.failed -= 1;
        }
    }

    pub fn finish(&mut self, interrupted: bool) {
        self.interrupted = interrupted;
        self.end_time = Some(Utc::now());
    }

    /// Index of the keyword a restarted run should begin with.
    #[must_use]
    pub fn resume_index(&self) -> usize {
        self.last_completed_index
            .map_or(self.start_index, |i| i + 1)
    }
}
